use crate::book::TocNode;
use crate::extract::ExtractedTexts;

/// Formats extracted texts for stdout.
///
/// A single match prints bare; several matches each get a `Text from <href>:`
/// header and a trailing blank line. No matches print nothing.
pub fn format_texts(texts: &ExtractedTexts) -> String {
    let mut out = String::new();

    if texts.len() == 1 {
        for (_, text) in texts.iter() {
            out.push_str(text);
            out.push('\n');
        }
        return out;
    }

    for (href, text) in texts.iter() {
        out.push_str(&format!("Text from {}:\n{}\n\n", href, text));
    }
    out
}

/// Indented outline of the table of contents, two spaces per level.
pub fn format_toc(nodes: &[TocNode]) -> String {
    let mut lines = Vec::new();
    push_toc_lines(nodes, 0, &mut lines);

    let result = lines.join("\n");
    if result.is_empty() {
        result
    } else {
        result + "\n"
    }
}

fn push_toc_lines(nodes: &[TocNode], depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            TocNode::Link { title, href } => {
                lines.push(format!("{}{} ({})", indent, title, href));
            }
            TocNode::Section { title, children } => {
                lines.push(format!("{}{}/", indent, title));
                push_toc_lines(children, depth + 1, lines);
            }
        }
    }
}
