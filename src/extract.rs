use crate::book::Book;
use anyhow::{anyhow, bail, Context, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Element names whose text is pulled out of each document, in query order.
#[derive(Debug, Clone)]
pub struct TagFilter {
    tags: Vec<(String, Selector)>,
}

impl TagFilter {
    pub fn new<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim().to_ascii_lowercase();
            if !is_element_name(&tag) {
                bail!("Invalid tag name: '{}'", tag);
            }
            let selector =
                Selector::parse(&tag).map_err(|_| anyhow!("Invalid tag name: '{}'", tag))?;
            compiled.push((tag, selector));
        }

        if compiled.is_empty() {
            bail!("At least one tag name is required");
        }

        Ok(Self { tags: compiled })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|(name, _)| name.as_str())
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        Self {
            tags: vec![("p".to_string(), Selector::parse("p").expect("`p` is a valid selector"))],
        }
    }
}

fn is_element_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Extracted text keyed by href, kept in the order the hrefs were given.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractedTexts {
    entries: Vec<(String, String)>,
}

impl ExtractedTexts {
    /// Inserts or replaces the text for `href`; a replaced entry keeps its position.
    pub fn insert(&mut self, href: String, text: String) {
        match self.entries.iter_mut().find(|(h, _)| *h == href) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((href, text)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, href: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(h, _)| h == href)
            .map(|(_, text)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(href, text)| (href.as_str(), text.as_str()))
    }
}

/// Pulls the text of every element matching `tags` out of each href's document.
///
/// Hrefs the book cannot resolve are logged and left out of the result.
/// A document that exists but cannot be read is an error.
pub fn extract_text(book: &dyn Book, hrefs: &[String], tags: &TagFilter) -> Result<ExtractedTexts> {
    let mut texts = ExtractedTexts::default();

    for href in hrefs {
        let Some(content) = book
            .document(href)
            .with_context(|| format!("Failed to load '{}'", href))?
        else {
            warn!(%href, "Item not found in the book, skipping");
            continue;
        };

        let html = String::from_utf8_lossy(&content);
        let text = extract_from_html(&html, tags);
        debug!(%href, bytes = content.len(), chars = text.len(), "Extracted text");
        texts.insert(href.clone(), text);
    }

    Ok(texts)
}

/// Text of each matching element, tag by tag in filter order, joined by newlines.
pub fn extract_from_html(html: &str, tags: &TagFilter) -> String {
    let document = Html::parse_document(html);
    let mut fragments = Vec::new();

    for (_, selector) in &tags.tags {
        for element in document.select(selector) {
            fragments.push(element_text(element));
        }
    }

    fragments.join("\n")
}

/// All descendant text of `element`, trimmed, with every whitespace run
/// (line breaks included) collapsed to one space so each element yields one line.
/// Whitespace inside a text node is therefore not preserved verbatim.
fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::testing::MemoryBook;
    use crate::book::TocNode;
    use rstest::rstest;

    const REFS: &str = "<html><body><h2>References</h2>\
        <p>Smith, 2020.</p>\n<p>  Jones,\n   <i>2021</i>.  </p></body></html>";

    fn hrefs(list: &[&str]) -> Vec<String> {
        list.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn test_default_filter_is_paragraphs() {
        let filter = TagFilter::default();
        assert_eq!(filter.names().collect::<Vec<_>>(), vec!["p"]);
    }

    #[rstest]
    #[case(&["p"], true)]
    #[case(&["P", "li"], true)]
    #[case(&["h2", "my-tag"], true)]
    #[case(&[], false)]
    #[case(&[""], false)]
    #[case(&["div p"], false)]
    #[case(&["p.note"], false)]
    #[case(&["2p"], false)]
    fn test_tag_filter_validation(#[case] tags: &[&str], #[case] ok: bool) {
        assert_eq!(TagFilter::new(tags.iter().copied()).is_ok(), ok);
    }

    #[test]
    fn test_extract_paragraphs_normalizes_whitespace() {
        let text = extract_from_html(REFS, &TagFilter::default());
        assert_eq!(text, "Smith, 2020.\nJones, 2021.");
    }

    #[test]
    fn test_line_breaks_inside_an_element_become_spaces() {
        let html = "<p>Smith, J.\n   Title of work</p><p>\t</p>";
        assert_eq!(extract_from_html(html, &TagFilter::default()), "Smith, J. Title of work\n");
    }

    #[test]
    fn test_tags_are_queried_in_filter_order() {
        let html = "<body><p>one</p><li>item</li><p>two</p></body>";
        let filter = TagFilter::new(["li", "p"]).unwrap();
        assert_eq!(extract_from_html(html, &filter), "item\none\ntwo");
    }

    #[test]
    fn test_no_matching_elements_gives_empty_text() {
        let html = "<body><div>nothing here</div></body>";
        assert_eq!(extract_from_html(html, &TagFilter::default()), "");
    }

    #[test]
    fn test_unresolved_href_is_skipped() {
        let book = MemoryBook::new(vec![]).with_document("refs.xhtml", REFS);

        let texts = extract_text(
            &book,
            &hrefs(&["missing.xhtml", "refs.xhtml"]),
            &TagFilter::default(),
        )
        .unwrap();

        assert_eq!(texts.len(), 1);
        assert_eq!(texts.get("missing.xhtml"), None);
        assert!(texts.get("refs.xhtml").is_some());
    }

    #[test]
    fn test_preserves_href_order() {
        let book = MemoryBook::new(vec![TocNode::link("Sources", "b.xhtml")])
            .with_document("a.xhtml", "<p>A</p>")
            .with_document("b.xhtml", "<p>B</p>")
            .with_document("c.xhtml", "<p>C</p>");

        let texts = extract_text(
            &book,
            &hrefs(&["c.xhtml", "gone.xhtml", "a.xhtml", "b.xhtml"]),
            &TagFilter::default(),
        )
        .unwrap();

        let order: Vec<_> = texts.iter().collect();
        assert_eq!(order, vec![("c.xhtml", "C"), ("a.xhtml", "A"), ("b.xhtml", "B")]);
    }

    #[test]
    fn test_duplicate_href_keeps_first_position() {
        let mut texts = ExtractedTexts::default();
        texts.insert("a".into(), "1".into());
        texts.insert("b".into(), "2".into());
        texts.insert("a".into(), "3".into());

        let order: Vec<_> = texts.iter().collect();
        assert_eq!(order, vec![("a", "3"), ("b", "2")]);
    }
}
