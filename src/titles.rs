use crate::book::{Book, TocNode};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Lowercase TOC titles that mark a bibliography-like chapter
static BIBLIOGRAPHY_TITLES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "bibliography",
        "references",
        "works cited",
        "further reading",
        "related works",
        "additional reading",
        "sources",
        "literature cited",
        "reference list",
        "citations",
        "selected bibliography",
        "recommended reading",
    ])
});

/// Case-insensitive, whole-title match against the known bibliography names.
pub fn is_bibliography_title(title: &str) -> bool {
    BIBLIOGRAPHY_TITLES.contains(title.to_lowercase().as_str())
}

/// Collects the hrefs of every TOC link whose title names a bibliography
/// section, in depth-first pre-order. Section titles are never tested.
pub fn find_bibliography_hrefs(book: &dyn Book) -> Vec<String> {
    let mut hrefs = Vec::new();
    collect_hrefs(&book.toc(), &mut hrefs);
    hrefs
}

fn collect_hrefs(nodes: &[TocNode], hrefs: &mut Vec<String>) {
    for node in nodes {
        match node {
            TocNode::Link { title, href } => {
                if is_bibliography_title(title) {
                    hrefs.push(href.clone());
                }
            }
            TocNode::Section { children, .. } => collect_hrefs(children, hrefs),
        }
    }
}
