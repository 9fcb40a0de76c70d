use anyhow::Result;

/// One node of a book's table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TocNode {
    /// Leaf entry pointing at a document
    Link { title: String, href: String },
    /// Grouping entry; only its children carry content
    Section { title: String, children: Vec<TocNode> },
}

/// What the matcher and extractor need from an opened ebook
pub trait Book {
    /// Top-level table of contents entries, in document order
    fn toc(&self) -> Vec<TocNode>;
    /// Raw bytes of the document at `href`, or `None` if the book has no such item
    fn document(&self, href: &str) -> Result<Option<Vec<u8>>>;
}
