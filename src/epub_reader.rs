use crate::book::{Book, TocNode};
use anyhow::{Context, Result};
use rbook::ebook::element::Href;
use rbook::epub::metadata::EpubVersion;
use rbook::epub::toc::EpubTocEntry;
use rbook::prelude::*;
use rbook::Epub;
use std::path::Path;
use tracing::debug;

pub struct EpubData {
    epub: Epub,
}

impl EpubData {
    /// Opens a zipped `.epub` file or a directory holding an unzipped one.
    ///
    /// The EPUB 3 navigation document is preferred; the legacy NCX is only
    /// consulted when a book has no nav document.
    pub fn open(path: &Path) -> Result<Self> {
        let epub = Epub::options()
            .strict(false)
            .preferred_toc(EpubVersion::EPUB3)
            .open(path)
            .with_context(|| format!("Failed to open EPUB: {}", path.display()))?;
        Ok(Self { epub })
    }

    pub fn title(&self) -> Option<String> {
        self.epub
            .metadata()
            .title()
            .map(|t| t.value().to_string())
    }
}

impl Book for EpubData {
    fn toc(&self) -> Vec<TocNode> {
        let package_dir = self.epub.package_directory();
        match self.epub.toc().contents() {
            Some(root) => root
                .children()
                .iter()
                .map(|entry| convert_entry(&entry, package_dir.as_str()))
                .collect(),
            None => {
                debug!("EPUB has no table of contents");
                Vec::new()
            }
        }
    }

    fn document(&self, href: &str) -> Result<Option<Vec<u8>>> {
        let absolute = absolute_href(self.epub.package_directory().as_str(), href);
        let path = Href::from(absolute.as_str()).path();
        let Some(entry) = self.epub.manifest().by_href(path.as_str()) else {
            return Ok(None);
        };
        let bytes = entry
            .read_bytes()
            .with_context(|| format!("Failed to read document: {}", href))?;
        Ok(Some(bytes))
    }
}

fn convert_entry(entry: &EpubTocEntry<'_>, package_dir: &str) -> TocNode {
    let title = entry.label().trim().to_string();

    let children = entry.children();
    if !children.is_empty() {
        let children = children
            .iter()
            .map(|child| convert_entry(&child, package_dir))
            .collect();
        return TocNode::Section { title, children };
    }

    match entry.href() {
        Some(href) => TocNode::Link {
            title,
            href: package_relative(package_dir, href.as_str()).to_string(),
        },
        None => TocNode::Section {
            title,
            children: Vec::new(),
        },
    }
}

/// Rewrites an absolute href (`/OEBPS/refs.xhtml`) relative to the package
/// directory (`refs.xhtml`). Hrefs outside that directory stay absolute.
fn package_relative<'a>(package_dir: &str, href: &'a str) -> &'a str {
    let dir = package_dir.trim_end_matches('/');
    href.strip_prefix(dir)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(href)
}

/// Inverse of [`package_relative`].
fn absolute_href(package_dir: &str, href: &str) -> String {
    if href.starts_with('/') {
        href.to_string()
    } else {
        format!("{}/{}", package_dir.trim_end_matches('/'), href)
    }
}
