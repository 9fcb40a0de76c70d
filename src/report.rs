use crate::book::Book;
use crate::cli::Cli;
use crate::epub_reader::EpubData;
use crate::extract::{self, TagFilter};
use crate::output;
use crate::titles;
use anyhow::Result;
use tracing::{debug, info};

/// Opens the EPUB named on the command line and returns what should go to stdout.
pub fn run(cli: &Cli) -> Result<String> {
    let tags = TagFilter::new(&cli.tags)?;
    let epub = EpubData::open(&cli.input)?;
    info!(
        path = %cli.input.display(),
        title = epub.title().as_deref().unwrap_or("<untitled>"),
        "Opened EPUB"
    );

    if cli.list_toc {
        return Ok(output::format_toc(&epub.toc()));
    }

    report(&epub, &tags)
}

/// Finds the bibliography chapters of `book` and formats their text.
pub fn report(book: &dyn Book, tags: &TagFilter) -> Result<String> {
    let hrefs = titles::find_bibliography_hrefs(book);
    info!(matches = hrefs.len(), "Matched bibliography chapters");
    debug!(?hrefs);

    let texts = extract::extract_text(book, &hrefs, tags)?;
    if texts.is_empty() {
        info!(tags = ?tags.names().collect::<Vec<_>>(), "No bibliography text extracted");
    }
    Ok(output::format_texts(&texts))
}
