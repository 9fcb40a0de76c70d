use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Print the bibliography and reference sections of an EPUB as plain text
#[derive(Parser, Debug)]
#[command(name = "epub-biblio", version, about)]
pub struct Cli {
    /// Path to the input EPUB file (or a directory holding an unzipped EPUB)
    pub input: PathBuf,

    /// Element to extract text from; repeat to query several, in order
    #[arg(short, long = "tag", value_name = "TAG", default_value = "p")]
    pub tags: Vec<String>,

    /// Print the table of contents instead of extracting text
    #[arg(long, default_value_t = false)]
    pub list_toc: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
