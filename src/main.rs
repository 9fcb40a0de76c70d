mod book;
mod cli;
mod epub_reader;
mod extract;
mod output;
mod report;
mod titles;

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(parse_error_code(&err));
        }
    };
    init_tracing(cli.log_level());

    match report::run(&cli) {
        Ok(out) => {
            print!("{}", out);
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(error = ?err, "Run failed");
            eprintln!("{}", failure_message(&err));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// `--help` and `--version` also arrive as parse errors and exit 0.
fn parse_error_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        EXIT_FAILURE
    } else {
        0
    }
}

fn failure_message(err: &anyhow::Error) -> String {
    format!("An error occurred: {:#}", err)
}

fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(env_filter),
        )
        .init();
}
