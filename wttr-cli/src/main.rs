//! Binary crate for the `wttr` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Console error reporting
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; the weather report owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
