//! Binary crate for the `weatherfy` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive city search and configuration
//! - Rendering the controller's state as terminal output

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod router;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the rendered views, diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
