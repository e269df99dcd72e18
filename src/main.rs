//! # Loksewa Tools
//!
//! Small maintenance utilities for the Loksewa study app.
//!
//! ## Subcommands
//!
//! - `list-names`: walk the frontend's JSON data file and print every
//!   distinct value found under a `"name"` key, sorted
//! - `test-scraper`: fetch Setopati and Gorkhapatra article pages and print
//!   the text each site's extraction rule pulls out
//!
//! ## Usage
//!
//! ```sh
//! loksewa_tools list-names
//! loksewa_tools test-scraper
//! ```
//!
//! Reports go to stdout. Diagnostics go to stderr through `tracing`; set
//! `RUST_LOG=debug` for more detail.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod models;
mod names;
mod scrapers;
mod utils;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    let mut stdout = std::io::stdout();
    match args.command {
        Command::ListNames { path } => {
            // The failure line is already on stdout; only the status is left.
            if names::list_names(&path, &mut stdout).await.is_err() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::TestScraper { urls } => {
            let urls = if urls.is_empty() {
                scrapers::DEFAULT_TEST_URLS.iter().map(|u| u.to_string()).collect()
            } else {
                urls
            };
            let client = scrapers::build_client()?;
            scrapers::run_page_tests(&client, &urls, &mut stdout).await?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
