//! Command-line interface definitions for Loksewa Tools.
//!
//! Two independent subcommands share the binary; neither reads the other's
//! inputs.

use crate::names::DEFAULT_DB_PATH;
use clap::{Parser, Subcommand};

/// Command-line arguments for the Loksewa Tools binary.
///
/// # Examples
///
/// ```sh
/// # Count and list the unique names in the frontend data file
/// loksewa_tools list-names
///
/// # Smoke-test article extraction against the built-in news pages
/// loksewa_tools test-scraper
///
/// # ...or against pages of your choosing
/// loksewa_tools test-scraper -u https://www.setopati.com/politics/1 -u https://example.com
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every distinct value stored under a "name" key in the data file
    ListNames {
        /// Path to the JSON data file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        path: String,
    },
    /// Fetch news pages and print the article text each site rule extracts
    TestScraper {
        /// Page to test; repeatable. Defaults to one Setopati and one Gorkhapatra article
        #[arg(short = 'u', long = "url")]
        urls: Vec<String>,
    },
}
