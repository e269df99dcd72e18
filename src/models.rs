//! Data models shared by the scraper tester.
//!
//! - [`Site`]: which extraction rule applies to a URL
//! - [`Extracted`]: cleaned article text pulled out of one page

use std::fmt;
use url::Url;

/// A news site with a dedicated extraction rule.
///
/// The variant is resolved once from the URL host and then drives every
/// later decision: which content region to select, which clutter to strip,
/// and how the result is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    /// setopati.com: a single `.editor-box` holds the article.
    Setopati,
    /// gorkhapatraonline.com: the longest of several `.blog-details` blocks.
    Gorkhapatra,
    /// Anything else: the whole `<body>`, untouched.
    Unknown,
}

impl Site {
    /// Resolve the rule for a URL. First match wins, checked in declaration order.
    pub fn from_url(url: &Url) -> Self {
        match url.host_str() {
            Some(host) if host.contains("setopati.com") => Site::Setopati,
            Some(host) if host.contains("gorkhapatraonline.com") => Site::Gorkhapatra,
            _ => Site::Unknown,
        }
    }

    /// Human-readable domain label. Unknown sites have none.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Site::Setopati => Some("Setopati"),
            Site::Gorkhapatra => Some("Gorkhapatra"),
            Site::Unknown => None,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("Generic"))
    }
}

/// Article text extracted from a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// The rule that produced the text.
    pub site: Site,
    /// Cleaned text, one block per text node, blocks separated by a blank line.
    pub text: String,
}
