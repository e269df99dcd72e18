//! Setopati article extraction.
//!
//! Article pages on [Setopati](https://www.setopati.com) keep the story body
//! in a single `.editor-box` container. Inline ads, embedded media and
//! scripts are sprinkled between paragraphs and are stripped before the text
//! is read.

use super::ExtractionRule;
use ego_tree::NodeId;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static EDITOR_BOX: Lazy<Selector> = Lazy::new(|| Selector::parse(".editor-box").unwrap());

static CLUTTER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".insert-ad, .media, .ad-item, script, style").unwrap());

/// Rule for setopati.com pages.
pub struct Setopati;

impl ExtractionRule for Setopati {
    fn select_region(&self, document: &Html) -> Option<NodeId> {
        let region = document.select(&EDITOR_BOX).next();
        debug!(found = region.is_some(), "Looked up .editor-box");
        region.map(|el| el.id())
    }

    fn clutter(&self) -> Option<&Selector> {
        Some(&*CLUTTER)
    }
}
