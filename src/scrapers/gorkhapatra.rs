//! Gorkhapatra article extraction.
//!
//! [Gorkhapatra Online](https://gorkhapatraonline.com) reuses the
//! `.blog-details` class for several blocks on an article page, most of them
//! small metadata boxes. The block with the most text is taken as the story.

use super::ExtractionRule;
use crate::utils::stripped_text_len;
use ego_tree::NodeId;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static BLOG_DETAILS: Lazy<Selector> = Lazy::new(|| Selector::parse(".blog-details").unwrap());

static CLUTTER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".share-buttons, .ads, .meta, script, style").unwrap());

/// Rule for gorkhapatraonline.com pages.
pub struct Gorkhapatra;

impl ExtractionRule for Gorkhapatra {
    fn select_region(&self, document: &Html) -> Option<NodeId> {
        // Strictly-greater keeps the earliest block on ties.
        let best = document.select(&BLOG_DETAILS).fold(
            None,
            |best: Option<(usize, ElementRef<'_>)>, candidate| {
                let len = stripped_text_len(candidate);
                match best {
                    Some((best_len, _)) if best_len >= len => best,
                    _ => Some((len, candidate)),
                }
            },
        );
        debug!(len = ?best.map(|(len, _)| len), "Picked longest .blog-details");
        best.map(|(_, el)| el.id())
    }

    fn clutter(&self) -> Option<&Selector> {
        Some(&*CLUTTER)
    }
}
