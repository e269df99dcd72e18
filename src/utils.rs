//! Helpers for reading text out of parsed HTML and for log formatting.
//!
//! The text helpers follow one rule: a "piece" is a single text node under an
//! element, trimmed of surrounding whitespace. Empty pieces are dropped, and
//! text that lives inside `script`, `style` or `template` never counts.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Elements whose text is never part of readable content.
const NON_TEXT_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Collect the trimmed, non-empty text pieces under `element` in document order.
pub fn text_pieces<'a>(element: ElementRef<'a>) -> Vec<&'a str> {
    let root = element.id();
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != root)
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|el| NON_TEXT_ELEMENTS.contains(&el.name()));
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect()
}

/// Readable text of `element`, pieces separated by `separator`.
pub fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    text_pieces(element).join(separator)
}

/// Character count of the stripped text, pieces concatenated with no separator.
pub fn stripped_text_len(element: ElementRef<'_>) -> usize {
    text_pieces(element)
        .iter()
        .map(|piece| piece.chars().count())
        .sum()
}

/// Detach every descendant of the element at `root` that matches `selector`.
///
/// The element itself is never removed. Returns how many nodes were detached.
pub fn detach_matching(document: &mut Html, root: NodeId, selector: &Selector) -> usize {
    let Some(element) = document.tree.get(root).and_then(ElementRef::wrap) else {
        return 0;
    };
    let doomed: Vec<_> = element.select(selector).map(|el| el.id()).collect();
    let removed = doomed.len();

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
    debug!(removed, "Detached clutter elements");
    removed
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a byte
/// count appended. Cuts always land on a character boundary.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}
