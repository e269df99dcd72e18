//! Unique `"name"` values in the bundled JSON data file.
//!
//! The document is walked depth-first. Every object that has a key spelled
//! exactly `name` contributes that key's value, whatever its type, and the
//! walk then continues into all of the object's values. Arrays are walked
//! element by element; scalars end the walk.

use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, info, instrument};

/// Data file read when no path is given, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "frontend/src/data/db.json";

/// Failures loading the data file. Both are fatal for the extractor.
#[derive(Debug, Error)]
pub enum NamesError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum NameKind {
    Text,
    Json,
}

/// One collected name.
///
/// Strings keep their raw text; any other value is carried as compact JSON.
/// Ordering is by that text first, so a set of names sorts the way the
/// report prints it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name {
    text: String,
    kind: NameKind,
}

impl Name {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<&Value> for Name {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Name {
                text: s.clone(),
                kind: NameKind::Text,
            },
            other => Name {
                text: other.to_string(),
                kind: NameKind::Json,
            },
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Read and parse the JSON document at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_document(path: impl AsRef<Path>) -> Result<Value, NamesError> {
    let raw = fs::read_to_string(path.as_ref()).await?;
    debug!(bytes = raw.len(), "Read data file");
    let document = serde_json::from_str(&raw)?;
    Ok(document)
}

/// Collect every distinct value stored under a `"name"` key anywhere in `document`.
pub fn collect_names(document: &Value) -> BTreeSet<Name> {
    let mut names = BTreeSet::new();
    walk(document, &mut names);
    info!(count = names.len(), "Collected unique names");
    names
}

fn walk(value: &Value, names: &mut BTreeSet<Name>) {
    match value {
        Value::Object(map) => {
            if let Some(name) = map.get("name") {
                names.insert(Name::from(name));
            }
            for child in map.values() {
                walk(child, names);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, names);
            }
        }
        _ => {}
    }
}

/// Render the extractor's report: the count line, then one name per line in order.
pub fn render_report(names: &BTreeSet<Name>) -> String {
    let mut out = format!("Found {} unique names.\n", names.len());
    for name in names {
        out.push_str(name.as_str());
        out.push('\n');
    }
    out
}

/// Load `path`, then write the report to `out`.
///
/// On a load failure the `Error reading file:` line is written instead and
/// the error is returned so the caller can exit non-zero.
#[instrument(level = "info", skip(out))]
pub async fn list_names<W: Write>(path: &str, out: &mut W) -> Result<(), NamesError> {
    let document = match load_document(path).await {
        Ok(document) => document,
        Err(e) => {
            error!(error = %e, "Failed to load data file");
            writeln!(out, "Error reading file: {e}")?;
            return Err(e);
        }
    };

    let names = collect_names(&document);
    out.write_all(render_report(&names).as_bytes())?;
    Ok(())
}
