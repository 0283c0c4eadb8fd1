//! Display-title resolution.
//!
//! A document's title is the trimmed text of its first `<h1>`. Documents
//! without one (or that cannot be read or parsed) fall back to the filename
//! without extension; this function never fails.

use std::fs;
use std::path::Path;

use scraper::{Html, Selector};
use tracing::warn;

/// Resolve the display title for the document at `path`.
#[must_use]
pub fn page_title(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(contents) => {
            if let Some(title) = first_heading(&contents) {
                return title;
            }
        }
        Err(err) => {
            warn!("Error reading {}: {err}", path.display());
        }
    }
    file_stem(path)
}

/// Trimmed text of the first `<h1>` element, if present and non-empty.
#[must_use]
pub fn first_heading(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("h1").expect("static selector");
    document
        .select(&selector)
        .next()
        .map(|h1| h1.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Filename without extension, the universal fallback title.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
