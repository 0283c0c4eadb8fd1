//! Internal hyperlink resolution.
//!
//! Every anchor href in a document is resolved to at most one identifier in
//! the node set. Three families of references exist:
//!
//! - **External**: `mailto:`, anything with a scheme or network location.
//!   Never produce edges.
//! - **Virtual routes**: pure-fragment hrefs (`#name`). Interpreted as
//!   addressing a conventional document under the configured pages root, not
//!   as in-page anchors. `#` alone addresses the configured home page.
//! - **Relative paths**: resolved against the referencing document's
//!   directory, with directory-implicit fallbacks (a directory is
//!   represented by the file named after it, else its `index.html`).
//!
//! References that resolve to nothing in the node set are dropped without
//! comment — links to external or not-yet-written pages are expected.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::config::GraphConfig;
use crate::paths;

/// Resolve every internal link in `doc` against the node set.
///
/// Read and parse failures are reported and yield the empty set; a broken
/// document never aborts the build.
#[must_use]
pub fn resolve_links(
    root: &Path,
    doc: &Path,
    nodes: &BTreeSet<PathBuf>,
    config: &GraphConfig,
) -> BTreeSet<PathBuf> {
    let contents = match fs::read_to_string(root.join(doc)) {
        Ok(contents) => contents,
        Err(err) => {
            warn!("Error reading {}: {err}", doc.display());
            return BTreeSet::new();
        }
    };

    extract_hrefs(&contents)
        .iter()
        .filter_map(|href| resolve_href(href, doc, root, nodes, config))
        .collect()
}

/// All `href` attribute values from the document's anchor elements, in
/// document order.
#[must_use]
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("static selector");
    document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(ToString::to_string)
        .collect()
}

/// Resolve a single href to a node-set identifier, if any.
fn resolve_href(
    href: &str,
    doc: &Path,
    root: &Path,
    nodes: &BTreeSet<PathBuf>,
    config: &GraphConfig,
) -> Option<PathBuf> {
    if href.starts_with("mailto:") {
        return None;
    }
    if let Some(route) = href.strip_prefix('#') {
        return resolve_fragment(route, nodes, config);
    }
    if is_external(href) {
        debug!("skipping external reference: {href}");
        return None;
    }
    resolve_relative(href, doc, root, nodes)
}

/// A reference with a scheme or network location never resolves internally.
fn is_external(href: &str) -> bool {
    // Protocol-relative references carry a network location but no scheme.
    if href.starts_with("//") {
        return true;
    }
    match url::Url::parse(href) {
        Ok(_) => true,
        Err(url::ParseError::RelativeUrlWithoutBase) => false,
        // Anything else is malformed enough that it cannot name a document.
        Err(_) => true,
    }
}

/// Resolve a fragment-style virtual route.
///
/// `route` is the href with its leading `#` removed. An empty route is the
/// home link. Otherwise three candidates under the pages root are probed in
/// precedence order, first node-set member wins:
///
/// 1. `<route>/<last-segment>.html` — a directory named after the route
///    containing a page named after its last segment,
/// 2. `<route>.html` — a flat file,
/// 3. `<route>/<basename>.html` — same shape as (1) via basename; kept for
///    robustness with trailing-slash routes.
fn resolve_fragment(
    route: &str,
    nodes: &BTreeSet<PathBuf>,
    config: &GraphConfig,
) -> Option<PathBuf> {
    let pages_root = &config.routes.pages_root;

    if route.is_empty() {
        let home = paths::normalize(&config.routes.home_page);
        return nodes.contains(&home).then_some(home);
    }

    let page = route.rsplit('/').next().unwrap_or(route);

    let mut candidates = vec![
        pages_root.join(route).join(format!("{page}.html")),
        pages_root.join(format!("{route}.html")),
    ];
    if let Some(base) = Path::new(route).file_name() {
        let base = base.to_string_lossy();
        candidates.push(pages_root.join(route).join(format!("{base}.html")));
    }

    candidates
        .into_iter()
        .map(|candidate| paths::normalize(&candidate))
        .find(|candidate| nodes.contains(candidate))
}

/// Resolve a normal relative reference against the referencing document's
/// directory.
fn resolve_relative(
    href: &str,
    doc: &Path,
    root: &Path,
    nodes: &BTreeSet<PathBuf>,
) -> Option<PathBuf> {
    // Query and in-page fragment do not affect the addressed document.
    let stripped = href.split('#').next().unwrap_or("");
    let stripped = stripped.split('?').next().unwrap_or("");

    let dir = doc.parent().unwrap_or_else(|| Path::new(""));
    let candidate = paths::normalize(&dir.join(stripped));

    if nodes.contains(&candidate) {
        return Some(candidate);
    }

    // A link to a directory addresses the file named after it, else the
    // conventional index file.
    if root.join(&candidate).is_dir() {
        if let Some(name) = candidate.file_name() {
            let same_name = candidate.join(format!("{}.html", name.to_string_lossy()));
            if nodes.contains(&same_name) {
                return Some(same_name);
            }
        }
        let index = candidate.join("index.html");
        if nodes.contains(&index) {
            return Some(index);
        }
    }

    None
}
