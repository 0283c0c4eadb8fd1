//! Graph build configuration.
//!
//! Exclusion lists and route conventions are data, not code: callers (and
//! tests) inject a [`GraphConfig`], optionally loaded from a TOML file.
//! Every field is defaulted, so an absent file or an empty table yields the
//! stock configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub exclude: ExcludeConfig,
    #[serde(default)]
    pub routes: RouteConfig,
}

/// Filename and title exclusion sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludeConfig {
    /// Bare filenames that are never documents (templates, fragments,
    /// generated output).
    #[serde(default = "default_exclude_files")]
    pub files: BTreeSet<String>,
    /// Resolved titles that exclude a document from the node set.
    #[serde(default = "default_exclude_titles")]
    pub titles: BTreeSet<String>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            files: default_exclude_files(),
            titles: default_exclude_titles(),
        }
    }
}

/// Conventional document locations used during link resolution and
/// redundancy suppression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Base directory for fragment-style virtual routes (`#name`).
    #[serde(default = "default_pages_root")]
    pub pages_root: PathBuf,
    /// Target of the empty fragment link `#`.
    #[serde(default = "default_home_page")]
    pub home_page: PathBuf,
    /// The conventional root document whose direct edges to structurally
    /// reachable children are suppressed.
    #[serde(default = "default_root_index")]
    pub root_index: PathBuf,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            pages_root: default_pages_root(),
            home_page: default_home_page(),
            root_index: default_root_index(),
        }
    }
}

fn default_exclude_files() -> BTreeSet<String> {
    [
        "output_graph.html",
        "animation_template.html",
        "sub.html",
        "index-head.html",
        "template.html",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_exclude_titles() -> BTreeSet<String> {
    [
        "@tailwindcss/forms examples",
        "@tailwindcss/forms-examples",
        "injected",
        "{{this imitates some kind of template fragment}}",
        "kitchen-sink",
        "~{linked-path}",
        "Hello world.",
        "private",
        "directory",
        "index-caps",
        "fragment",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_pages_root() -> PathBuf {
    PathBuf::from("src/pages")
}

fn default_home_page() -> PathBuf {
    PathBuf::from("src/pages/home.html")
}

fn default_root_index() -> PathBuf {
    PathBuf::from("index.html")
}

impl GraphConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
