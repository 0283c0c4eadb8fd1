//! Document discovery.
//!
//! The inventory is the universe of documents link resolution runs against:
//! every HTML file under the scan root, minus filename-excluded pages and
//! (optionally) files the version-control system reports as untracked.
//! Title-based exclusion happens later, in the graph builder.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::GraphConfig;
use crate::error::ScanError;
use crate::paths;
use crate::vcs::Vcs;

/// True for files the scanner treats as hypertext documents.
#[must_use]
pub fn is_document(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm")
    })
}

/// Scan `root` for document identifiers.
///
/// With `exclude_untracked`, the [`Vcs`] capability is consulted; a root
/// that is not under version control logs a warning and the flag becomes a
/// no-op.
///
/// # Errors
///
/// Returns [`ScanError::Walk`] when the root (or a directory under it)
/// cannot be read.
pub fn scan(
    root: &Path,
    config: &GraphConfig,
    vcs: &dyn Vcs,
    exclude_untracked: bool,
) -> Result<BTreeSet<PathBuf>, ScanError> {
    let untracked = if exclude_untracked {
        match vcs.repo_root(root) {
            Some(repo_root) => vcs.untracked(&repo_root),
            None => {
                warn!(
                    "{} is not under version control; proceeding without excluding untracked files",
                    root.display()
                );
                BTreeSet::new()
            }
        }
    } else {
        BTreeSet::new()
    };

    let mut documents = BTreeSet::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() || !is_document(entry.path()) {
            continue;
        }

        let filename = entry.file_name().to_string_lossy();
        if config.exclude.files.contains(filename.as_ref()) {
            debug!("excluding {} by filename", entry.path().display());
            continue;
        }

        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let id = paths::normalize(rel);
        if untracked.contains(&id) {
            debug!("excluding untracked {}", id.display());
            continue;
        }
        documents.insert(id);
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::NoVcs;
    use std::fs;

    struct FakeVcs {
        root: PathBuf,
        untracked: BTreeSet<PathBuf>,
    }

    impl Vcs for FakeVcs {
        fn repo_root(&self, _dir: &Path) -> Option<PathBuf> {
            Some(self.root.clone())
        }

        fn untracked(&self, _repo_root: &Path) -> BTreeSet<PathBuf> {
            self.untracked.clone()
        }
    }

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, contents).expect("write");
    }

    #[test]
    fn finds_html_and_htm_case_insensitively() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "index.html", "x");
        write(dir.path(), "old.HTM", "x");
        write(dir.path(), "notes/deep.Html", "x");
        write(dir.path(), "style.css", "x");
        write(dir.path(), "readme.md", "x");

        let docs = scan(dir.path(), &GraphConfig::default(), &NoVcs, false).expect("scan");
        assert_eq!(docs.len(), 3);
        assert!(docs.contains(Path::new("index.html")));
        assert!(docs.contains(Path::new("old.HTM")));
        assert!(docs.contains(Path::new("notes/deep.Html")));
    }

    #[test]
    fn filename_exclusion_applies_at_any_depth() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "index.html", "x");
        write(dir.path(), "template.html", "x");
        write(dir.path(), "nested/template.html", "x");

        let docs = scan(dir.path(), &GraphConfig::default(), &NoVcs, false).expect("scan");
        assert_eq!(docs.len(), 1);
        assert!(docs.contains(Path::new("index.html")));
    }

    #[test]
    fn untracked_files_are_dropped_when_requested() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "index.html", "x");
        write(dir.path(), "drafts/wip.html", "x");

        let vcs = FakeVcs {
            root: dir.path().to_path_buf(),
            untracked: [PathBuf::from("drafts/wip.html")].into_iter().collect(),
        };

        let docs = scan(dir.path(), &GraphConfig::default(), &vcs, true).expect("scan");
        assert_eq!(docs.len(), 1);
        assert!(docs.contains(Path::new("index.html")));

        // Without the flag, the same tree keeps the draft.
        let docs = scan(dir.path(), &GraphConfig::default(), &vcs, false).expect("scan");
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn non_repository_root_fails_open() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "index.html", "x");

        // NoVcs reports "not a repository"; the flag degrades to a no-op.
        let docs = scan(dir.path(), &GraphConfig::default(), &NoVcs, true).expect("scan");
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn missing_root_is_fatal() {
        let result = scan(
            Path::new("/nonexistent/garden"),
            &GraphConfig::default(),
            &NoVcs,
            false,
        );
        assert!(result.is_err());
    }
}
