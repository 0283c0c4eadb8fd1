//! Version-control capability for untracked-file exclusion.
//!
//! The engine only ever asks two read-only questions: "what is the
//! repository root for this directory?" and "which paths are untracked?".
//! Both are modeled behind the [`Vcs`] trait so tests can substitute a fake
//! without spawning a real `git` process, and so the default build path
//! ([`NoVcs`]) touches no external tool at all.
//!
//! Every failure mode here fails open: a directory that is not a repository
//! yields `None`, and a failed status query yields an empty untracked set.
//! Untracked filtering is a convenience, never a correctness requirement.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::error;

use crate::paths;

/// Read-only version-control queries.
pub trait Vcs {
    /// Repository root containing `dir`, or `None` when `dir` is not under
    /// version control.
    fn repo_root(&self, dir: &Path) -> Option<PathBuf>;

    /// Paths reported as untracked, relative to `repo_root`. Query failures
    /// are reported and degrade to an empty set.
    fn untracked(&self, repo_root: &Path) -> BTreeSet<PathBuf>;
}

/// No-op implementation used when untracked filtering is not requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVcs;

impl Vcs for NoVcs {
    fn repo_root(&self, _dir: &Path) -> Option<PathBuf> {
        None
    }

    fn untracked(&self, _repo_root: &Path) -> BTreeSet<PathBuf> {
        BTreeSet::new()
    }
}

/// Git implementation backed by the `git` binary on `PATH`.
///
/// Calls are blocking with no timeout; this is an operator-invoked local
/// tool, not a service.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl Vcs for GitCli {
    fn repo_root(&self, dir: &Path) -> Option<PathBuf> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(dir)
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            return None;
        }
        Some(PathBuf::from(root))
    }

    fn untracked(&self, repo_root: &Path) -> BTreeSet<PathBuf> {
        let output = match Command::new("git")
            .args(["status", "--porcelain"])
            .current_dir(repo_root)
            .output()
        {
            Ok(output) => output,
            Err(err) => {
                error!("Error retrieving untracked files: {err}");
                return BTreeSet::new();
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Error retrieving untracked files: {}", stderr.trim());
            return BTreeSet::new();
        }

        parse_porcelain(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Extract untracked paths from `git status --porcelain` output.
///
/// Untracked entries are lines of the form `?? path/to/file`.
fn parse_porcelain(stdout: &str) -> BTreeSet<PathBuf> {
    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("??"))
        .map(|rest| paths::normalize(Path::new(rest.trim())))
        .collect()
}
