//! Fatal error taxonomy for graph construction.
//!
//! Only inventory-level failures abort a run. Per-document read and parse
//! failures are reported and isolated (the document falls back to defaults),
//! and version-control query failures degrade to "untracked filtering
//! disabled" — neither surfaces here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a graph build.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The recursive walk over the scan root failed (unreadable directory,
    /// missing root, permission failure).
    #[error("failed to scan {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
