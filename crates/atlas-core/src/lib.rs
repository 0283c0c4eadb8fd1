//! atlas-core library.
//!
//! Scans a directory tree of HTML documents and builds a directed site
//! graph: nodes are documents surviving exclusion, edges are resolved
//! internal links plus structural parent/child edges inferred from
//! directory layout. Rendering the graph is the CLI's job.
//!
//! # Conventions
//!
//! - **Errors**: fatal scan failures are [`error::ScanError`]; everything
//!   local to one document degrades with a diagnostic instead of failing.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod inventory;
pub mod links;
pub mod paths;
pub mod title;
pub mod vcs;

pub use config::GraphConfig;
pub use error::ScanError;
pub use graph::{PageNode, SiteGraph};
pub use vcs::{GitCli, NoVcs, Vcs};
