//! Site graph construction.
//!
//! # Overview
//!
//! Builds a [`petgraph`] directed graph over the scanned documents: one node
//! per document surviving exclusion, one edge per resolved internal link,
//! plus structural edges inferred from directory layout, minus the root
//! index's redundant shortcuts to structurally reachable children.
//!
//! ## Edge direction
//!
//! An edge `A → B` means "A links to B" (explicitly, or implicitly as B's
//! directory parent page). Parallel edges collapse; self-loops are allowed.
//!
//! ## Determinism
//!
//! For a fixed filesystem snapshot the node and edge *sets* are fully
//! deterministic. Iteration order is an implementation detail; compare
//! graphs as sets.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{info, warn};

use crate::config::GraphConfig;
use crate::error::ScanError;
use crate::vcs::Vcs;
use crate::{inventory, links, paths, title};

/// Per-node metadata carried into the rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNode {
    /// Root-relative identifier.
    pub id: PathBuf,
    /// Display title (first heading, else file stem).
    pub title: String,
    /// Identifier with separators normalized to `/`, for linking.
    pub url: String,
}

/// The finished site graph.
#[derive(Debug)]
pub struct SiteGraph {
    /// Directed graph: nodes = documents, edges = links.
    pub graph: DiGraph<PageNode, ()>,
    /// Mapping from identifier to petgraph `NodeIndex`.
    node_map: HashMap<PathBuf, NodeIndex>,
}

impl SiteGraph {
    /// Build the site graph for the tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error when the root directory cannot be scanned. Failures
    /// local to one document (unreadable file, broken markup) are reported
    /// and isolated, never fatal.
    pub fn build(
        root: &Path,
        config: &GraphConfig,
        vcs: &dyn Vcs,
        exclude_untracked: bool,
    ) -> Result<Self, ScanError> {
        let inventory = inventory::scan(root, config, vcs, exclude_untracked)?;

        // Resolve titles and apply title-based exclusion. What survives is
        // the node set — the only valid universe for edge endpoints.
        let mut titles: BTreeMap<PathBuf, String> = BTreeMap::new();
        let mut nodes: BTreeSet<PathBuf> = BTreeSet::new();
        for id in &inventory {
            let page_title = title::page_title(&root.join(id));
            if config.exclude.titles.contains(&page_title) {
                info!("Excluding {} based on title: {page_title}", id.display());
                continue;
            }
            titles.insert(id.clone(), page_title);
            nodes.insert(id.clone());
        }

        let mut graph = DiGraph::<PageNode, ()>::new();
        let mut node_map: HashMap<PathBuf, NodeIndex> = HashMap::with_capacity(nodes.len());
        for id in &nodes {
            let node = PageNode {
                id: id.clone(),
                title: titles.get(id).cloned().unwrap_or_default(),
                url: paths::to_url(id),
            };
            let idx = graph.add_node(node);
            node_map.insert(id.clone(), idx);
        }

        let mut site = Self { graph, node_map };

        // Explicitly authored link edges.
        for id in &nodes {
            for target in links::resolve_links(root, id, &nodes, config) {
                site.add_edge_dedup(id, &target);
            }
        }

        // Structural edges, then the redundancy pass over their targets.
        let children = site.add_structural_edges(root, &nodes);
        site.suppress_redundant_root_edges(config, &children);

        Ok(site)
    }

    /// Infer parent → child edges from directory layout.
    ///
    /// A directory containing a document named after the directory itself
    /// (its "parent page") implicitly links to every other document directly
    /// in that directory. Returns the set of children reached this way.
    fn add_structural_edges(
        &mut self,
        root: &Path,
        nodes: &BTreeSet<PathBuf>,
    ) -> BTreeSet<PathBuf> {
        // Group node identifiers by containing directory. Every structural
        // endpoint is a node, so the node set is the full source of truth.
        let mut by_dir: BTreeMap<PathBuf, Vec<&PathBuf>> = BTreeMap::new();
        for id in nodes {
            let dir = id.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
            by_dir.entry(dir).or_default().push(id);
        }

        let mut children = BTreeSet::new();
        for (dir, members) in by_dir {
            let Some(dir_name) = directory_name(&dir, root) else {
                continue;
            };
            let parent = dir.join(format!("{dir_name}.html"));
            if !nodes.contains(&parent) {
                continue;
            }
            for &child in &members {
                if *child == parent {
                    continue;
                }
                self.add_edge_dedup(&parent, child);
                children.insert(child.clone());
            }
        }
        children
    }

    /// Remove direct root-index edges to children already reachable via a
    /// structural parent; they would only clutter the rendered map.
    fn suppress_redundant_root_edges(
        &mut self,
        config: &GraphConfig,
        children: &BTreeSet<PathBuf>,
    ) {
        let root_index = paths::normalize(&config.routes.root_index);
        let Some(&root_idx) = self.node_map.get(&root_index) else {
            warn!(
                "No node found for {}; skipping redundant-edge removal",
                root_index.display()
            );
            return;
        };
        for child in children {
            if let Some(&child_idx) = self.node_map.get(child) {
                if let Some(edge) = self.graph.find_edge(root_idx, child_idx) {
                    self.graph.remove_edge(edge);
                }
            }
        }
    }

    /// Add an edge unless the pair already exists (petgraph allows parallel
    /// edges by default). Endpoints outside the node set are ignored.
    fn add_edge_dedup(&mut self, source: &Path, target: &Path) {
        let (Some(&a), Some(&b)) = (self.node_map.get(source), self.node_map.get(target)) else {
            return;
        };
        if !self.graph.contains_edge(a, b) {
            self.graph.add_edge(a, b, ());
        }
    }

    /// Number of documents in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for an identifier.
    #[must_use]
    pub fn node_index(&self, id: &Path) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// True when the graph contains the directed edge `source → target`.
    #[must_use]
    pub fn contains_edge(&self, source: &Path, target: &Path) -> bool {
        match (self.node_map.get(source), self.node_map.get(target)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Iterate over node metadata.
    pub fn nodes(&self) -> impl Iterator<Item = &PageNode> {
        self.graph.node_weights()
    }

    /// Iterate over edges as `(source, target)` metadata pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&PageNode, &PageNode)> {
        self.graph.edge_indices().filter_map(|edge| {
            let (a, b) = self.graph.edge_endpoints(edge)?;
            Some((self.graph.node_weight(a)?, self.graph.node_weight(b)?))
        })
    }
}

/// The name a directory's parent page is matched against. The scan root
/// itself is named after its on-disk directory.
fn directory_name(dir: &Path, root: &Path) -> Option<String> {
    if let Some(name) = dir.file_name() {
        return Some(name.to_string_lossy().into_owned());
    }
    let canonical = root.canonicalize().ok()?;
    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
