#![forbid(unsafe_code)]

mod render;

use std::env;
use std::path::PathBuf;

use atlas_core::{GitCli, GraphConfig, NoVcs, SiteGraph, Vcs};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "atlas: build and visualize a site map from HTML files",
    long_about = "Scan a directory tree of HTML documents, resolve internal links into a\n\
directed site graph, and render it as an interactive force-directed map.",
    after_help = "EXAMPLES:\n    # Map a site and write the default artifact\n    atlas ./site\n\n    # Write somewhere else\n    atlas ./site --output maps/site.html\n\n    # Skip files git does not track yet\n    atlas ./site --exclude-untracked"
)]
struct Cli {
    /// Root directory to search for HTML files.
    root_dir: PathBuf,

    /// Output HTML file for the graph visualization.
    #[arg(long, default_value = "static/garden_map.html")]
    output: PathBuf,

    /// Exclude files the version-control system reports as untracked.
    #[arg(long)]
    exclude_untracked: bool,

    /// Path to a TOML config file (exclusion sets, route conventions).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Initialize tracing to stderr.
///
/// `ATLAS_LOG` overrides everything; otherwise the level follows the
/// `--verbose`/`--quiet` flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("ATLAS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "atlas_core=error,atlas_cli=error,atlas=error"
        } else if verbose {
            "atlas_core=debug,atlas_cli=debug,atlas=debug,info"
        } else {
            "atlas_core=info,atlas_cli=info,atlas=info,warn"
        })
    });

    let format = env::var("ATLAS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => GraphConfig::load(path)?,
        None => GraphConfig::default(),
    };

    let vcs: &dyn Vcs = if cli.exclude_untracked {
        &GitCli
    } else {
        &NoVcs
    };

    let graph = SiteGraph::build(&cli.root_dir, &config, vcs, cli.exclude_untracked)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "site graph built"
    );

    render::write_artifact(&graph, &cli.output)?;

    println!("Site map generated at {}", cli.output.display());
    Ok(())
}
