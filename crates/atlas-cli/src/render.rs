//! Interactive artifact emission.
//!
//! Turns the finished [`SiteGraph`] into one self-contained HTML document
//! driven by vis-network: dark background, dot nodes, directed arrows,
//! barnesHut physics, and click-to-navigate nodes. After assembly the
//! document's head is patched textually to pull in the site stylesheet and
//! a couple of style overrides — a post-process on the rendered text, not a
//! graph-level behavior.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use atlas_core::SiteGraph;
use serde::Serialize;

/// One vis-network node. `id` doubles as the click target; `title` is the
/// hover tooltip (the document's relative path, as in the original site
/// map).
#[derive(Debug, Serialize)]
struct VisNode<'a> {
    id: &'a str,
    label: &'a str,
    title: &'a str,
    url: &'a str,
    href: &'a str,
}

#[derive(Debug, Serialize)]
struct VisEdge<'a> {
    from: &'a str,
    to: &'a str,
}

/// Visual styling and physics, tuned to keep labels from overlapping.
const OPTIONS: &str = r##"{
  "nodes": {
    "font": { "size": 14, "color": "white" },
    "color": {
      "background": "#4A90E2",
      "border": "#1C1C1C",
      "highlight": { "background": "#50E3C2", "border": "#1C1C1C" }
    },
    "shape": "dot",
    "size": 20
  },
  "edges": {
    "color": { "color": "#AAAAAA", "highlight": "#FFFFFF" },
    "arrows": { "to": { "enabled": true, "scaleFactor": 0.5, "type": "arrow" } },
    "smooth": { "enabled": true, "type": "dynamic" }
  },
  "physics": {
    "enabled": true,
    "barnesHut": {
      "gravitationalConstant": -2000,
      "centralGravity": 0.4,
      "springLength": 100,
      "springConstant": 0.04,
      "damping": 0.09,
      "avoidOverlap": 1
    },
    "minVelocity": 0.5,
    "solver": "barnesHut"
  },
  "interaction": { "hover": true, "navigationButtons": false, "keyboard": false }
}"##;

const CUSTOM_CSS: &str = r"    <style>
        body {
            overflow: hidden;
        }
        #mynetwork {
            border: none !important;
        }
    </style>
";

const STYLESHEET_LINK: &str = "  <link rel=\"stylesheet\" href=\"static/stylesheet.css\">\n";

/// Render the graph to a complete HTML document.
///
/// # Errors
///
/// Returns an error if node or edge serialization fails.
pub fn render_html(graph: &SiteGraph) -> Result<String> {
    let nodes: Vec<VisNode<'_>> = graph
        .nodes()
        .map(|node| VisNode {
            id: &node.url,
            label: &node.title,
            title: &node.url,
            url: &node.url,
            href: &node.url,
        })
        .collect();
    let edges: Vec<VisEdge<'_>> = graph
        .edges()
        .map(|(from, to)| VisEdge {
            from: &from.url,
            to: &to.url,
        })
        .collect();

    let nodes_json = escape_script(&serde_json::to_string(&nodes).context("serialize nodes")?);
    let edges_json = escape_script(&serde_json::to_string(&edges).context("serialize edges")?);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <title>Site Map</title>\n");
    html.push_str(
        "  <script src=\"https://unpkg.com/vis-network@9.1.9/dist/vis-network.min.js\"></script>\n",
    );
    html.push_str("  <style>\n");
    html.push_str("    html, body { margin: 0; padding: 0; }\n");
    html.push_str("    #mynetwork { width: 100%; height: 500px; background-color: #2B2B2B; }\n");
    html.push_str("  </style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str("  <div id=\"mynetwork\"></div>\n");
    html.push_str("  <script>\n");
    html.push_str(&format!("    const nodes = new vis.DataSet({nodes_json});\n"));
    html.push_str(&format!("    const edges = new vis.DataSet({edges_json});\n"));
    html.push_str("    const container = document.getElementById(\"mynetwork\");\n");
    html.push_str(&format!(
        "    const network = new vis.Network(container, {{ nodes, edges }}, {OPTIONS});\n"
    ));
    html.push_str("    network.on(\"click\", (params) => {\n");
    html.push_str("      if (params.nodes.length === 1) {\n");
    html.push_str("        const node = nodes.get(params.nodes[0]);\n");
    html.push_str("        if (node.href) { window.location.href = node.href; }\n");
    html.push_str("      }\n");
    html.push_str("    });\n");
    html.push_str("  </script>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");

    Ok(html)
}

/// Patch the document head: style overrides first, then the stylesheet
/// link, each inserted before `</head>`.
#[must_use]
pub fn patch_head(html: &str) -> String {
    let html = html.replacen("</head>", &format!("{CUSTOM_CSS}</head>"), 1);
    html.replacen("</head>", &format!("{STYLESHEET_LINK}</head>"), 1)
}

/// Render, patch, and write the artifact to `output`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error when rendering or any filesystem write fails.
pub fn write_artifact(graph: &SiteGraph, output: &Path) -> Result<()> {
    let html = patch_head(&render_html(graph)?);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(output, html).with_context(|| format!("Failed to write {}", output.display()))
}

/// Keep embedded JSON from terminating the surrounding script element.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{GraphConfig, NoVcs, SiteGraph};
    use std::fs;

    fn sample_graph() -> SiteGraph {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("index.html"),
            r##"<h1>Garden</h1><a href="a.html">a</a>"##,
        )
        .expect("write");
        fs::write(dir.path().join("a.html"), "<h1>Alpha</h1>").expect("write");
        SiteGraph::build(dir.path(), &GraphConfig::default(), &NoVcs, false).expect("build")
    }

    #[test]
    fn artifact_embeds_nodes_and_edges() {
        let html = render_html(&sample_graph()).expect("render");
        assert!(html.contains(r#""label":"Garden""#));
        assert!(html.contains(r#""label":"Alpha""#));
        assert!(html.contains(r#""from":"index.html""#));
        assert!(html.contains(r#""to":"a.html""#));
        assert!(html.contains("new vis.Network"));
    }

    #[test]
    fn head_patch_injects_styles_and_stylesheet() {
        let html = patch_head("<html><head></head><body></body></html>");
        assert!(html.contains("overflow: hidden"));
        assert!(html.contains("border: none !important"));
        assert!(html.contains(r#"<link rel="stylesheet" href="static/stylesheet.css">"#));
        // Still exactly one head close.
        assert_eq!(html.matches("</head>").count(), 1);
        // The stylesheet link lands after the style override block.
        let css_at = html.find("overflow: hidden").expect("css");
        let link_at = html.find("stylesheet.css").expect("link");
        assert!(css_at < link_at);
    }

    #[test]
    fn embedded_json_cannot_close_the_script_element() {
        assert_eq!(
            escape_script(r#"{"label":"</script><script>"}"#),
            r#"{"label":"<\/script><script>"}"#
        );
    }

    #[test]
    fn write_artifact_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("static/garden_map.html");
        write_artifact(&sample_graph(), &output).expect("write");

        let written = fs::read_to_string(&output).expect("read");
        assert!(written.contains("stylesheet.css"));
        assert!(written.contains("vis-network"));
    }
}
