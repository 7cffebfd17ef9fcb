// Report generation from a finished crawl

use crate::canonical::NormalizedUrl;
use crate::crawl::CrawlOutcome;
use crate::engine::{CrawlState, CrawlSummary};
use crate::error::Result;
use crate::graph::SitemapGraph;
use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Dot,
    Json,
    Text,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dot" | "gv" | "graphviz" => Some(ReportFormat::Dot),
            "json" => Some(ReportFormat::Json),
            "text" | "txt" => Some(ReportFormat::Text),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Dot => "dot",
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub seed: String,
    pub domain: String,
    pub elapsed_ms: u64,
    pub summary: CrawlSummary,
    pub nodes: Vec<SitemapNode>,
    pub edges: Vec<SitemapEdge>,
    pub blacklisted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapNode {
    pub path: String,
    pub outbound: usize,
    pub inbound: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapEdge {
    pub source: String,
    pub target: String,
}

impl ReportData {
    pub fn from_state(
        seed: &NormalizedUrl,
        domain: &str,
        state: &CrawlState,
        summary: CrawlSummary,
        elapsed: Duration,
    ) -> Self {
        let graph = state.graph();

        let nodes = graph
            .nodes()
            .map(|path| SitemapNode {
                path: path.to_string(),
                outbound: graph.successors(path).len(),
                inbound: graph.predecessors(path).len(),
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .map(|(source, target)| SitemapEdge {
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect();

        let blacklisted = state
            .blacklist()
            .urls()
            .into_iter()
            .map(|u| u.to_string())
            .collect();

        Self {
            seed: seed.to_string(),
            domain: domain.to_string(),
            elapsed_ms: elapsed.as_millis() as u64,
            summary,
            nodes,
            edges,
            blacklisted,
        }
    }

    /// Destinations of `path`, in edge creation order.
    fn targets_of(&self, path: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.source == path)
            .map(|e| e.target.as_str())
            .collect()
    }
}

pub fn gather_report_data(outcome: &CrawlOutcome) -> ReportData {
    ReportData::from_state(
        &outcome.seed,
        &outcome.domain,
        &outcome.state,
        outcome.summary.clone(),
        outcome.elapsed,
    )
}

pub fn render_report(data: &ReportData, format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Dot => generate_dot_report(data),
        ReportFormat::Json => generate_json_report(data)?,
        ReportFormat::Text => generate_text_report(data),
    })
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str(&format!("# Crawling results for {}\n\n", data.seed));
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Domain: {}\n", data.domain));
    report.push_str(&format!("  Fetch attempts: {}\n", data.summary.fetch_attempts));
    report.push_str(&format!("  Pages fetched: {}\n", data.summary.pages_fetched));
    report.push_str(&format!("  Assets probed: {}\n", data.summary.probes));
    report.push_str(&format!("  Nodes: {}\n", data.summary.nodes));
    report.push_str(&format!("  Edges: {}\n", data.summary.edges));
    report.push_str(&format!("  Blacklisted: {}\n", data.summary.blacklisted));
    if data.summary.limit_reached {
        report.push_str(&format!(
            "  Visit limit reached with {} URLs still queued\n",
            data.summary.frontier_remaining
        ));
    }
    report.push_str(&format!(
        "  Took {:.3} seconds\n",
        data.elapsed_ms as f64 / 1000.0
    ));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str("## Sitemap\n");
    if data.nodes.is_empty() {
        report.push_str("  (empty)\n");
    }
    for node in &data.nodes {
        report.push_str(&format!("  {}\n", node.path));
        let targets = data.targets_of(&node.path);
        for (i, target) in targets.iter().enumerate() {
            let prefix = if i == targets.len() - 1 {
                "└──"
            } else {
                "├──"
            };
            report.push_str(&format!("    {} {}\n", prefix, target));
        }
    }

    if !data.blacklisted.is_empty() {
        report.push_str("\n## Blacklisted\n");
        for url in &data.blacklisted {
            report.push_str(&format!("  ✗ {}\n", url));
        }
    }

    report
}

pub fn generate_json_report(data: &ReportData) -> std::result::Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Sitemapper",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "crawl": {
                "seed": data.seed,
                "domain": data.domain,
                "elapsed_ms": data.elapsed_ms,
            },
            "summary": data.summary,
            "sitemap": {
                "total_nodes": data.nodes.len(),
                "total_edges": data.edges.len(),
                "nodes": data.nodes,
                "edges": data.edges,
            },
            "blacklisted": data.blacklisted,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

const DOT_CONFIG: &[Config] = &[Config::EdgeNoLabel, Config::GraphContentOnly];

/// Node and edge statements of a sitemap graph. Nodes are labelled with
/// their path, edges carry no label.
struct SitemapDot<'a>(Dot<'a, &'a DiGraph<String, ()>>);

impl fmt::Display for SitemapDot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.graph_fmt(f, fmt::Display::fmt, |_, _| Ok(()))
    }
}

/// Graphviz source for the sitemap, e.g. for `dot -Tpdf`.
pub fn generate_dot_report(data: &ReportData) -> String {
    let mut graph = SitemapGraph::new();
    for edge in &data.edges {
        graph.add_edge(&edge.source, &edge.target);
    }

    // Normalized URLs never contain a raw quote or backslash
    format!(
        "digraph sitemap {{\n    label=\"Crawling results for {}\";\n    labelloc=t;\n    node [shape=box, fontsize=8];\n    edge [penwidth=0.75];\n{}}}\n",
        data.seed,
        SitemapDot(Dot::with_config(graph.as_petgraph(), DOT_CONFIG))
    )
}

pub fn save_report(content: &str, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
