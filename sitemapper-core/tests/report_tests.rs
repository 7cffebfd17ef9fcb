// Tests for report generation functionality

use sitemapper_core::{CrawlError, CrawlSummary};
use sitemapper_core::report::{
    ReportData, ReportFormat, SitemapEdge, SitemapNode, generate_dot_report,
    generate_json_report, generate_text_report, render_report, save_report,
};
use std::fs;
use tempfile::TempDir;

fn create_test_summary() -> CrawlSummary {
    CrawlSummary {
        fetch_attempts: 3,
        pages_fetched: 2,
        failed_fetches: 1,
        probes: 1,
        nodes: 3,
        edges: 2,
        blacklisted: 1,
        frontier_remaining: 0,
        limit_reached: false,
    }
}

fn create_test_report() -> ReportData {
    ReportData {
        seed: "http://test.com/".to_string(),
        domain: "test.com".to_string(),
        elapsed_ms: 1500,
        summary: create_test_summary(),
        nodes: vec![
            SitemapNode {
                path: "/".to_string(),
                outbound: 2,
                inbound: 0,
            },
            SitemapNode {
                path: "/about".to_string(),
                outbound: 0,
                inbound: 1,
            },
            SitemapNode {
                path: "/logo.png".to_string(),
                outbound: 0,
                inbound: 1,
            },
        ],
        edges: vec![
            SitemapEdge {
                source: "/".to_string(),
                target: "/logo.png".to_string(),
            },
            SitemapEdge {
                source: "/".to_string(),
                target: "/about".to_string(),
            },
        ],
        blacklisted: vec!["http://test.com/missing".to_string()],
    }
}

fn create_empty_report() -> ReportData {
    ReportData {
        seed: "http://test.com/".to_string(),
        domain: "test.com".to_string(),
        elapsed_ms: 0,
        summary: CrawlSummary {
            fetch_attempts: 1,
            pages_fetched: 0,
            failed_fetches: 1,
            probes: 0,
            nodes: 0,
            edges: 0,
            blacklisted: 1,
            frontier_remaining: 0,
            limit_reached: false,
        },
        nodes: vec![],
        edges: vec![],
        blacklisted: vec!["http://test.com/".to_string()],
    }
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("dot"), Some(ReportFormat::Dot));
    assert_eq!(ReportFormat::from_str("gv"), Some(ReportFormat::Dot));
    assert_eq!(ReportFormat::from_str("json"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("txt"), Some(ReportFormat::Text));
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert_eq!(ReportFormat::from_str("DOT"), Some(ReportFormat::Dot));
    assert_eq!(ReportFormat::from_str("Json"), Some(ReportFormat::Json));
}

#[test]
fn test_report_format_from_str_invalid() {
    assert!(ReportFormat::from_str("pdf").is_none());
    assert!(ReportFormat::from_str("").is_none());
}

#[test]
fn test_report_format_extension() {
    assert_eq!(ReportFormat::Dot.extension(), "dot");
    assert_eq!(ReportFormat::Json.extension(), "json");
    assert_eq!(ReportFormat::Text.extension(), "txt");
}

// ============================================================================
// DOT Report Tests
// ============================================================================

#[test]
fn test_dot_report_lists_nodes_and_edges() {
    let dot = generate_dot_report(&create_test_report());

    assert!(dot.starts_with("digraph sitemap {\n"));
    assert!(dot.ends_with("}\n"));
    assert!(dot.contains("label=\"Crawling results for http://test.com/\""));
    // Nodes are numbered in the order the edges introduce them
    assert!(dot.contains("    0 [ label = \"/\" ]\n"));
    assert!(dot.contains("    1 [ label = \"/logo.png\" ]\n"));
    assert!(dot.contains("    2 [ label = \"/about\" ]\n"));
    assert!(dot.contains("    0 -> 1 [ ]\n"));
    assert!(dot.contains("    0 -> 2 [ ]\n"));
    assert_eq!(dot.matches("->").count(), 2);
}

#[test]
fn test_dot_report_escapes_quotes() {
    let mut data = create_test_report();
    data.edges.push(SitemapEdge {
        source: "/about".to_string(),
        target: "/say\"hi\"".to_string(),
    });

    let dot = generate_dot_report(&data);
    assert!(dot.contains("label = \"/say\\\"hi\\\"\""));
    assert!(dot.contains("    2 -> 3 [ ]\n"));
}

#[test]
fn test_dot_report_empty_graph() {
    let dot = generate_dot_report(&create_empty_report());
    assert!(dot.contains("digraph sitemap"));
    assert!(!dot.contains("->"));
    assert!(!dot.contains("[ label ="));
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_summary() {
    let report = generate_text_report(&create_test_report());

    assert!(report.contains("Crawling results for http://test.com/"));
    assert!(report.contains("Fetch attempts: 3"));
    assert!(report.contains("Pages fetched: 2"));
    assert!(report.contains("Nodes: 3"));
    assert!(report.contains("Edges: 2"));
    assert!(report.contains("Took 1.500 seconds"));
    assert!(!report.contains("Visit limit reached"));
}

#[test]
fn test_text_report_adjacency_listing() {
    let report = generate_text_report(&create_test_report());

    assert!(report.contains("  /\n    ├── /logo.png\n    └── /about\n"));
    assert!(report.contains("## Blacklisted\n  ✗ http://test.com/missing\n"));
}

#[test]
fn test_text_report_limit_reached() {
    let mut data = create_test_report();
    data.summary.limit_reached = true;
    data.summary.frontier_remaining = 7;

    let report = generate_text_report(&data);
    assert!(report.contains("Visit limit reached with 7 URLs still queued"));
}

#[test]
fn test_text_report_empty_sitemap() {
    let report = generate_text_report(&create_empty_report());
    assert!(report.contains("## Sitemap\n  (empty)\n"));
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let json = generate_json_report(&create_test_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let report = &value["report"];

    assert_eq!(report["metadata"]["generator"], "Sitemapper");
    assert_eq!(report["metadata"]["format"], "json");
    assert!(report["metadata"]["generated_at"].is_string());
    assert_eq!(report["crawl"]["seed"], "http://test.com/");
    assert_eq!(report["crawl"]["domain"], "test.com");
    assert_eq!(report["summary"]["fetch_attempts"], 3);
    assert_eq!(report["sitemap"]["total_nodes"], 3);
    assert_eq!(report["sitemap"]["total_edges"], 2);
    assert_eq!(report["sitemap"]["edges"][0]["source"], "/");
    assert_eq!(report["sitemap"]["edges"][0]["target"], "/logo.png");
    assert_eq!(report["blacklisted"][0], "http://test.com/missing");
}

#[test]
fn test_report_data_serde_round_trip() {
    let data = create_test_report();
    let json = serde_json::to_string(&data).unwrap();
    let back: ReportData = serde_json::from_str(&json).unwrap();

    assert_eq!(back.nodes, data.nodes);
    assert_eq!(back.edges, data.edges);
    assert_eq!(back.summary, data.summary);
}

// ============================================================================
// Rendering and Saving
// ============================================================================

#[test]
fn test_render_report_dispatches_on_format() {
    let data = create_test_report();

    assert!(render_report(&data, ReportFormat::Dot).unwrap().starts_with("digraph"));
    assert!(render_report(&data, ReportFormat::Json).unwrap().starts_with('{'));
    assert!(render_report(&data, ReportFormat::Text).unwrap().contains("# Summary:"));
}

#[test]
fn test_save_report_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sitemap.dot");
    let content = generate_dot_report(&create_test_report());

    save_report(&content, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_save_report_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no/such/dir/sitemap.dot");

    let err = save_report("digraph {}", &path).unwrap_err();
    assert!(matches!(err, CrawlError::IoError(_)));
}
