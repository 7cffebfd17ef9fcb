// Directed sitemap graph keyed by URL path

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Pages and assets as nodes, "links to" / "references" as edges.
///
/// Nodes only come into existence through [`SitemapGraph::add_edge`].
#[derive(Debug, Default, Clone)]
pub struct SitemapGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl SitemapGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn has_edge(&self, src: &str, dest: &str) -> bool {
        match (self.index.get(src), self.index.get(dest)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Create missing endpoints, then the edge. Returns `false` when the
    /// edge was already there.
    pub fn add_edge(&mut self, src: &str, dest: &str) -> bool {
        let a = self.node_index(src);
        let b = self.node_index(dest);
        if self.graph.contains_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    fn node_index(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path.to_string());
        self.index.insert(path.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node paths in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// `(source, dest)` pairs in creation order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].as_str(),
                    self.graph[e.target()].as_str(),
                )
            })
            .collect()
    }

    /// Destinations reachable from `path` in one hop, sorted.
    pub fn successors(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Outgoing)
    }

    /// Sources pointing at `path`, sorted.
    pub fn predecessors(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Incoming)
    }

    fn neighbors(&self, path: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.index.get(path) else {
            return Vec::new();
        };
        let mut found: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].as_str())
            .collect();
        found.sort_unstable();
        found
    }

    pub fn as_petgraph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }
}
