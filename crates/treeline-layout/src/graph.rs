//! Minimal string-keyed rank graph used by the hierarchical strategy.
//!
//! Insertion order is preserved so layout output is deterministic for
//! identical input.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankNode {
    pub width: f64,
    pub height: f64,
    pub rank: Option<i32>,
    /// Top-left anchored working coordinates, assigned late in the pipeline.
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Default)]
pub struct RankGraph {
    nodes: IndexMap<String, RankNode>,
    edges: Vec<(String, String)>,
    out: FxHashMap<String, Vec<String>>,
    r#in: FxHashMap<String, Vec<String>>,
}

impl RankGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: RankNode) {
        self.nodes.insert(id.into(), label);
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&RankNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut RankNode> {
        self.nodes.get_mut(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Both endpoints must already be nodes; the strategy validates before
    /// inserting.
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) {
        let v = v.into();
        let w = w.into();
        self.out.entry(v.clone()).or_default().push(w.clone());
        self.r#in.entry(w.clone()).or_default().push(v.clone());
        self.edges.push((v, w));
    }

    pub fn successors(&self, v: &str) -> &[String] {
        self.out.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn predecessors(&self, v: &str) -> &[String] {
        self.r#in.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }
}
