//! Weighted undirected graph store.
//!
//! Nodes are keyed by string id and must be inserted explicitly before any edge can reference
//! them. The graph is simple: at most one edge per unordered pair, no self-loops, and every
//! weight is finite and non-negative.
//!
//! Node and edge storage is index-based (`Vec` entries plus hash indices), so the path finder
//! can work on dense `usize` indices while callers speak in ids.

mod edge_key;
mod entries;

use crate::error::{Error, Result};
use edge_key::{EdgeKey, EdgeKeyView};
use entries::{EdgeEntry, NodeEntry};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeEntry>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a node list and `(a, b, weight)` triples.
    ///
    /// Nodes are inserted first, then edges in input order. The first invalid edge aborts
    /// construction and its error is returned.
    pub fn from_parts<S, A, B>(
        nodes: impl IntoIterator<Item = S>,
        edges: impl IntoIterator<Item = (A, B, f64)>,
    ) -> Result<Self>
    where
        S: Into<String>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut g = Self::new();
        for id in nodes {
            g.add_node(id);
        }
        for (a, b, weight) in edges {
            g.add_edge(a.as_ref(), b.as_ref(), weight)?;
        }
        Ok(g)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Inserts `id`. Re-adding an existing node is a no-op.
    pub fn add_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(id.as_str()) {
            return self;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            incident: Vec::new(),
        });
        self.node_index.insert(id, idx);
        self
    }

    /// Inserts the undirected edge `a -- b`, or replaces its weight if the pair is already
    /// connected.
    ///
    /// All checks run before anything is written, so a failed call leaves the graph untouched.
    /// The checks run in a fixed order: self-loop, weight, then endpoint existence (`a` first).
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) -> Result<()> {
        if a == b {
            return Err(Error::SelfLoop { id: a.to_string() });
        }
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(Error::InvalidWeight { weight });
        }
        let a_ix = self.node_ix(a).ok_or_else(|| Error::unknown_node(a))?;
        let b_ix = self.node_ix(b).ok_or_else(|| Error::unknown_node(b))?;
        // Fold -0.0 into 0.0.
        let weight = weight + 0.0;

        let view = EdgeKeyView::new(a, b);
        if let Some(&edge_ix) = self.edge_index.get(&view) {
            tracing::trace!(a, b, weight, "edge weight replaced");
            self.edges[edge_ix].weight = weight;
            return Ok(());
        }

        let (v_ix, w_ix) = if a <= b { (a_ix, b_ix) } else { (b_ix, a_ix) };
        let key = view.to_key();
        let edge_ix = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            weight,
        });
        self.edge_index.insert(key, edge_ix);
        self.nodes[a_ix].incident.push(edge_ix);
        self.nodes[b_ix].incident.push(edge_ix);
        Ok(())
    }

    /// Adjacent nodes of `id` with the connecting edge weights, in edge insertion order.
    pub fn neighbors(&self, id: &str) -> Result<Vec<(&str, f64)>> {
        let ix = self.node_ix(id).ok_or_else(|| Error::unknown_node(id))?;
        Ok(self
            .incident(ix)
            .map(|(other, weight)| (self.nodes[other].id.as_str(), weight))
            .collect())
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edge_index.contains_key(&EdgeKeyView::new(a, b))
    }

    /// Weight of the edge between `a` and `b`, in either order.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        self.edge_index
            .get(&EdgeKeyView::new(a, b))
            .map(|&ix| self.edges[ix].weight)
    }

    /// Removes every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.node_index.clear();
        self.edges.clear();
        self.edge_index.clear();
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Edges as `(a, b, weight)` in first-insertion order, endpoints in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.edges
            .iter()
            .map(|e| (e.key.v.as_str(), e.key.w.as_str(), e.weight))
    }

    pub(crate) fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub(crate) fn node_id(&self, ix: usize) -> &str {
        &self.nodes[ix].id
    }

    /// `(neighbor index, weight)` pairs for the node at `ix`.
    pub(crate) fn incident(&self, ix: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.nodes[ix].incident.iter().map(move |&edge_ix| {
            let e = &self.edges[edge_ix];
            (e.other(ix), e.weight)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_lookup_is_order_insensitive() {
        let mut g = Graph::new();
        g.add_node("b").add_node("a");
        g.add_edge("b", "a", 3.0).unwrap();

        assert!(g.has_edge("a", "b"));
        assert!(g.has_edge("b", "a"));
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![("a", "b", 3.0)]);
    }

    #[test]
    fn negative_zero_weight_is_stored_as_zero() {
        let mut g = Graph::new();
        g.add_node("a").add_node("b");
        g.add_edge("a", "b", -0.0).unwrap();

        let w = g.edge_weight("a", "b").unwrap();
        assert!(w.is_sign_positive());
    }

    #[test]
    fn incident_reports_the_far_endpoint() {
        let mut g = Graph::new();
        g.add_node("a").add_node("b").add_node("c");
        g.add_edge("a", "b", 1.0).unwrap();
        g.add_edge("c", "a", 2.0).unwrap();

        let a = g.node_ix("a").unwrap();
        let got: Vec<(&str, f64)> = g.incident(a).map(|(ix, w)| (g.node_id(ix), w)).collect();
        assert_eq!(got, vec![("b", 1.0), ("c", 2.0)]);
    }
}
