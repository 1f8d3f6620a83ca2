//! Internal storage entries for [`Graph`](super::Graph).

use super::edge_key::EdgeKey;

#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry {
    pub(in crate::graph) id: String,
    /// Indices into `Graph::edges` of every edge touching this node.
    pub(in crate::graph) incident: Vec<usize>,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry {
    pub(in crate::graph) key: EdgeKey,
    pub(in crate::graph) v_ix: usize,
    pub(in crate::graph) w_ix: usize,
    pub(in crate::graph) weight: f64,
}

impl EdgeEntry {
    /// The endpoint across from `ix`.
    pub(in crate::graph) fn other(&self, ix: usize) -> usize {
        if self.v_ix == ix { self.w_ix } else { self.v_ix }
    }
}
