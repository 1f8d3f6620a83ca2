//! Single-source shortest paths (Dijkstra) over non-negative weights.
//!
//! The traversal settles nodes in order of `(distance, id)`. Because predecessors are only
//! replaced on a strict improvement, the settle order alone decides which of several
//! equal-weight paths is reported, so results are reproducible for a given graph.

use super::frontier::{Frontier, FrontierEntry};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::path::{self, ShortestPath};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Raw traversal state, indexed like the graph's node storage.
#[derive(Debug, Clone)]
pub(crate) struct Search {
    pub(crate) source: usize,
    pub(crate) dist: Vec<f64>,
    pub(crate) pred: Vec<Option<usize>>,
    pub(crate) settled: Vec<bool>,
    pub(crate) settled_count: usize,
}

/// Runs Dijkstra from `source`. With `stop_at`, the run ends as soon as that node is settled;
/// distances of nodes settled up to that point are the same as for a full run.
pub(crate) fn search(g: &Graph, source: usize, stop_at: Option<usize>) -> Search {
    let n = g.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    // Sums of large finite weights can overflow to `+inf`, so a first discovery always
    // relaxes and reachability is read from `settled`, never from a finite distance.
    let mut reached = vec![false; n];
    let mut settled = vec![false; n];
    let mut settled_count = 0usize;
    let mut peak_frontier = 0usize;

    let mut frontier = Frontier::new();
    dist[source] = 0.0;
    reached[source] = true;
    frontier.push(source, g.node_id(source), 0.0);

    while let Some(FrontierEntry { dist: d, node: u, .. }) = frontier.pop() {
        if settled[u] || d > dist[u] {
            continue;
        }
        settled[u] = true;
        settled_count += 1;

        if stop_at == Some(u) {
            break;
        }

        for (v, weight) in g.incident(u) {
            if settled[v] {
                continue;
            }
            let candidate = d + weight;
            if !reached[v] || candidate < dist[v] {
                tracing::trace!(
                    from = g.node_id(u),
                    to = g.node_id(v),
                    dist = candidate,
                    "relaxed"
                );
                dist[v] = candidate;
                pred[v] = Some(u);
                reached[v] = true;
                frontier.push(v, g.node_id(v), candidate);
            }
        }
        peak_frontier = peak_frontier.max(frontier.len());
    }

    tracing::debug!(
        source = g.node_id(source),
        settled = settled_count,
        nodes = n,
        peak_frontier,
        "dijkstra finished"
    );

    Search {
        source,
        dist,
        pred,
        settled,
        settled_count,
    }
}

fn require(g: &Graph, id: &str) -> Result<usize> {
    g.node_ix(id).ok_or_else(|| Error::unknown_node(id))
}

/// Shortest path from `source` to `target`.
///
/// Returns `Ok(None)` when both nodes exist but are not connected. `source` is checked before
/// `target`, so when both are missing the error names `source`.
pub fn shortest_path(g: &Graph, source: &str, target: &str) -> Result<Option<ShortestPath>> {
    let s = require(g, source)?;
    let t = require(g, target)?;
    tracing::debug!(source, target, "shortest path query");

    let state = search(g, s, Some(t));
    Ok(resolve(g, &state, t))
}

/// Total weight of the shortest path from `source` to `target`, if any.
pub fn shortest_path_length(g: &Graph, source: &str, target: &str) -> Result<Option<f64>> {
    Ok(shortest_path(g, source, target)?.map(|p| p.total_weight()))
}

/// Full shortest-path tree from `source`.
pub fn dijkstra(g: &Graph, source: &str) -> Result<ShortestPaths> {
    let s = require(g, source)?;
    let state = search(g, s, None);
    Ok(ShortestPaths::from_search(g, state))
}

fn resolve(g: &Graph, state: &Search, target: usize) -> Option<ShortestPath> {
    if !state.settled[target] {
        return None;
    }
    let total = state.dist[target];
    let Some(indices) = path::reconstruct(&state.pred, state.source, target) else {
        tracing::warn!(
            source = g.node_id(state.source),
            target = g.node_id(target),
            "predecessor chain does not lead back to the source; reporting no path"
        );
        return None;
    };
    let nodes = indices.iter().map(|&ix| g.node_id(ix).to_string()).collect();
    Some(ShortestPath::new(nodes, total))
}

/// Distances and predecessors from one source to every reachable node.
///
/// Owns a copy of the node ids it needs, so it stays valid after the graph is mutated or
/// dropped.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    state: Search,
}

impl ShortestPaths {
    fn from_search(g: &Graph, state: Search) -> Self {
        let ids: Vec<String> = g.nodes().map(str::to_string).collect();
        let index = ids
            .iter()
            .enumerate()
            .map(|(ix, id)| (id.clone(), ix))
            .collect();
        Self { ids, index, state }
    }

    pub fn source(&self) -> &str {
        &self.ids[self.state.source]
    }

    /// Shortest distance to `id`, or `None` if `id` is unreachable or not in the graph.
    ///
    /// A reachable node whose distance overflowed reports `f64::INFINITY`.
    pub fn distance(&self, id: &str) -> Option<f64> {
        let ix = *self.index.get(id)?;
        self.state.settled[ix].then_some(self.state.dist[ix])
    }

    /// The node preceding `id` on its shortest path. `None` for the source itself.
    pub fn predecessor(&self, id: &str) -> Option<&str> {
        let ix = *self.index.get(id)?;
        self.state.pred[ix].map(|p| self.ids[p].as_str())
    }

    pub fn is_reachable(&self, id: &str) -> bool {
        self.distance(id).is_some()
    }

    /// Reachable nodes and their distances, sorted by distance and then by id.
    pub fn distances(&self) -> Vec<(&str, f64)> {
        let mut out: Vec<(&str, f64)> = self
            .ids
            .iter()
            .enumerate()
            .filter(|&(ix, _)| self.state.settled[ix])
            .map(|(ix, id)| (id.as_str(), self.state.dist[ix]))
            .collect();
        out.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        out
    }

    pub fn reachable_count(&self) -> usize {
        self.state.settled_count
    }

    /// Path from the source to `target`, if reachable.
    pub fn path_to(&self, target: &str) -> Option<ShortestPath> {
        let t = *self.index.get(target)?;
        if !self.state.settled[t] {
            return None;
        }
        let total = self.state.dist[t];
        let indices = path::reconstruct(&self.state.pred, self.state.source, t)?;
        let nodes = indices.iter().map(|&ix| self.ids[ix].clone()).collect();
        Some(ShortestPath::new(nodes, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        Graph::from_parts(
            ["A", "B", "C", "D"],
            [
                ("A", "B", 1.0),
                ("B", "C", 2.0),
                ("A", "C", 4.0),
                ("C", "D", 1.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn early_exit_matches_full_run_for_target() {
        let g = diamond();
        let s = g.node_ix("A").unwrap();
        let full = search(&g, s, None);
        for target in g.nodes() {
            let t = g.node_ix(target).unwrap();
            let early = search(&g, s, Some(t));
            assert_eq!(early.dist[t], full.dist[t], "target {target}");
            assert!(early.settled_count <= full.settled_count);
        }
    }

    #[test]
    fn early_exit_stops_before_settling_everything() {
        let g = diamond();
        let s = g.node_ix("A").unwrap();
        let b = g.node_ix("B").unwrap();
        let state = search(&g, s, Some(b));
        assert_eq!(state.settled_count, 2);
        assert!(!state.settled[g.node_ix("D").unwrap()]);
    }

    #[test]
    fn stale_entries_do_not_resettle_nodes() {
        // C is first discovered at 4 via A, then improved to 3 via B; the 4-entry is stale.
        let g = diamond();
        let s = g.node_ix("A").unwrap();
        let state = search(&g, s, None);
        assert_eq!(state.settled_count, 4);
        assert_eq!(state.dist[g.node_ix("C").unwrap()], 3.0);
    }

    #[test]
    fn broken_predecessor_chain_resolves_to_no_path() {
        let g = diamond();
        let s = g.node_ix("A").unwrap();
        let d = g.node_ix("D").unwrap();
        let c = g.node_ix("C").unwrap();
        let mut state = search(&g, s, None);
        // C <-> D cycle never reaches A.
        state.pred[c] = Some(d);
        state.pred[d] = Some(c);
        assert_eq!(resolve(&g, &state, d), None);
    }
}
