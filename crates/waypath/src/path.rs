//! Path results and their text rendering.

use std::fmt;

/// A shortest path: node ids from source to target (inclusive) and the summed edge weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    nodes: Vec<String>,
    total_weight: f64,
}

impl ShortestPath {
    pub(crate) fn new(nodes: Vec<String>, total_weight: f64) -> Self {
        debug_assert!(!nodes.is_empty());
        Self {
            nodes,
            total_weight,
        }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<String> {
        self.nodes
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn source(&self) -> &str {
        &self.nodes[0]
    }

    pub fn target(&self) -> &str {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Number of nodes on the path; a trivial `source == target` path has length 1.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: every path holds at least its source. Kept to pair with
    /// [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Consecutive `(from, to)` pairs along the path, e.g. for highlighting it in a drawing.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// `The shortest path from A to D is [A, B, C, D] with a total weight of 4.`
    pub fn describe(&self) -> String {
        format!(
            "The shortest path from {} to {} is [{}] with a total weight of {}.",
            self.source(),
            self.target(),
            self.nodes.join(", "),
            format_weight(self.total_weight)
        )
    }
}

impl fmt::Display for ShortestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nodes.join(" -> "))
    }
}

/// Message for a query whose endpoints exist but are not connected.
pub fn describe_no_path(source: &str, target: &str) -> String {
    format!("No path found between {source} and {target}.")
}

/// Formats a weight the way JavaScript prints numbers: `4`, `2.5`, `0.1`.
pub fn format_weight(weight: f64) -> String {
    if !weight.is_finite() {
        return if weight.is_nan() {
            "NaN".to_string()
        } else if weight > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let mut buf = ryu_js::Buffer::new();
    // Avoid printing `-0`.
    let weight = if weight == 0.0 { 0.0 } else { weight };
    buf.format_finite(weight).to_string()
}

/// Walks predecessor links back from `target` and returns the path in source-to-target order.
///
/// Returns `None` if a link is missing or the walk would exceed `pred.len()` nodes without
/// reaching `source`.
pub(crate) fn reconstruct(
    pred: &[Option<usize>],
    source: usize,
    target: usize,
) -> Option<Vec<usize>> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        if path.len() >= pred.len() {
            return None;
        }
        current = (*pred.get(current)?)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}
