//! Edge key types.
//!
//! Edges are undirected, so keys are stored with their endpoints in lexicographic order:
//! `(a, b)` and `(b, a)` address the same edge.

use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Hash)]
pub(in crate::graph) struct EdgeKeyView<'a> {
    pub(in crate::graph) v: &'a str,
    pub(in crate::graph) w: &'a str,
}

impl<'a> EdgeKeyView<'a> {
    pub(in crate::graph) fn new(a: &'a str, b: &'a str) -> Self {
        let (v, w) = if a <= b { (a, b) } else { (b, a) };
        Self { v, w }
    }

    pub(in crate::graph) fn to_key(self) -> EdgeKey {
        EdgeKey {
            v: self.v.to_string(),
            w: self.w.to_string(),
        }
    }
}

impl<'a> hashbrown::Equivalent<EdgeKey> for EdgeKeyView<'a> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w
    }
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeKey {
    pub(in crate::graph) v: String,
    pub(in crate::graph) w: String,
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.w == other.w
    }
}

impl Eq for EdgeKey {}

// Must hash exactly like `EdgeKeyView` so borrowed lookups hit.
impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.as_str().hash(state);
        self.w.as_str().hash(state);
    }
}
