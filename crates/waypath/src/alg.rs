//! Shortest-path algorithms over [`Graph`](crate::Graph).

pub mod dijkstra;
pub(crate) mod frontier;

pub use dijkstra::{ShortestPaths, dijkstra, shortest_path, shortest_path_length};
