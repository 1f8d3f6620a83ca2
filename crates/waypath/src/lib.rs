#![forbid(unsafe_code)]

//! `waypath` is a small, headless shortest-path engine over weighted undirected graphs.
//!
//! - [`Graph`] stores nodes (string ids) and weighted edges. Nodes must be added explicitly;
//!   edges are simple (one per pair, no self-loops) and weights are finite and non-negative.
//! - [`shortest_path`] runs Dijkstra between two nodes and returns a [`ShortestPath`], or
//!   `Ok(None)` when the nodes are not connected.
//! - [`dijkstra`] returns the full single-source tree as [`ShortestPaths`].
//!
//! Everything is synchronous and single-threaded. Queries borrow the graph immutably and return
//! owned results.
//!
//! ```
//! use waypath::{Graph, shortest_path};
//!
//! let g = Graph::from_parts(
//!     ["A", "B", "C", "D"],
//!     [("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0), ("C", "D", 1.0)],
//! )?;
//! let path = shortest_path(&g, "A", "D")?.expect("A and D are connected");
//! assert_eq!(path.nodes(), ["A", "B", "C", "D"]);
//! assert_eq!(path.total_weight(), 4.0);
//! # Ok::<(), waypath::Error>(())
//! ```

pub mod alg;
pub mod error;
pub mod graph;
pub mod path;

pub use alg::{ShortestPaths, dijkstra, shortest_path, shortest_path_length};
pub use error::{Error, Result};
pub use graph::Graph;
pub use path::ShortestPath;
