//! # Generator Dependency Graph
//!
//! Generators declare which tables they read. [`dag`] turns those
//! declarations into a petgraph `DiGraph`, [`topo`] computes a stable build
//! order, and [`visualize`] renders the graph as Mermaid or DOT.

pub mod dag;
pub mod topo;
pub mod visualize;

pub use self::dag::DependencyGraph;
pub use self::topo::build_order;
pub use self::visualize::{visualize, GraphFormat};
