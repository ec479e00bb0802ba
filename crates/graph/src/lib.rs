//! # Lifecycle Graph
//!
//! Directed call graph over UI lifecycle functions.
//!
//! ## Pipeline
//!
//! ```text
//! LifecycleFunction[]
//!     │
//!     ├──> Call Graph (petgraph)
//!     │      ├─ Nodes: lifecycle functions, keyed by name
//!     │      └─ Edges: "pred runs before succ" assertions
//!     │
//!     ├──> Structural queries
//!     │      ├─ Topological order (Kahn)
//!     │      ├─ Shortest path (BFS)
//!     │      ├─ Cycle detection
//!     │      └─ Roots / leaves / counts
//!     │
//!     └──> Exports
//!            ├─ Graphviz DOT for layout tools
//!            └─ Canonical document for round-tripping
//! ```
//!
//! ## Example
//!
//! ```
//! use lifecycle_graph::{CallGraph, LifecycleFunction, Scope};
//!
//! let mut graph = CallGraph::new();
//! graph.add_node(LifecycleFunction {
//!     name: "onCreate".to_string(),
//!     scope: Scope::Page,
//!     description: "page created".to_string(),
//! });
//! graph.add_node(LifecycleFunction {
//!     name: "onShow".to_string(),
//!     scope: Scope::Page,
//!     description: "page shown".to_string(),
//! });
//! graph.add_edge("onCreate", "onShow").unwrap();
//!
//! assert_eq!(graph.topological_sort().unwrap(), vec!["onCreate", "onShow"]);
//! ```

mod error;
mod export;
mod graph;
mod types;

pub use error::{GraphError, Result};
pub use graph::{CallGraph, GraphStats};
pub use types::{base_name, CallOrder, LifecycleDoc, LifecycleFunction, LifecycleSection, Scope};
