//! # Lifecycle Parser
//!
//! Validating builder that turns lifecycle analysis JSON into a populated
//! [`lifecycle_graph::CallGraph`].
//!
//! ## Pipeline
//!
//! ```text
//! JSON text / file
//!     │
//!     ├──> serde_json (syntax)
//!     │
//!     ├──> Schema checks (shape, types, enum domains)
//!     │      └─ index-qualified diagnostics: functions[3].scope ...
//!     │
//!     ├──> Instance resolution (Owner.base -> base descriptor)
//!     │
//!     └──> CallGraph (nodes first, then edges)
//! ```
//!
//! Validation fails fast: the first violation aborts the build and no
//! partial graph is ever returned.
//!
//! ## Example
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let graph = lifecycle_parser::parse_file("data/output1.json").await?;
//!
//!     println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//!     println!("{}", graph.to_dot());
//!     Ok(())
//! }
//! ```

mod error;
mod parser;

pub use error::{ParserError, Result};
pub use parser::{check_round_trip, parse_file, parse_str, parse_value};
