//! # Docgraph Traversal
//!
//! In-process graph traversal engine for document databases.
//!
//! Vertices and edges are JSON documents reached through a
//! [`Datasource`](datasource::Datasource). A [`Traverser`](traversal::Traverser)
//! walks them with one of five strategies and reports what it finds
//! through a visitor.
//!
//! ## Features
//!
//! - **Strategies**: depth-first, breadth-first, Dijkstra (one or many
//!   targets) and A*
//! - **Visitation orders**: pre-order, post-order and pre-order with
//!   expander output, each forward or backward
//! - **Uniqueness**: vertex and edge bookkeeping scoped per path or globally
//! - **Pipeline hooks**: custom filters, expanders, visitors, edge sorting
//!   and weights
//! - **Bounds**: depth limits, an iteration cap and cooperative cancellation
//! - **Configuration**: serialisable options loadable from TOML and the
//!   environment
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use docgraph_traversal::datasource::{CollectionDatasource, DocumentStore, InMemoryStore};
//! use docgraph_traversal::traversal::{Strategy, TraversalResult, Traverser, TraverserConfig};
//! use serde_json::json;
//!
//! fn main() -> docgraph_traversal::Result<()> {
//!     let mut store = InMemoryStore::new();
//!     for key in ["A", "B", "C"] {
//!         store.insert_vertex("cities", key, json!({}))?;
//!     }
//!     store.insert_edge("roads", "AB", "cities/A", "cities/B", json!({"km": 5}))?;
//!     store.insert_edge("roads", "AC", "cities/A", "cities/C", json!({"km": 1}))?;
//!     store.insert_edge("roads", "CB", "cities/C", "cities/B", json!({"km": 1}))?;
//!
//!     let store = Arc::new(store);
//!     let datasource = CollectionDatasource::new(store.clone(), store.edge_collection("roads"));
//!     let config = TraverserConfig::builder(Arc::new(datasource))
//!         .strategy(Strategy::Dijkstra)
//!         .weight("km")
//!         .build()?;
//!
//!     let mut result = TraversalResult::tracking();
//!     let start = store.document("cities/A")?;
//!     let end = store.document("cities/B")?;
//!     Traverser::new(config).traverse(&mut result, &start, Some(&end))?;
//!
//!     assert_eq!(result.visited_ids(), vec!["cities/A", "cities/C", "cities/B"]);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::single_match_else,
        clippy::float_cmp
    )
)]

pub mod datasource;
pub mod document;
pub mod error;
pub mod traversal;

pub use document::Document;
pub use error::{Error, Result};
