//! Configurable graph traversal.
//!
//! A [`Traverser`] runs one [`SearchStrategy`] over a [`Datasource`]. The
//! strategy asks the expander for the connections of each vertex, the
//! filter decides whether the vertex is visited and expanded, and the
//! visitor records what was visited into a caller-owned
//! [`TraversalResult`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use docgraph_traversal::datasource::{CollectionDatasource, DocumentStore, InMemoryStore};
//! use docgraph_traversal::traversal::{
//!     FilterDirective, Order, Strategy, TraversalResult, Traverser, TraverserConfig,
//!     UniquenessScope,
//! };
//! use serde_json::json;
//!
//! let mut store = InMemoryStore::new();
//! for key in ["root", "left", "right", "leaf"] {
//!     store.insert_vertex("v", key, json!({})).unwrap();
//! }
//! store.insert_edge("e", "1", "v/root", "v/left", json!({})).unwrap();
//! store.insert_edge("e", "2", "v/root", "v/right", json!({})).unwrap();
//! store.insert_edge("e", "3", "v/left", "v/leaf", json!({})).unwrap();
//! store.insert_edge("e", "4", "v/right", "v/leaf", json!({})).unwrap();
//!
//! let store = Arc::new(store);
//! let datasource = CollectionDatasource::new(store.clone(), store.edge_collection("e"));
//! let config = TraverserConfig::builder(Arc::new(datasource))
//!     .strategy(Strategy::BreadthFirst)
//!     .order(Order::PreOrder)
//!     .uniqueness(UniquenessScope::Global, UniquenessScope::None)
//!     .filter(|_, vertex, _| {
//!         if vertex["_id"] == "v/left" {
//!             Ok(FilterDirective::Exclude)
//!         } else {
//!             Ok(FilterDirective::Continue)
//!         }
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut result = TraversalResult::tracking();
//! let start = store.document("v/root").unwrap();
//! Traverser::new(config).traverse(&mut result, &start, None).unwrap();
//!
//! assert_eq!(result.visited_ids(), vec!["v/root", "v/right", "v/leaf"]);
//! ```
//!
//! [`Datasource`]: crate::datasource::Datasource

mod abort;
mod config;
mod expander;
mod filter;
mod options;
pub mod strategy;
mod traverser;
mod types;
mod uniqueness;
mod visitor;


pub use abort::AbortSignal;
pub use config::{
    DistanceFn, ExpandFilterFn, ExpanderFn, FilterFn, SortFn, TraverserConfig,
    TraverserConfigBuilder, VisitorFn,
};
pub use expander::{
    any_expander, expand_edges_with_labels, expand_in_edges_with_labels,
    expand_out_edges_with_labels, inbound_expander, outbound_expander,
};
pub use filter::{
    combine_filters, include_matching_attributes_filter, max_depth_filter, min_depth_filter,
    parse_filter_result, visit_all_filter, FilterDirective, FilterResult,
};
pub use options::{
    ExpanderKind, ItemOrder, Order, Strategy, TraversalOptions, UniquenessConfig,
    UniquenessScope, ASTAR_SEARCH, BACKWARD, BREADTH_FIRST, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_ITERATIONS, DEPTH_FIRST, DIJKSTRA_SEARCH, DIJKSTRA_SEARCH_MULTI, ENV_PREFIX,
    EXCLUDE, FORWARD, POST_ORDER, PRE_ORDER, PRE_ORDER_EXPANDER, PRUNE, UNIQUE_GLOBAL,
    UNIQUE_NONE, UNIQUE_PATH,
};
pub use strategy::{check_reverse, new_strategy, SearchStrategy};
pub use traverser::Traverser;
pub use types::{Connection, TraversalPath, TraversalResult, VisitedItems};
pub use uniqueness::{check_uniqueness, VisitedSets};
pub use visitor::{counting_visitor, do_nothing_visitor, tracking_visitor};
