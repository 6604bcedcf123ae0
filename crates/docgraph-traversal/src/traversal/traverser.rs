//! The traverser façade.

use tracing::debug;

use crate::document::Document;
use crate::error::{Error, Result};

use super::config::TraverserConfig;
use super::options::Strategy;
use super::strategy::{dijkstra_targets, end_vertex, new_strategy};
use super::types::TraversalResult;

/// Runs traversals with a fixed configuration.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use docgraph_traversal::datasource::{CollectionDatasource, DocumentStore, InMemoryStore};
/// use docgraph_traversal::traversal::{TraversalResult, Traverser, TraverserConfig};
/// use serde_json::json;
///
/// let mut store = InMemoryStore::new();
/// for key in ["a", "b", "c"] {
///     store.insert_vertex("v", key, json!({})).unwrap();
/// }
/// store.insert_edge("e", "ab", "v/a", "v/b", json!({})).unwrap();
/// store.insert_edge("e", "bc", "v/b", "v/c", json!({})).unwrap();
///
/// let store = Arc::new(store);
/// let datasource = CollectionDatasource::new(store.clone(), store.edge_collection("e"));
/// let config = TraverserConfig::builder(Arc::new(datasource)).build().unwrap();
///
/// let mut result = TraversalResult::tracking();
/// let start = store.document("v/a").unwrap();
/// Traverser::new(config).traverse(&mut result, &start, None).unwrap();
///
/// assert_eq!(result.visited_ids(), vec!["v/a", "v/b", "v/c"]);
/// ```
#[derive(Debug, Clone)]
pub struct Traverser {
    config: TraverserConfig,
}

impl Traverser {
    /// Creates a traverser.
    #[must_use]
    pub fn new(config: TraverserConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TraverserConfig {
        &self.config
    }

    /// Traverses from `start`, reporting visits into `result`.
    ///
    /// `end` is required by the shortest-path strategies and ignored by the
    /// others. A traversal stopped through the abort signal returns `Ok(())`
    /// with whatever was visited so far.
    pub fn traverse(
        &self,
        result: &mut TraversalResult,
        start: &Document,
        end: Option<&Document>,
    ) -> Result<()> {
        if !start.is_object() {
            return Err(Error::BadParameter(
                "invalid startVertex specified for traversal".to_string(),
            ));
        }

        let strategy = new_strategy(self.config.strategy);
        if strategy.requires_end_vertex() {
            if self.config.strategy == Strategy::DijkstraMulti {
                dijkstra_targets(&self.config, end)?;
            } else {
                end_vertex(end)?;
            }
        }

        debug!(
            strategy = %self.config.strategy,
            order = %self.config.order,
            item_order = %self.config.item_order,
            "starting traversal"
        );

        match strategy.run(&self.config, result, start, end) {
            Err(err) if err.is_abort() => {
                debug!("traversal aborted");
                Ok(())
            }
            outcome => outcome,
        }
    }
}
