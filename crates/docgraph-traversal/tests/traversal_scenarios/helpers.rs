//! Shared graph builders and runners for the scenario tests.

use std::sync::Arc;

use serde_json::json;

use docgraph_traversal::datasource::{
    CollectionDatasource, Datasource, DocumentStore, InMemoryStore,
};
use docgraph_traversal::traversal::{TraversalResult, Traverser, TraverserConfig};
use docgraph_traversal::{Document, Result};

/// Vertex collection used by the single-collection scenarios.
pub const VERTICES: &str = "v";
/// Edge collection used by the single-collection scenarios.
pub const EDGES: &str = "e";

/// Builds a store with `vertices` in [`VERTICES`] and `edges` in [`EDGES`].
///
/// Every vertex carries `{ "name": key }`; edge `i` gets the key `e{i}` and
/// the optional label in `$label`.
pub fn graph(vertices: &[&str], edges: &[(&str, &str, Option<&str>)]) -> Arc<InMemoryStore> {
    let mut store = InMemoryStore::new();
    for key in vertices {
        store
            .insert_vertex(VERTICES, key, json!({ "name": key }))
            .expect("insert vertex");
    }
    for (i, (from, to, label)) in edges.iter().enumerate() {
        let props = match label {
            Some(label) => json!({ "$label": label }),
            None => json!({}),
        };
        store
            .insert_edge(
                EDGES,
                &format!("e{i}"),
                &format!("{VERTICES}/{from}"),
                &format!("{VERTICES}/{to}"),
                props,
            )
            .expect("insert edge");
    }
    Arc::new(store)
}

/// Unlabelled edges for [`graph`].
pub fn plain<'a>(edges: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str, Option<&'a str>)> {
    edges.iter().map(|&(from, to)| (from, to, None)).collect()
}

/// Datasource over the [`EDGES`] collection of `store`.
pub fn datasource(store: &Arc<InMemoryStore>) -> Arc<dyn Datasource> {
    Arc::new(CollectionDatasource::new(
        store.clone(),
        store.edge_collection(EDGES),
    ))
}

/// Fetches a vertex of [`VERTICES`] by key.
pub fn vertex(store: &InMemoryStore, key: &str) -> Document {
    store
        .document(&format!("{VERTICES}/{key}"))
        .expect("vertex exists")
}

/// Runs one traversal with a tracking result.
pub fn traverse(
    config: TraverserConfig,
    start: &Document,
    end: Option<&Document>,
) -> Result<TraversalResult> {
    let mut result = TraversalResult::tracking();
    Traverser::new(config).traverse(&mut result, start, end)?;
    Ok(result)
}

/// Returns the `_key` of every visited vertex, in visitation order.
pub fn visited_keys(result: &TraversalResult) -> Vec<String> {
    result
        .visited
        .as_ref()
        .map(|visited| {
            visited
                .vertices
                .iter()
                .filter_map(|vertex| vertex["_key"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Orders edges by `_key`.
pub fn by_key(left: &Document, right: &Document) -> std::cmp::Ordering {
    left["_key"].as_str().cmp(&right["_key"].as_str())
}
