//! The same nine-vertex graph served by each datasource adapter.
//!
//! ```text
//! A -> B -> C -> D -> E
//! |    |         ^ \-> F
//! |    |-> G -> H
//! |    \-> I ---^
//! \------------------> D
//! ```
//!
//! Edge keys are the concatenated vertex keys and the built-in expanders
//! sort edges by `_key`, so every adapter yields the same sequences.

use std::sync::Arc;

use serde_json::json;

use docgraph_traversal::datasource::{
    BlueprintDatasource, CollectionDatasource, Datasource, DocumentStore, GeneralGraphDatasource,
    InMemoryStore,
};
use docgraph_traversal::traversal::{
    inbound_expander, outbound_expander, Connection, ExpanderKind, TraversalPath,
    TraverserConfig, UniquenessScope,
};
use docgraph_traversal::{Document, Result};

use crate::helpers;

const EDGES: [(&str, &str); 10] = [
    ("A", "B"),
    ("B", "C"),
    ("C", "D"),
    ("A", "D"),
    ("D", "E"),
    ("D", "F"),
    ("B", "G"),
    ("B", "I"),
    ("G", "H"),
    ("I", "H"),
];

/// All vertices in `v`, all edges in `e`.
fn single_collection() -> Arc<InMemoryStore> {
    let mut store = InMemoryStore::new();
    for key in ["A", "B", "C", "D", "E", "F", "G", "H", "I"] {
        store.insert_vertex("v", key, json!({})).expect("insert vertex");
    }
    for (from, to) in EDGES {
        store
            .insert_edge(
                "e",
                &format!("{from}{to}"),
                &format!("v/{from}"),
                &format!("v/{to}"),
                json!({}),
            )
            .expect("insert edge");
    }
    Arc::new(store)
}

/// Vertices spread over `v1`..`v3`, edges over `dir` and `undir`.
fn named_graph() -> Arc<InMemoryStore> {
    let collection_of = |key: &str| match key {
        "A" => "v1",
        "B" | "D" | "H" => "v2",
        _ => "v3",
    };
    let mut store = InMemoryStore::new();
    for key in ["A", "B", "C", "D", "E", "F", "G", "H", "I"] {
        store
            .insert_vertex(collection_of(key), key, json!({}))
            .expect("insert vertex");
    }
    for (from, to) in EDGES {
        let collection = if from == "A" { "dir" } else { "undir" };
        store
            .insert_edge(
                collection,
                &format!("{from}{to}"),
                &format!("{}/{from}", collection_of(from)),
                &format!("{}/{to}", collection_of(to)),
                json!({}),
            )
            .expect("insert edge");
    }
    Arc::new(store)
}

fn single_datasource(store: &Arc<InMemoryStore>) -> Arc<dyn Datasource> {
    Arc::new(CollectionDatasource::new(store.clone(), store.edge_collection("e")))
}

fn graph_datasource(store: &Arc<InMemoryStore>) -> Arc<dyn Datasource> {
    Arc::new(GeneralGraphDatasource::new(
        store.clone(),
        vec![store.edge_collection("dir"), store.edge_collection("undir")],
    ))
}

fn blueprint_datasource(store: &Arc<InMemoryStore>) -> Arc<dyn Datasource> {
    Arc::new(BlueprintDatasource::new(store.clone()))
}

fn run(
    datasource: Arc<dyn Datasource>,
    start: &Document,
    kind: ExpanderKind,
    vertices: UniquenessScope,
    edges: UniquenessScope,
) -> Vec<String> {
    let config = TraverserConfig::builder(datasource)
        .expander_kind(kind)
        .uniqueness(vertices, edges)
        .sort(helpers::by_key)
        .build()
        .expect("valid config");
    let result = helpers::traverse(config, start, None).expect("traversal succeeds");
    helpers::visited_keys(&result)
}

/// Runs the shared expectations against one adapter.
fn check_adapter(datasource: &Arc<dyn Datasource>, a: &Document, f: &Document) {
    use UniquenessScope::{Global, None as Unrestricted, Path};

    let full = vec!["A", "B", "C", "D", "E", "F", "G", "H", "I", "H", "D", "E", "F"];
    assert_eq!(
        run(datasource.clone(), a, ExpanderKind::Outbound, Unrestricted, Unrestricted),
        full
    );
    assert_eq!(
        run(datasource.clone(), f, ExpanderKind::Inbound, Unrestricted, Unrestricted),
        vec!["F", "D", "A", "C", "B", "A"]
    );
    assert_eq!(
        run(datasource.clone(), a, ExpanderKind::Outbound, Global, Unrestricted),
        vec!["A", "B", "C", "D", "E", "F", "G", "H", "I"]
    );
    assert_eq!(
        run(datasource.clone(), a, ExpanderKind::Outbound, Path, Unrestricted),
        full
    );
    assert_eq!(
        run(datasource.clone(), a, ExpanderKind::Outbound, Unrestricted, Global),
        vec!["A", "B", "C", "D", "E", "F", "G", "H", "I", "H", "D"]
    );
}

// ── Adapters ───────────────────────────────────────────────────────

#[test]
fn test_collection_datasource_scenarios() {
    let store = single_collection();
    let a = store.document("v/A").expect("A");
    let f = store.document("v/F").expect("F");
    check_adapter(&single_datasource(&store), &a, &f);
}

#[test]
fn test_general_graph_datasource_scenarios() {
    let store = named_graph();
    let a = store.document("v1/A").expect("A");
    let f = store.document("v3/F").expect("F");
    check_adapter(&graph_datasource(&store), &a, &f);
}

#[test]
fn test_blueprint_datasource_scenarios() {
    let store = single_collection();
    let a = store.document("v/A").expect("A");
    let f = store.document("v/F").expect("F");
    check_adapter(&blueprint_datasource(&store), &a, &f);
}

// ── Expanders over a named graph ───────────────────────────────────

type Expander = fn(&TraverserConfig, &Document, &TraversalPath) -> Result<Vec<Connection>>;

fn neighbour_keys(
    expander: Expander,
    config: &TraverserConfig,
    vertex: &Document,
) -> Vec<String> {
    expander(config, vertex, &TraversalPath::new())
        .expect("expansion succeeds")
        .into_iter()
        .filter_map(|connection| connection.vertex["_key"].as_str().map(str::to_string))
        .collect()
}

#[test]
fn test_named_graph_expanders() {
    let store = named_graph();
    let config = TraverserConfig::builder(graph_datasource(&store))
        .sort(helpers::by_key)
        .build()
        .expect("valid config");
    let vertex = |handle: &str| store.document(handle).expect("vertex exists");

    assert_eq!(neighbour_keys(outbound_expander, &config, &vertex("v1/A")), vec!["B", "D"]);
    assert_eq!(neighbour_keys(outbound_expander, &config, &vertex("v2/D")), vec!["E", "F"]);
    assert!(neighbour_keys(outbound_expander, &config, &vertex("v2/H")).is_empty());

    assert_eq!(neighbour_keys(inbound_expander, &config, &vertex("v2/D")), vec!["A", "C"]);
    assert_eq!(neighbour_keys(inbound_expander, &config, &vertex("v2/H")), vec!["G", "I"]);
    assert!(neighbour_keys(inbound_expander, &config, &vertex("v1/A")).is_empty());
}
