//! Road network: weighted shortest paths with Dijkstra and A*.
//!
//! Cities carry grid coordinates so A* can use the straight-line distance
//! as its heuristic. Roads are two-way and traversed with the any expander.

use std::sync::Arc;

use serde_json::json;

use docgraph_traversal::datasource::{CollectionDatasource, DocumentStore, InMemoryStore};
use docgraph_traversal::traversal::{
    ExpanderKind, Order, Strategy, TraverserConfig, TraverserConfigBuilder,
};
use docgraph_traversal::{Document, Error};

use crate::helpers;

/// ```text
/// (0,0) Hamburg --4-- Bremen (1,0)
///          |  \         |
///          5   9        2
///          |     \      |
/// (0,2) Hannover --3-- Kassel (1,2) --6-- Frankfurt (1,5)
/// ```
///
/// No road is shorter than the straight line between its cities.
///
/// `Lisbon` has no roads.
fn roads() -> Arc<InMemoryStore> {
    let cities = [
        ("Hamburg", 0.0, 0.0),
        ("Bremen", 1.0, 0.0),
        ("Hannover", 0.0, 2.0),
        ("Kassel", 1.0, 2.0),
        ("Frankfurt", 1.0, 5.0),
        ("Lisbon", -20.0, 20.0),
    ];
    let roads = [
        ("Hamburg", "Bremen", 4.0),
        ("Hamburg", "Hannover", 5.0),
        ("Hamburg", "Kassel", 9.0),
        ("Bremen", "Kassel", 2.0),
        ("Hannover", "Kassel", 3.0),
        ("Kassel", "Frankfurt", 6.0),
    ];

    let mut store = InMemoryStore::new();
    for (name, x, y) in cities {
        store
            .insert_vertex("cities", name, json!({ "x": x, "y": y }))
            .expect("insert city");
    }
    for (from, to, km) in roads {
        store
            .insert_edge(
                "roads",
                &format!("{from}-{to}"),
                &format!("cities/{from}"),
                &format!("cities/{to}"),
                json!({ "km": km }),
            )
            .expect("insert road");
    }
    Arc::new(store)
}

fn city(store: &InMemoryStore, name: &str) -> Document {
    store.document(&format!("cities/{name}")).expect("city exists")
}

fn straight_line(
    _config: &TraverserConfig,
    from: &Document,
    to: &Document,
    _edge: &Document,
) -> f64 {
    let coordinate = |doc: &Document, axis: &str| doc[axis].as_f64().unwrap_or(0.0);
    let dx = coordinate(from, "x") - coordinate(to, "x");
    let dy = coordinate(from, "y") - coordinate(to, "y");
    dx.hypot(dy)
}

fn route(
    build: impl FnOnce(TraverserConfigBuilder) -> TraverserConfigBuilder,
    from: &str,
    to: &str,
) -> docgraph_traversal::Result<Vec<String>> {
    let store = roads();
    let datasource = Arc::new(CollectionDatasource::new(
        store.clone(),
        store.edge_collection("roads"),
    ));
    let builder = TraverserConfig::builder(datasource)
        .expander_kind(ExpanderKind::Any)
        .weight("km");
    let config = build(builder).build()?;
    let result = helpers::traverse(config, &city(&store, from), Some(&city(&store, to)))?;
    Ok(helpers::visited_keys(&result))
}

// ── Dijkstra ───────────────────────────────────────────────────────

#[test]
fn test_dijkstra_prefers_lighter_detour() {
    let path = route(|b| b.strategy(Strategy::Dijkstra), "Hamburg", "Frankfurt").unwrap();
    assert_eq!(path, vec!["Hamburg", "Bremen", "Kassel", "Frankfurt"]);
}

#[test]
fn test_dijkstra_follows_two_way_roads() {
    let path = route(|b| b.strategy(Strategy::Dijkstra), "Frankfurt", "Hannover").unwrap();
    assert_eq!(path, vec!["Frankfurt", "Kassel", "Hannover"]);
}

#[test]
fn test_dijkstra_post_order_reports_path_backwards() {
    let path = route(
        |b| b.strategy(Strategy::Dijkstra).order(Order::PostOrder),
        "Hamburg",
        "Frankfurt",
    )
    .unwrap();
    assert_eq!(path, vec!["Frankfurt", "Kassel", "Bremen", "Hamburg"]);
}

#[test]
fn test_dijkstra_unreachable_city_visits_nothing() {
    let path = route(|b| b.strategy(Strategy::Dijkstra), "Hamburg", "Lisbon").unwrap();
    assert!(path.is_empty());
}

#[test]
fn test_dijkstra_by_hops_ignores_weights() {
    let store = roads();
    let datasource = Arc::new(CollectionDatasource::new(
        store.clone(),
        store.edge_collection("roads"),
    ));
    let config = TraverserConfig::builder(datasource)
        .strategy(Strategy::Dijkstra)
        .expander_kind(ExpanderKind::Any)
        .build()
        .unwrap();
    let result = helpers::traverse(
        config,
        &city(&store, "Hamburg"),
        Some(&city(&store, "Frankfurt")),
    )
    .unwrap();
    assert_eq!(
        helpers::visited_keys(&result),
        vec!["Hamburg", "Kassel", "Frankfurt"]
    );
}

#[test]
fn test_dijkstra_multi_reaches_every_target() {
    let store = roads();
    let datasource = Arc::new(CollectionDatasource::new(
        store.clone(),
        store.edge_collection("roads"),
    ));
    let config = TraverserConfig::builder(datasource)
        .strategy(Strategy::DijkstraMulti)
        .expander_kind(ExpanderKind::Any)
        .weight("km")
        .build()
        .unwrap();
    let targets = json!(["cities/Frankfurt", "cities/Hannover", "cities/Lisbon"]);
    let result = helpers::traverse(config, &city(&store, "Hamburg"), Some(&targets)).unwrap();

    assert_eq!(helpers::visited_keys(&result), vec!["Hannover", "Frankfurt"]);
    assert_eq!(
        result.visited_paths(),
        vec![
            vec!["cities/Hamburg", "cities/Hannover"],
            vec!["cities/Hamburg", "cities/Bremen", "cities/Kassel", "cities/Frankfurt"],
        ]
    );
}

// ── A* ─────────────────────────────────────────────────────────────

#[test]
fn test_astar_with_straight_line_heuristic() {
    let path = route(
        |b| b.strategy(Strategy::AStar).distance(straight_line),
        "Hamburg",
        "Frankfurt",
    )
    .unwrap();
    assert_eq!(path, vec!["Hamburg", "Bremen", "Kassel", "Frankfurt"]);
}

#[test]
fn test_astar_and_dijkstra_agree() {
    for (from, to) in [("Hannover", "Bremen"), ("Frankfurt", "Hamburg"), ("Bremen", "Hannover")] {
        let dijkstra = route(|b| b.strategy(Strategy::Dijkstra), from, to).unwrap();
        let astar = route(
            |b| b.strategy(Strategy::AStar).distance(straight_line),
            from,
            to,
        )
        .unwrap();
        assert_eq!(dijkstra, astar, "{from} -> {to}");
    }
}

#[test]
fn test_shortest_paths_need_an_end_vertex() {
    let store = roads();
    let datasource = Arc::new(CollectionDatasource::new(
        store.clone(),
        store.edge_collection("roads"),
    ));
    let config = TraverserConfig::builder(datasource)
        .strategy(Strategy::AStar)
        .build()
        .unwrap();
    let err = helpers::traverse(config, &city(&store, "Hamburg"), None).unwrap_err();
    assert!(matches!(err, Error::BadParameter(_)));
}
