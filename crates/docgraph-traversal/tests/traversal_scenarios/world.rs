//! Continent/country tree: visitation orders, depth limits and filter
//! combinations.
//!
//! ```text
//! World -> Europe     -> DE, FR, GB, IE
//!       -> Asia       -> CN, JP, TW
//!       -> America    -> US, MX
//!       -> Australia  -> AU
//!       -> Africa
//!       -> Antarctica -> AN
//! ```

use std::sync::Arc;

use docgraph_traversal::datasource::InMemoryStore;
use docgraph_traversal::traversal::{
    FilterDirective, ItemOrder, Order, Strategy, TraversalPath, TraverserConfig,
    TraverserConfigBuilder, UniquenessScope,
};
use docgraph_traversal::{Document, Result};

use crate::helpers;

fn world() -> Arc<InMemoryStore> {
    let vertices = [
        "World", "Europe", "Asia", "America", "Australia", "Africa", "Antarctica", "DE", "FR",
        "GB", "IE", "CN", "JP", "TW", "US", "MX", "AU", "AN",
    ];
    let edges = [
        ("World", "Europe"),
        ("World", "Asia"),
        ("World", "America"),
        ("World", "Australia"),
        ("World", "Africa"),
        ("World", "Antarctica"),
        ("Europe", "DE"),
        ("Europe", "FR"),
        ("Europe", "GB"),
        ("Europe", "IE"),
        ("Asia", "CN"),
        ("Asia", "JP"),
        ("Asia", "TW"),
        ("America", "US"),
        ("America", "MX"),
        ("Australia", "AU"),
        ("Antarctica", "AN"),
    ];
    helpers::graph(&vertices, &helpers::plain(&edges))
}

/// Hides Antarctica and IE, stops below Africa.
fn world_filter(
    _config: &TraverserConfig,
    vertex: &Document,
    _path: &TraversalPath,
) -> Result<FilterDirective> {
    match vertex["name"].as_str() {
        Some("Antarctica" | "IE") => Ok(FilterDirective::Exclude),
        Some("Africa") => Ok(FilterDirective::Prune),
        _ => Ok(FilterDirective::Continue),
    }
}

fn run(build: impl FnOnce(TraverserConfigBuilder) -> TraverserConfigBuilder) -> Vec<String> {
    let store = world();
    let config = build(TraverserConfig::builder(helpers::datasource(&store)))
        .build()
        .expect("valid config");
    let result = helpers::traverse(config, &helpers::vertex(&store, "World"), None)
        .expect("traversal succeeds");
    helpers::visited_keys(&result)
}

fn run_ordered(strategy: Strategy, order: Order, item_order: ItemOrder) -> Vec<String> {
    run(|b| {
        b.strategy(strategy)
            .order(order)
            .item_order(item_order)
            .uniqueness(UniquenessScope::None, UniquenessScope::None)
            .filter(world_filter)
    })
}

// ── Depth-first ────────────────────────────────────────────────────

#[test]
fn test_depth_first_pre_order_forward() {
    assert_eq!(
        run_ordered(Strategy::DepthFirst, Order::PreOrder, ItemOrder::Forward),
        vec![
            "World", "Europe", "DE", "FR", "GB", "Asia", "CN", "JP", "TW", "America", "US",
            "MX", "Australia", "AU", "Africa", "AN",
        ]
    );
}

#[test]
fn test_depth_first_pre_order_backward() {
    assert_eq!(
        run_ordered(Strategy::DepthFirst, Order::PreOrder, ItemOrder::Backward),
        vec![
            "World", "AN", "Africa", "Australia", "AU", "America", "MX", "US", "Asia", "TW",
            "JP", "CN", "Europe", "GB", "FR", "DE",
        ]
    );
}

#[test]
fn test_depth_first_post_order_forward() {
    assert_eq!(
        run_ordered(Strategy::DepthFirst, Order::PostOrder, ItemOrder::Forward),
        vec![
            "DE", "FR", "GB", "Europe", "CN", "JP", "TW", "Asia", "US", "MX", "America", "AU",
            "Australia", "Africa", "AN", "World",
        ]
    );
}

#[test]
fn test_depth_first_post_order_backward() {
    assert_eq!(
        run_ordered(Strategy::DepthFirst, Order::PostOrder, ItemOrder::Backward),
        vec![
            "AN", "Africa", "AU", "Australia", "MX", "US", "America", "TW", "JP", "CN", "Asia",
            "GB", "FR", "DE", "Europe", "World",
        ]
    );
}

// ── Breadth-first ──────────────────────────────────────────────────

#[test]
fn test_breadth_first_pre_order_forward() {
    assert_eq!(
        run_ordered(Strategy::BreadthFirst, Order::PreOrder, ItemOrder::Forward),
        vec![
            "World", "Europe", "Asia", "America", "Australia", "Africa", "DE", "FR", "GB", "CN",
            "JP", "TW", "US", "MX", "AU", "AN",
        ]
    );
}

#[test]
fn test_breadth_first_pre_order_backward() {
    assert_eq!(
        run_ordered(Strategy::BreadthFirst, Order::PreOrder, ItemOrder::Backward),
        vec![
            "World", "Africa", "Australia", "America", "Asia", "Europe", "AN", "AU", "MX", "US",
            "TW", "JP", "CN", "GB", "FR", "DE",
        ]
    );
}

#[test]
fn test_breadth_first_post_order_forward() {
    assert_eq!(
        run_ordered(Strategy::BreadthFirst, Order::PostOrder, ItemOrder::Forward),
        vec![
            "DE", "FR", "GB", "CN", "JP", "TW", "US", "MX", "AU", "AN", "Europe", "Asia",
            "America", "Australia", "Africa", "World",
        ]
    );
}

#[test]
fn test_breadth_first_post_order_backward() {
    assert_eq!(
        run_ordered(Strategy::BreadthFirst, Order::PostOrder, ItemOrder::Backward),
        vec![
            "AN", "AU", "MX", "US", "TW", "JP", "CN", "GB", "FR", "DE", "Africa", "Australia",
            "America", "Asia", "Europe", "World",
        ]
    );
}

// ── Depth limits ───────────────────────────────────────────────────

const ALL_DEPTH_FIRST: [&str; 18] = [
    "World", "Europe", "DE", "FR", "GB", "IE", "Asia", "CN", "JP", "TW", "America", "US", "MX",
    "Australia", "AU", "Africa", "Antarctica", "AN",
];

#[test]
fn test_min_depth_zero_visits_everything() {
    assert_eq!(run(|b| b.min_depth(0)), ALL_DEPTH_FIRST.to_vec());
}

#[test]
fn test_min_depth_one_skips_the_root() {
    assert_eq!(run(|b| b.min_depth(1)), ALL_DEPTH_FIRST[1..].to_vec());
}

#[test]
fn test_min_depth_two_visits_leaves_only() {
    assert_eq!(
        run(|b| b.min_depth(2)),
        vec!["DE", "FR", "GB", "IE", "CN", "JP", "TW", "US", "MX", "AU", "AN"]
    );
}

#[test]
fn test_max_depth_zero_visits_the_root_only() {
    assert_eq!(run(|b| b.max_depth(0)), vec!["World"]);
}

#[test]
fn test_max_depth_one_stops_at_continents() {
    assert_eq!(
        run(|b| b.max_depth(1)),
        vec!["World", "Europe", "Asia", "America", "Australia", "Africa", "Antarctica"]
    );
}

#[test]
fn test_unbounded_depth() {
    assert_eq!(run(|b| b.max_depth(None::<usize>)), ALL_DEPTH_FIRST.to_vec());
}

// ── Filter combinations ────────────────────────────────────────────

#[test]
fn test_filters_are_combined() {
    let visited = run(|b| {
        b.filter(|_, vertex, _| match vertex["name"].as_str() {
            Some("Europe" | "AU" | "World") => Ok(FilterDirective::Exclude),
            _ => Ok(FilterDirective::Continue),
        })
        .filter(|_, vertex, _| match vertex["name"].as_str() {
            Some("Asia" | "Europe") => Ok(FilterDirective::Prune),
            _ => Ok(FilterDirective::Continue),
        })
    });
    assert_eq!(
        visited,
        vec!["Asia", "America", "US", "MX", "Australia", "Africa", "Antarctica", "AN"]
    );
}

#[test]
fn test_prune_and_exclude_root_visits_nothing() {
    let visited = run(|b| {
        b.filter(|_, vertex, _| {
            if vertex["name"] == "World" {
                FilterDirective::from_tokens(&["prune", "exclude"])
            } else {
                Ok(FilterDirective::Continue)
            }
        })
    });
    assert!(visited.is_empty());
}

#[test]
fn test_filter_sees_path_to_vertex() {
    let visited = run(|b| {
        b.filter(|_, _, path| {
            let names: Vec<&str> = path
                .vertices
                .iter()
                .filter_map(|v| v["name"].as_str())
                .collect();
            if names.starts_with(&["World", "Asia"]) {
                Ok(FilterDirective::Continue)
            } else {
                Ok(FilterDirective::Exclude)
            }
        })
    });
    assert_eq!(visited, vec!["Asia", "CN", "JP", "TW"]);
}
