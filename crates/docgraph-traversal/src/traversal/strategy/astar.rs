//! A* shortest path to a single end vertex.

use tracing::trace;

use crate::document::Document;
use crate::error::Result;
use crate::traversal::config::TraverserConfig;
use crate::traversal::types::{Connection, TraversalResult};

use super::arena::{NodeArena, SearchNode};
use super::heap::MinHeap;
use super::{attribute_weight, end_vertex, IterationGuard, SearchStrategy};

#[derive(Debug)]
struct AStarNode {
    id: String,
    vertex: Document,
    g: f64,
    h: f64,
    f: f64,
    parent: Option<usize>,
    parent_edge: Option<Document>,
    /// Discovered at least once.
    visited: bool,
    /// Taken off the heap for good.
    closed: bool,
    hide: bool,
    /// Sequence number of the newest heap entry; older entries are stale.
    queued: u64,
}

impl SearchNode for AStarNode {
    fn new(id: String, vertex: Document) -> Self {
        Self {
            id,
            vertex,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
            parent_edge: None,
            visited: false,
            closed: false,
            hide: false,
            queued: 0,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn vertex(&self) -> &Document {
        &self.vertex
    }

    fn parent(&self) -> Option<(usize, &Document)> {
        self.parent.zip(self.parent_edge.as_ref())
    }

    fn hidden(&self) -> bool {
        self.hide
    }
}

/// Cost of following `edge`: the `weight` attribute rule, else 1.
fn step_cost(config: &TraverserConfig, edge: &Document) -> f64 {
    attribute_weight(config, edge).unwrap_or(1.0)
}

/// Estimated remaining cost from `vertex` to `end`.
///
/// Without a `distance` function every estimate is 1.
fn heuristic(config: &TraverserConfig, vertex: &Document, end: &Document, edge: &Document) -> f64 {
    match config.distance() {
        Some(distance) => distance(config, vertex, end, edge),
        None => 1.0,
    }
}

/// A* search keyed on `f = g + h`.
///
/// A rescored node is pushed again; the outdated heap entry is discarded
/// when it surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarSearch;

impl SearchStrategy for AStarSearch {
    fn requires_end_vertex(&self) -> bool {
        true
    }

    fn run(
        &self,
        config: &TraverserConfig,
        result: &mut TraversalResult,
        start: &Document,
        end: Option<&Document>,
    ) -> Result<()> {
        let end = end_vertex(end)?;
        let end_id = config.datasource().vertex_id(end)?;

        let mut guard = IterationGuard::new(config);
        let mut nodes: NodeArena<AStarNode> = NodeArena::new();
        let mut heap = MinHeap::new();

        let start = nodes.intern(config, start)?;
        nodes[start].visited = true;
        nodes[start].queued = heap.push(0.0, start);

        while let Some(popped) = heap.pop() {
            let current = popped.node;
            if nodes[current].closed || nodes[current].queued != popped.seq {
                continue;
            }
            guard.tick()?;

            if nodes[current].id() == end_id {
                trace!(
                    iterations = guard.iterations(),
                    cost = nodes[current].g,
                    "end vertex reached"
                );
                return nodes.replay(config, result, current);
            }

            nodes[current].closed = true;
            let path = nodes.path(current);
            let vertex = nodes[current].vertex.clone();
            let filter = config.apply_filter(&vertex, &path)?;
            if !filter.visit {
                nodes[current].hide = true;
            }
            if !filter.expand {
                continue;
            }

            let g_current = nodes[current].g;
            for Connection {
                edge,
                vertex: neighbour,
            } in config.expand(&vertex, &path)?
            {
                let next = nodes.intern(config, &neighbour)?;
                if nodes[next].closed {
                    continue;
                }

                let g = g_current + step_cost(config, &edge);
                if !nodes[next].visited || g < nodes[next].g {
                    let h = heuristic(config, &neighbour, end, &edge);
                    let node = &mut nodes[next];
                    node.visited = true;
                    node.parent = Some(current);
                    node.parent_edge = Some(edge);
                    node.g = g;
                    node.h = h;
                    node.f = node.g + node.h;
                    node.queued = heap.push(node.f, next);
                }
            }
        }

        trace!(
            iterations = guard.iterations(),
            nodes = nodes.len(),
            "end vertex not reachable"
        );
        Ok(())
    }
}
