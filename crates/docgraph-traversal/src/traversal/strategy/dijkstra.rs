//! Dijkstra shortest paths, to one end vertex or to a set of them.

use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::trace;

use crate::document::{Document, ID_ATTRIBUTE};
use crate::error::{Error, Result};
use crate::traversal::config::TraverserConfig;
use crate::traversal::types::{Connection, TraversalResult};

use super::arena::{NodeArena, SearchNode};
use super::heap::MinHeap;
use super::{attribute_weight, end_vertex, IterationGuard, SearchStrategy};

#[derive(Debug)]
struct DijkstraNode {
    id: String,
    vertex: Document,
    dist: f64,
    parent: Option<usize>,
    parent_edge: Option<Document>,
    visited: bool,
    hide: bool,
}

impl SearchNode for DijkstraNode {
    fn new(id: String, vertex: Document) -> Self {
        Self {
            id,
            vertex,
            dist: f64::INFINITY,
            parent: None,
            parent_edge: None,
            visited: false,
            hide: false,
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

/// Edge weight for relaxation.
///
/// `distance` wins when configured; otherwise the `weight` attribute rule
/// applies; with neither, every edge weighs 1.
fn edge_weight(config: &TraverserConfig, from: &Document, to: &Document, edge: &Document) -> f64 {
    if let Some(distance) = config.distance() {
        return distance(config, from, to, edge);
    }
    attribute_weight(config, edge).unwrap_or(1.0)
}

/// Outcome of settling one popped node.
enum Settle {
    /// The node was already settled or must not be expanded.
    Skip,
    /// Every remaining node is unreachable.
    Exhausted,
    /// The node was settled and its neighbours relaxed.
    Relaxed,
}

/// Shared relaxation loop state.
struct Search<'a> {
    config: &'a TraverserConfig,
    nodes: NodeArena<DijkstraNode>,
    heap: MinHeap,
}

impl<'a> Search<'a> {
    fn new(config: &'a TraverserConfig, start: &Document) -> Result<Self> {
        let mut nodes: NodeArena<DijkstraNode> = NodeArena::new();
        let start = nodes.intern(config, start)?;
        nodes[start].dist = 0.0;
        let mut heap = MinHeap::new();
        heap.push(0.0, start);
        Ok(Self {
            config,
            nodes,
            heap,
        })
    }

    fn settle(&mut self, current: usize) -> Result<Settle> {
        let node = &self.nodes[current];
        if node.visited {
            return Ok(Settle::Skip);
        }
        if node.dist.is_infinite() {
            return Ok(Settle::Exhausted);
        }
        self.nodes[current].visited = true;

        let path = self.nodes.path(current);
        let vertex = self.nodes[current].vertex.clone();
        let filter = self.config.apply_filter(&vertex, &path)?;
        if !filter.visit {
            self.nodes[current].hide = true;
        }
        if !filter.expand {
            return Ok(Settle::Skip);
        }

        let dist = self.nodes[current].dist;
        for Connection {
            edge,
            vertex: neighbour,
        } in self.config.expand(&vertex, &path)?
        {
            let next = self.nodes.intern(self.config, &neighbour)?;
            if self.nodes[next].visited {
                continue;
            }
            let alt = dist + edge_weight(self.config, &vertex, &neighbour, &edge);
            if alt < self.nodes[next].dist {
                let node = &mut self.nodes[next];
                node.dist = alt;
                node.parent = Some(current);
                node.parent_edge = Some(edge);
                self.heap.push(alt, next);
            }
        }
        Ok(Settle::Relaxed)
    }
}

/// Shortest path to a single end vertex.
///
/// Stops as soon as the end vertex is taken off the heap and replays its
/// path through the visitor. An unreachable end vertex visits nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraSearch;

impl SearchStrategy for DijkstraSearch {
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
        let end_id = config.datasource().vertex_id(end_vertex(end)?)?;
        let mut guard = IterationGuard::new(config);
        let mut search = Search::new(config, start)?;

        while let Some(popped) = search.heap.pop() {
            guard.tick()?;
            let current = popped.node;

            if search.nodes[current].id() == end_id {
                trace!(
                    iterations = guard.iterations(),
                    distance = search.nodes[current].dist,
                    "end vertex reached"
                );
                return search.nodes.replay(config, result, current);
            }

            if matches!(search.settle(current)?, Settle::Exhausted) {
                break;
            }
        }

        trace!(
            iterations = guard.iterations(),
            nodes = search.nodes.len(),
            "end vertex not reachable"
        );
        Ok(())
    }
}

/// Shortest paths to every vertex of a target set.
///
/// Each target is visited with its path when it is first taken off the
/// heap. Unreachable targets are skipped silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraMultiSearch;

impl SearchStrategy for DijkstraMultiSearch {
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
        let mut targets = target_ids(config, end)?;
        if targets.is_empty() {
            return Ok(());
        }

        let mut guard = IterationGuard::new(config);
        let mut search = Search::new(config, start)?;

        while let Some(popped) = search.heap.pop() {
            guard.tick()?;
            let current = popped.node;

            if targets.remove(search.nodes[current].id()) {
                let path = search.nodes.path(current);
                config.visit(result, search.nodes[current].vertex(), &path, None)?;
                if targets.is_empty() {
                    trace!(iterations = guard.iterations(), "all targets reached");
                    return Ok(());
                }
            }

            if matches!(search.settle(current)?, Settle::Exhausted) {
                break;
            }
        }

        trace!(
            iterations = guard.iterations(),
            unreachable = targets.len(),
            "search space exhausted"
        );
        Ok(())
    }
}

/// Resolves the end-vertex argument of the multi-target search.
///
/// Accepts an array of vertex documents or id strings, a single vertex
/// document (an object with `_id`), or an object whose keys are target ids.
pub(crate) fn target_ids(
    config: &TraverserConfig,
    end: Option<&Document>,
) -> Result<FxHashSet<String>> {
    let invalid = || Error::BadParameter("invalid endVertex specified for traversal".to_string());
    let datasource = config.datasource();

    match end.ok_or_else(invalid)? {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(id) => Ok(id.clone()),
                Value::Object(_) => datasource.vertex_id(item),
                _ => Err(invalid()),
            })
            .collect(),
        doc @ Value::Object(map) => {
            if map.get(ID_ATTRIBUTE).is_some_and(Value::is_string) {
                Ok(std::iter::once(datasource.vertex_id(doc)?).collect())
            } else {
                Ok(map.keys().cloned().collect())
            }
        }
        _ => Err(invalid()),
    }
}
