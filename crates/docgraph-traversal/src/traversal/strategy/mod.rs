//! Search strategies.
//!
//! Every strategy drives the same pipeline (expander, filter, visitor,
//! uniqueness) over its own frontier structure:
//!
//! - [`DepthFirstSearch`]: explicit frame stack
//! - [`BreadthFirstSearch`]: arena of entries with parent indices
//! - [`DijkstraSearch`] / [`DijkstraMultiSearch`]: min-heap relaxation on distance
//! - [`AStarSearch`]: min-heap relaxation on `g + h`
//!
//! All per-run state lives inside `run`; nothing is kept between calls.

mod arena;
mod astar;
mod breadth_first;
mod depth_first;
mod dijkstra;
mod heap;


use serde_json::Value;

use crate::document::Document;
use crate::error::{Error, Result};

use super::config::TraverserConfig;
use super::options::{ItemOrder, Order, Strategy};
use super::types::TraversalResult;

pub use astar::AStarSearch;
pub use breadth_first::BreadthFirstSearch;
pub use depth_first::DepthFirstSearch;
pub use dijkstra::{DijkstraMultiSearch, DijkstraSearch};

pub(crate) use dijkstra::target_ids as dijkstra_targets;

/// A graph search algorithm.
pub trait SearchStrategy {
    /// Returns true if [`run`](Self::run) needs an end vertex.
    fn requires_end_vertex(&self) -> bool;

    /// Runs the search from `start`, reporting visits through the configured
    /// visitor into `result`.
    fn run(
        &self,
        config: &TraverserConfig,
        result: &mut TraversalResult,
        start: &Document,
        end: Option<&Document>,
    ) -> Result<()>;
}

/// Creates a fresh instance of `strategy`.
#[must_use]
pub fn new_strategy(strategy: Strategy) -> Box<dyn SearchStrategy> {
    match strategy {
        Strategy::DepthFirst => Box::new(DepthFirstSearch),
        Strategy::BreadthFirst => Box::new(BreadthFirstSearch),
        Strategy::Dijkstra => Box::new(DijkstraSearch),
        Strategy::DijkstraMulti => Box::new(DijkstraMultiSearch),
        Strategy::AStar => Box::new(AStarSearch),
    }
}

/// Returns true if expander output must be reversed before it is queued.
///
/// The stack pops the last child first while the breadth-first cursor walks
/// the entries in push order; reversal makes both honour the item order.
#[must_use]
pub fn check_reverse(config: &TraverserConfig) -> bool {
    match config.order {
        Order::PostOrder => config.item_order == ItemOrder::Forward,
        Order::PreOrder | Order::PreOrderExpander => matches!(
            (config.item_order, config.strategy),
            (ItemOrder::Backward, Strategy::BreadthFirst)
                | (ItemOrder::Forward, Strategy::DepthFirst)
        ),
    }
}

/// Counts units of work and polls the abort signal.
#[derive(Debug)]
pub(crate) struct IterationGuard<'a> {
    config: &'a TraverserConfig,
    iterations: u64,
}

impl<'a> IterationGuard<'a> {
    pub(crate) fn new(config: &'a TraverserConfig) -> Self {
        Self {
            config,
            iterations: 0,
        }
    }

    /// Fails with `Error::Aborted` on cancellation and with
    /// `Error::TooManyIterations` once the count exceeds `max_iterations`.
    pub(crate) fn tick(&mut self) -> Result<()> {
        self.config.throw_if_aborted()?;
        let current = self.iterations;
        self.iterations += 1;
        if current > self.config.max_iterations {
            return Err(Error::TooManyIterations(self.config.max_iterations));
        }
        Ok(())
    }

    pub(crate) fn iterations(&self) -> u64 {
        self.iterations
    }
}

/// Weight from the configured edge attribute.
///
/// Returns `None` when no `weight` attribute is configured. A missing or
/// non-numeric attribute falls back to `default_weight`, then to infinity.
pub(crate) fn attribute_weight(config: &TraverserConfig, edge: &Document) -> Option<f64> {
    let attribute = config.weight.as_deref()?;
    Some(
        edge.get(attribute)
            .and_then(Value::as_f64)
            .or(config.default_weight)
            .unwrap_or(f64::INFINITY),
    )
}

pub(crate) fn end_vertex<'a>(end: Option<&'a Document>) -> Result<&'a Document> {
    match end {
        Some(end) if end.is_object() => Ok(end),
        _ => Err(Error::BadParameter(
            "invalid endVertex specified for traversal".to_string(),
        )),
    }
}
