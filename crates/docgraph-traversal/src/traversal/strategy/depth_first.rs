//! Depth-first search over an explicit frame stack.

use tracing::trace;

use crate::document::Document;
use crate::error::Result;
use crate::traversal::config::TraverserConfig;
use crate::traversal::options::Order;
use crate::traversal::types::{TraversalPath, TraversalResult};
use crate::traversal::uniqueness::{check_uniqueness, VisitedSets};

use super::{check_reverse, IterationGuard, SearchStrategy};

/// Stack frame. A frame is `Pending` until popped for the first time; it is
/// then pushed back as `Entered` below its children and finally popped
/// again once they are done.
#[derive(Debug)]
enum Frame {
    Pending {
        edge: Option<Document>,
        vertex: Document,
    },
    Entered {
        emit_on_exit: bool,
    },
}

/// Depth-first traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSearch;

impl SearchStrategy for DepthFirstSearch {
    fn requires_end_vertex(&self) -> bool {
        false
    }

    fn run(
        &self,
        config: &TraverserConfig,
        result: &mut TraversalResult,
        start: &Document,
        _end: Option<&Document>,
    ) -> Result<()> {
        let mut guard = IterationGuard::new(config);
        let mut visited = VisitedSets::new();
        let mut path = TraversalPath::new();
        let reverse = check_reverse(config);
        let have_uniqueness = config.uniqueness.is_active();

        let mut stack = vec![Frame::Pending {
            edge: None,
            vertex: start.clone(),
        }];

        while let Some(frame) = stack.pop() {
            guard.tick()?;

            match frame {
                Frame::Pending { edge, vertex } => {
                    if have_uniqueness {
                        visited.rebuild_path_scope(config, &path.vertices, &path.edges)?;
                        if !check_uniqueness(config, &mut visited, &vertex, edge.as_ref())? {
                            continue;
                        }
                    }

                    path.push(edge, vertex.clone());
                    let filter = config.apply_filter(&vertex, &path)?;

                    let emit_on_exit = if config.order == Order::PreOrder {
                        if filter.visit {
                            config.visit(result, &vertex, &path, None)?;
                        }
                        false
                    } else {
                        filter.visit
                    };
                    stack.push(Frame::Entered { emit_on_exit });

                    let expander_visit = config.order == Order::PreOrderExpander && filter.visit;
                    if filter.expand {
                        let mut connections = config.expand(&vertex, &path)?;
                        if reverse {
                            connections.reverse();
                        }
                        if expander_visit {
                            config.visit(result, &vertex, &path, Some(&connections))?;
                        }
                        stack.extend(connections.into_iter().map(|connection| Frame::Pending {
                            edge: Some(connection.edge),
                            vertex: connection.vertex,
                        }));
                    }
                }
                Frame::Entered { emit_on_exit } => {
                    if config.order == Order::PostOrder && emit_on_exit {
                        if let Some(vertex) = path.last_vertex() {
                            config.visit(result, vertex, &path, None)?;
                        }
                    }
                    path.pop();
                }
            }
        }

        trace!(iterations = guard.iterations(), "depth-first traversal finished");
        Ok(())
    }
}
