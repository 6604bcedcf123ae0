//! Breadth-first search over an arena of entries.
//!
//! Entries are appended in discovery order and point to their parent by
//! index, so paths are rebuilt on demand. A single cursor walks the arena
//! forward while expanding; post-order turns it around at the last entry
//! and emits on the way back.

use tracing::trace;

use crate::document::Document;
use crate::error::Result;
use crate::traversal::config::TraverserConfig;
use crate::traversal::options::Order;
use crate::traversal::types::{TraversalPath, TraversalResult};
use crate::traversal::uniqueness::{check_uniqueness, VisitedSets};

use super::{check_reverse, IterationGuard, SearchStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryState {
    Unvisited,
    Visited { emit: bool },
}

#[derive(Debug)]
struct Entry {
    edge: Option<Document>,
    vertex: Document,
    parent: Option<usize>,
    state: EntryState,
}

/// Position in the arena and walking direction.
#[derive(Debug)]
struct Cursor {
    index: usize,
    forward: bool,
}

impl Cursor {
    /// Moves one entry in the current direction. Returns false when the
    /// backward walk runs past the first entry.
    fn step(&mut self) -> bool {
        if self.forward {
            self.index += 1;
            true
        } else if self.index == 0 {
            false
        } else {
            self.index -= 1;
            true
        }
    }

    /// Moves on, or turns backward when standing on the last entry.
    fn advance_or_turn(&mut self, len: usize) -> bool {
        if self.index + 1 < len {
            self.step()
        } else {
            self.forward = false;
            true
        }
    }
}

fn entry_path(entries: &[Entry], index: usize) -> TraversalPath {
    let mut path = TraversalPath::new();
    let mut cursor = Some(index);
    while let Some(current) = cursor {
        let entry = &entries[current];
        path.vertices.push(entry.vertex.clone());
        if let Some(edge) = &entry.edge {
            path.edges.push(edge.clone());
        }
        cursor = entry.parent;
    }
    path.vertices.reverse();
    path.edges.reverse();
    path
}

/// Breadth-first traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstSearch;

impl SearchStrategy for BreadthFirstSearch {
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
        let reverse = check_reverse(config);
        let have_uniqueness = config.uniqueness.is_active();

        let mut entries = vec![Entry {
            edge: None,
            vertex: start.clone(),
            parent: None,
            state: EntryState::Unvisited,
        }];
        let mut cursor = Cursor {
            index: 0,
            forward: true,
        };

        while cursor.index < entries.len() {
            guard.tick()?;
            let index = cursor.index;

            match entries[index].state {
                EntryState::Unvisited => {
                    entries[index].state = EntryState::Visited { emit: false };
                    let path = entry_path(&entries, index);
                    let vertex = entries[index].vertex.clone();

                    if have_uniqueness {
                        let ancestors = path.vertices.len() - 1;
                        visited.rebuild_path_scope(
                            config,
                            &path.vertices[..ancestors],
                            &path.edges[..ancestors.saturating_sub(1)],
                        )?;
                        let edge = entries[index].edge.as_ref();
                        if !check_uniqueness(config, &mut visited, &vertex, edge)? {
                            let moved = if config.order == Order::PostOrder {
                                cursor.advance_or_turn(entries.len())
                            } else {
                                cursor.step()
                            };
                            if !moved {
                                break;
                            }
                            continue;
                        }
                    }

                    let filter = config.apply_filter(&vertex, &path)?;
                    if config.order == Order::PreOrder && filter.visit {
                        config.visit(result, &vertex, &path, None)?;
                    } else {
                        entries[index].state = EntryState::Visited { emit: filter.visit };
                    }

                    let expander_visit = config.order == Order::PreOrderExpander && filter.visit;
                    if filter.expand {
                        let mut connections = config.expand(&vertex, &path)?;
                        if reverse {
                            connections.reverse();
                        }
                        if expander_visit {
                            config.visit(result, &vertex, &path, Some(&connections))?;
                        }
                        entries.extend(connections.into_iter().map(|connection| Entry {
                            edge: Some(connection.edge),
                            vertex: connection.vertex,
                            parent: Some(index),
                            state: EntryState::Unvisited,
                        }));
                    }

                    if config.order == Order::PostOrder && !cursor.advance_or_turn(entries.len()) {
                        break;
                    }
                }
                EntryState::Visited { emit } => {
                    if config.order == Order::PostOrder && emit {
                        let path = entry_path(&entries, index);
                        config.visit(result, &entries[index].vertex, &path, None)?;
                    }
                    if !cursor.step() {
                        break;
                    }
                }
            }
        }

        trace!(
            iterations = guard.iterations(),
            entries = entries.len(),
            "breadth-first traversal finished"
        );
        Ok(())
    }
}
