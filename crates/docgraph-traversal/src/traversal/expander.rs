//! Built-in expanders.
//!
//! An expander turns a vertex into the `(edge, neighbour)` connections the
//! strategy explores next. A neighbour that cannot be resolved (for example
//! a dangling edge pointing at a deleted vertex) is dropped and the
//! traversal continues.

use tracing::debug;

use crate::document::{stub_vertex, Document};
use crate::error::Result;

use super::config::TraverserConfig;
use super::options::ExpanderKind;
use super::types::{Connection, TraversalPath};

/// Follows outgoing edges.
pub fn outbound_expander(
    config: &TraverserConfig,
    vertex: &Document,
    path: &TraversalPath,
) -> Result<Vec<Connection>> {
    expand(config, vertex, path, ExpanderKind::Outbound, false)
}

/// Follows incoming edges.
pub fn inbound_expander(
    config: &TraverserConfig,
    vertex: &Document,
    path: &TraversalPath,
) -> Result<Vec<Connection>> {
    expand(config, vertex, path, ExpanderKind::Inbound, false)
}

/// Follows edges in both directions.
pub fn any_expander(
    config: &TraverserConfig,
    vertex: &Document,
    path: &TraversalPath,
) -> Result<Vec<Connection>> {
    expand(config, vertex, path, ExpanderKind::Any, false)
}

/// Follows outgoing edges whose label is in `config.labels`.
pub fn expand_out_edges_with_labels(
    config: &TraverserConfig,
    vertex: &Document,
    path: &TraversalPath,
) -> Result<Vec<Connection>> {
    expand(config, vertex, path, ExpanderKind::Outbound, true)
}

/// Follows incoming edges whose label is in `config.labels`.
pub fn expand_in_edges_with_labels(
    config: &TraverserConfig,
    vertex: &Document,
    path: &TraversalPath,
) -> Result<Vec<Connection>> {
    expand(config, vertex, path, ExpanderKind::Inbound, true)
}

/// Follows edges in both directions whose label is in `config.labels`.
pub fn expand_edges_with_labels(
    config: &TraverserConfig,
    vertex: &Document,
    path: &TraversalPath,
) -> Result<Vec<Connection>> {
    expand(config, vertex, path, ExpanderKind::Any, true)
}

fn expand(
    config: &TraverserConfig,
    vertex: &Document,
    path: &TraversalPath,
    direction: ExpanderKind,
    with_labels: bool,
) -> Result<Vec<Connection>> {
    let datasource = config.datasource();
    let mut edges = match direction {
        ExpanderKind::Outbound => datasource.out_edges(vertex)?,
        ExpanderKind::Inbound => datasource.in_edges(vertex)?,
        ExpanderKind::Any => datasource.all_edges(vertex)?,
    };

    if let Some(sort) = config.sort() {
        edges.sort_by(|a, b| sort(a, b));
    }

    let mut connections = Vec::with_capacity(edges.len());
    for edge in edges {
        if with_labels {
            let accepted = datasource
                .label(&edge)
                .is_some_and(|label| config.labels.contains(&label));
            if !accepted {
                continue;
            }
        }

        let neighbour = match resolve_neighbour(config, vertex, &edge, direction) {
            Ok(Some(neighbour)) => neighbour,
            Ok(None) => {
                debug!(edge = %edge, "edge does not touch the expanded vertex, skipping");
                continue;
            }
            Err(err) => {
                debug!(
                    edge = %edge,
                    error = %err,
                    "dropping connection with unresolvable neighbour"
                );
                continue;
            }
        };

        if let Some(expand_filter) = config.expand_filter() {
            if !expand_filter(config, &neighbour, &edge, path) {
                continue;
            }
        }

        connections.push(Connection::new(edge, neighbour));
    }

    Ok(connections)
}

fn resolve_neighbour(
    config: &TraverserConfig,
    vertex: &Document,
    edge: &Document,
    direction: ExpanderKind,
) -> Result<Option<Document>> {
    let datasource = config.datasource();

    if !config.build_vertices {
        let handle = match direction {
            ExpanderKind::Outbound => datasource.edge_to(edge)?,
            ExpanderKind::Inbound => datasource.edge_from(edge)?,
            ExpanderKind::Any => {
                let from = datasource.edge_from(edge)?;
                if from != datasource.vertex_id(vertex)? {
                    from
                } else {
                    datasource.edge_to(edge)?
                }
            }
        };
        return Ok(Some(stub_vertex(&handle)));
    }

    match direction {
        ExpanderKind::Outbound => datasource.in_vertex(edge).map(Some),
        ExpanderKind::Inbound => datasource.out_vertex(edge).map(Some),
        ExpanderKind::Any => datasource.peer_vertex(edge, vertex),
    }
}
