//! Built-in visitors.
//!
//! Visitors consume visited vertices for side effects only; they never steer
//! the traversal. An error returned by a visitor ends the traversal.

use crate::document::Document;
use crate::error::Result;

use super::config::TraverserConfig;
use super::types::{Connection, TraversalPath, TraversalResult};

/// Records a copy of the vertex and its path in `result.visited`, if present.
pub fn tracking_visitor(
    _config: &TraverserConfig,
    result: &mut TraversalResult,
    vertex: &Document,
    path: &TraversalPath,
    _connections: Option<&[Connection]>,
) -> Result<()> {
    if let Some(visited) = result.visited.as_mut() {
        visited.vertices.push(vertex.clone());
        visited.paths.push(path.clone());
    }
    Ok(())
}

/// Counts visited vertices in `result.count`.
pub fn counting_visitor(
    _config: &TraverserConfig,
    result: &mut TraversalResult,
    _vertex: &Document,
    _path: &TraversalPath,
    _connections: Option<&[Connection]>,
) -> Result<()> {
    *result.count.get_or_insert(0) += 1;
    Ok(())
}

/// Does nothing.
pub fn do_nothing_visitor(
    _config: &TraverserConfig,
    _result: &mut TraversalResult,
    _vertex: &Document,
    _path: &TraversalPath,
    _connections: Option<&[Connection]>,
) -> Result<()> {
    Ok(())
}
