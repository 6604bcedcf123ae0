//! "Already visited" bookkeeping for vertices and edges.
//!
//! Each set is scoped independently. Global sets persist for the whole run;
//! path sets are rebuilt from the ancestors of the entry being checked.

use rustc_hash::FxHashSet;

use crate::document::Document;
use crate::error::Result;

use super::config::TraverserConfig;
use super::options::UniquenessScope;

/// Visited vertex ids and edge ids of one traversal run.
#[derive(Debug, Default, Clone)]
pub struct VisitedSets {
    /// Visited vertex ids.
    pub vertices: FxHashSet<String>,
    /// Visited edge ids.
    pub edges: FxHashSet<String>,
}

impl VisitedSets {
    /// Creates empty sets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refills the path-scoped sets from the ancestors of the current entry.
    ///
    /// Sets with another scope are left untouched.
    pub fn rebuild_path_scope(
        &mut self,
        config: &TraverserConfig,
        vertices: &[Document],
        edges: &[Document],
    ) -> Result<()> {
        let datasource = config.datasource();
        if config.uniqueness.vertices == UniquenessScope::Path {
            self.vertices.clear();
            for vertex in vertices {
                self.vertices.insert(datasource.vertex_id(vertex)?);
            }
        }
        if config.uniqueness.edges == UniquenessScope::Path {
            self.edges.clear();
            for edge in edges {
                self.edges.insert(datasource.edge_id(edge)?);
            }
        }
        Ok(())
    }
}

/// Checks and records `vertex` (reached via `edge`) against the active scopes.
///
/// Returns `false` on a duplicate. The edge is checked first; the start
/// vertex has no edge and only the vertex check applies to it.
pub fn check_uniqueness(
    config: &TraverserConfig,
    visited: &mut VisitedSets,
    vertex: &Document,
    edge: Option<&Document>,
) -> Result<bool> {
    let datasource = config.datasource();

    if config.uniqueness.edges != UniquenessScope::None {
        if let Some(edge) = edge {
            if !visited.edges.insert(datasource.edge_id(edge)?) {
                return Ok(false);
            }
        }
    }

    if config.uniqueness.vertices != UniquenessScope::None
        && !visited.vertices.insert(datasource.vertex_id(vertex)?)
    {
        return Ok(false);
    }

    Ok(true)
}
