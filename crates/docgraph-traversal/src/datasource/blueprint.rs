//! Datasource over a legacy blueprint-style graph.

use crate::document::Document;
use crate::error::Result;
use crate::traversal::ExpanderKind;

use super::{BlueprintGraph, Datasource};

/// Datasource backed by a [`BlueprintGraph`].
#[derive(Debug, Clone)]
pub struct BlueprintDatasource<G> {
    graph: G,
}

impl<G: BlueprintGraph> BlueprintDatasource<G> {
    /// Creates a datasource over `graph`.
    #[must_use]
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    /// Returns the graph.
    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }
}

impl<G: BlueprintGraph> Datasource for BlueprintDatasource<G> {
    fn in_vertex(&self, edge: &Document) -> Result<Document> {
        self.graph.vertex(&self.edge_to(edge)?)
    }

    fn out_vertex(&self, edge: &Document) -> Result<Document> {
        self.graph.vertex(&self.edge_from(edge)?)
    }

    fn all_edges(&self, vertex: &Document) -> Result<Vec<Document>> {
        self.graph.edges(&self.vertex_id(vertex)?, ExpanderKind::Any)
    }

    fn in_edges(&self, vertex: &Document) -> Result<Vec<Document>> {
        self.graph.edges(&self.vertex_id(vertex)?, ExpanderKind::Inbound)
    }

    fn out_edges(&self, vertex: &Document) -> Result<Vec<Document>> {
        self.graph.edges(&self.vertex_id(vertex)?, ExpanderKind::Outbound)
    }
}
