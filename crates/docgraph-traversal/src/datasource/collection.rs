//! Datasource over a single edge collection.

use crate::document::Document;
use crate::error::Result;

use super::{Datasource, DocumentStore, EdgeCollection};

/// Datasource backed by one edge collection and a document store.
///
/// Neighbour vertices are fetched from the store by the handle found in the
/// edge's `_from` / `_to`.
#[derive(Debug, Clone)]
pub struct CollectionDatasource<S, E> {
    store: S,
    edges: E,
}

impl<S: DocumentStore, E: EdgeCollection> CollectionDatasource<S, E> {
    /// Creates a datasource over `edges`, resolving vertices in `store`.
    #[must_use]
    pub fn new(store: S, edges: E) -> Self {
        Self { store, edges }
    }

    /// Returns the edge collection.
    #[must_use]
    pub fn edge_collection(&self) -> &E {
        &self.edges
    }
}

impl<S: DocumentStore, E: EdgeCollection> Datasource for CollectionDatasource<S, E> {
    fn in_vertex(&self, edge: &Document) -> Result<Document> {
        self.store.document(&self.edge_to(edge)?)
    }

    fn out_vertex(&self, edge: &Document) -> Result<Document> {
        self.store.document(&self.edge_from(edge)?)
    }

    fn all_edges(&self, vertex: &Document) -> Result<Vec<Document>> {
        self.edges.edges(&self.vertex_id(vertex)?)
    }

    fn in_edges(&self, vertex: &Document) -> Result<Vec<Document>> {
        self.edges.in_edges(&self.vertex_id(vertex)?)
    }

    fn out_edges(&self, vertex: &Document) -> Result<Vec<Document>> {
        self.edges.out_edges(&self.vertex_id(vertex)?)
    }
}
