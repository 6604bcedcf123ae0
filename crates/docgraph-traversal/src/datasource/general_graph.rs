//! Datasource over the edge collections of a named graph.

use crate::document::Document;
use crate::error::Result;

use super::{Datasource, DocumentStore, EdgeCollection};

/// Datasource backed by several edge collections.
///
/// Edge lists are concatenated in the order the collections were given.
#[derive(Debug, Clone)]
pub struct GeneralGraphDatasource<S, E> {
    store: S,
    edge_collections: Vec<E>,
}

impl<S: DocumentStore, E: EdgeCollection> GeneralGraphDatasource<S, E> {
    /// Creates a datasource over `edge_collections`, resolving vertices in
    /// `store`.
    #[must_use]
    pub fn new(store: S, edge_collections: Vec<E>) -> Self {
        Self {
            store,
            edge_collections,
        }
    }

    /// Returns the edge collections.
    #[must_use]
    pub fn edge_collections(&self) -> &[E] {
        &self.edge_collections
    }

    fn collect<F>(&self, vertex: &Document, fetch: F) -> Result<Vec<Document>>
    where
        F: Fn(&E, &str) -> Result<Vec<Document>>,
    {
        let id = self.vertex_id(vertex)?;
        let mut edges = Vec::new();
        for collection in &self.edge_collections {
            edges.extend(fetch(collection, &id)?);
        }
        Ok(edges)
    }
}

impl<S: DocumentStore, E: EdgeCollection> Datasource for GeneralGraphDatasource<S, E> {
    fn in_vertex(&self, edge: &Document) -> Result<Document> {
        self.store.document(&self.edge_to(edge)?)
    }

    fn out_vertex(&self, edge: &Document) -> Result<Document> {
        self.store.document(&self.edge_from(edge)?)
    }

    fn all_edges(&self, vertex: &Document) -> Result<Vec<Document>> {
        self.collect(vertex, |collection, id| collection.edges(id))
    }

    fn in_edges(&self, vertex: &Document) -> Result<Vec<Document>> {
        self.collect(vertex, |collection, id| collection.in_edges(id))
    }

    fn out_edges(&self, vertex: &Document) -> Result<Vec<Document>> {
        self.collect(vertex, |collection, id| collection.out_edges(id))
    }
}
