//! Datasources: the seam between the traversal engine and a document store.
//!
//! Strategies and built-in expanders only ever reach vertices and edges
//! through [`Datasource`]. Three adapters turn a backing store into a
//! datasource:
//!
//! - [`CollectionDatasource`]: one edge collection plus a document store
//! - [`GeneralGraphDatasource`]: several edge collections of a named graph
//! - [`BlueprintDatasource`]: a legacy graph exposing vertices and edges directly
//!
//! [`InMemoryStore`] implements every backing-store trait.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use docgraph_traversal::datasource::{
//!     CollectionDatasource, Datasource, DocumentStore, InMemoryStore,
//! };
//! use serde_json::json;
//!
//! let mut store = InMemoryStore::new();
//! store.insert_vertex("persons", "alice", json!({})).unwrap();
//! store.insert_vertex("persons", "bob", json!({})).unwrap();
//! store
//!     .insert_edge("knows", "ab", "persons/alice", "persons/bob", json!({}))
//!     .unwrap();
//!
//! let store = Arc::new(store);
//! let datasource = CollectionDatasource::new(store.clone(), store.edge_collection("knows"));
//!
//! let alice = store.document("persons/alice").unwrap();
//! let edges = datasource.out_edges(&alice).unwrap();
//! assert_eq!(edges.len(), 1);
//! assert_eq!(datasource.edge_to(&edges[0]).unwrap(), "persons/bob");
//! ```

mod blueprint;
mod collection;
mod general_graph;
mod memory;


use std::sync::Arc;

use serde_json::Value;

use crate::document::{
    required_str, Document, FROM_ATTRIBUTE, ID_ATTRIBUTE, LABEL_ATTRIBUTE, TO_ATTRIBUTE,
};
use crate::error::Result;
use crate::traversal::ExpanderKind;

pub use blueprint::BlueprintDatasource;
pub use collection::CollectionDatasource;
pub use general_graph::GeneralGraphDatasource;
pub use memory::{InMemoryStore, MemoryEdgeCollection};

/// Uniform access to vertices and edges for the traversal engine.
///
/// Attribute accessors have provided implementations reading the system
/// attributes (`_id`, `_from`, `_to`, `$label`); implementors only supply the
/// lookups.
pub trait Datasource {
    /// Returns the id of a vertex.
    fn vertex_id(&self, vertex: &Document) -> Result<String> {
        required_str(vertex, ID_ATTRIBUTE).map(str::to_string)
    }

    /// Returns the id of an edge.
    fn edge_id(&self, edge: &Document) -> Result<String> {
        required_str(edge, ID_ATTRIBUTE).map(str::to_string)
    }

    /// Returns the handle of the vertex an edge starts at.
    fn edge_from(&self, edge: &Document) -> Result<String> {
        required_str(edge, FROM_ATTRIBUTE).map(str::to_string)
    }

    /// Returns the handle of the vertex an edge points to.
    fn edge_to(&self, edge: &Document) -> Result<String> {
        required_str(edge, TO_ATTRIBUTE).map(str::to_string)
    }

    /// Returns the label of an edge, if it has one.
    fn label(&self, edge: &Document) -> Option<String> {
        edge.get(LABEL_ATTRIBUTE)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Returns the vertex an edge points to (`_to`).
    fn in_vertex(&self, edge: &Document) -> Result<Document>;

    /// Returns the vertex an edge starts at (`_from`).
    fn out_vertex(&self, edge: &Document) -> Result<Document>;

    /// Returns the endpoint of `edge` opposite to `vertex`, or `None` if the
    /// edge does not touch `vertex`.
    fn peer_vertex(&self, edge: &Document, vertex: &Document) -> Result<Option<Document>> {
        let id = self.vertex_id(vertex)?;
        if self.edge_from(edge)? == id {
            return self.in_vertex(edge).map(Some);
        }
        if self.edge_to(edge)? == id {
            return self.out_vertex(edge).map(Some);
        }
        Ok(None)
    }

    /// Returns in-edges followed by out-edges of a vertex.
    fn all_edges(&self, vertex: &Document) -> Result<Vec<Document>>;

    /// Returns the edges pointing to a vertex.
    fn in_edges(&self, vertex: &Document) -> Result<Vec<Document>>;

    /// Returns the edges starting at a vertex.
    fn out_edges(&self, vertex: &Document) -> Result<Vec<Document>>;
}

/// Document lookup by handle (`collection/key`).
pub trait DocumentStore {
    /// Fetches a document, failing with `Error::DocumentNotFound` if absent.
    fn document(&self, handle: &str) -> Result<Document>;
}

/// One edge collection, queried by vertex id.
pub trait EdgeCollection {
    /// Returns in-edges followed by out-edges, each edge once.
    fn edges(&self, vertex_id: &str) -> Result<Vec<Document>>;

    /// Returns the edges whose `_to` is `vertex_id`.
    fn in_edges(&self, vertex_id: &str) -> Result<Vec<Document>>;

    /// Returns the edges whose `_from` is `vertex_id`.
    fn out_edges(&self, vertex_id: &str) -> Result<Vec<Document>>;
}

/// Legacy graph interface exposing vertices and per-direction edges.
pub trait BlueprintGraph {
    /// Fetches a vertex, failing with `Error::DocumentNotFound` if absent.
    fn vertex(&self, id: &str) -> Result<Document>;

    /// Returns the edges of a vertex in the given direction.
    fn edges(&self, vertex_id: &str, direction: ExpanderKind) -> Result<Vec<Document>>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn document(&self, handle: &str) -> Result<Document> {
        (**self).document(handle)
    }
}

impl<T: EdgeCollection + ?Sized> EdgeCollection for Arc<T> {
    fn edges(&self, vertex_id: &str) -> Result<Vec<Document>> {
        (**self).edges(vertex_id)
    }

    fn in_edges(&self, vertex_id: &str) -> Result<Vec<Document>> {
        (**self).in_edges(vertex_id)
    }

    fn out_edges(&self, vertex_id: &str) -> Result<Vec<Document>> {
        (**self).out_edges(vertex_id)
    }
}

impl<T: BlueprintGraph + ?Sized> BlueprintGraph for Arc<T> {
    fn vertex(&self, id: &str) -> Result<Document> {
        (**self).vertex(id)
    }

    fn edges(&self, vertex_id: &str, direction: ExpanderKind) -> Result<Vec<Document>> {
        (**self).edges(vertex_id, direction)
    }
}
