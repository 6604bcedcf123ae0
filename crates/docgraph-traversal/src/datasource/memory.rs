//! In-memory document store with per-collection edge indices.
//!
//! Documents are keyed by handle (`collection/key`). Each edge collection
//! keeps bidirectional adjacency so that in/out edges of a vertex are
//! returned in insertion order in O(degree).

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::{Map, Value};

use crate::document::{
    split_handle, Document, FROM_ATTRIBUTE, ID_ATTRIBUTE, KEY_ATTRIBUTE, TO_ATTRIBUTE,
};
use crate::error::{Error, Result};
use crate::traversal::ExpanderKind;

use super::{BlueprintGraph, DocumentStore, EdgeCollection};

/// Adjacency of one edge collection.
#[derive(Debug, Default)]
struct EdgeIndex {
    /// Outgoing edges: `_from` -> edge handles.
    outgoing: FxHashMap<String, Vec<String>>,
    /// Incoming edges: `_to` -> edge handles.
    incoming: FxHashMap<String, Vec<String>>,
}

impl EdgeIndex {
    fn remove(&mut self, handle: &str, from: &str, to: &str) {
        if let Some(ids) = self.outgoing.get_mut(from) {
            ids.retain(|id| id != handle);
        }
        if let Some(ids) = self.incoming.get_mut(to) {
            ids.retain(|id| id != handle);
        }
    }
}

/// In-memory vertex and edge collections.
///
/// Wrap the store in an [`Arc`] once populated and hand out
/// [`MemoryEdgeCollection`] handles with [`edge_collection`](Self::edge_collection).
/// Removing a vertex does not remove its edges, so dangling edges can be
/// modelled.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// All documents indexed by handle.
    documents: FxHashMap<String, Document>,
    /// Edge collections indexed by name.
    edge_collections: FxHashMap<String, EdgeIndex>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Document CRUD ──────────────────────────────────────────────────

    /// Inserts a vertex; `_id` and `_key` are set from `collection` and `key`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentConflict` if the handle exists and
    /// `Error::InvalidDocument` if `properties` is not an object.
    pub fn insert_vertex(
        &mut self,
        collection: &str,
        key: &str,
        properties: Value,
    ) -> Result<Document> {
        let handle = format!("{collection}/{key}");
        let doc = self.prepare(&handle, key, properties)?;
        self.documents.insert(handle, doc.clone());
        Ok(doc)
    }

    /// Inserts an edge from `from` to `to` (vertex handles).
    ///
    /// The endpoints do not have to exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentConflict` if the handle exists and
    /// `Error::InvalidDocument` if `properties` is not an object.
    pub fn insert_edge(
        &mut self,
        collection: &str,
        key: &str,
        from: &str,
        to: &str,
        properties: Value,
    ) -> Result<Document> {
        let handle = format!("{collection}/{key}");
        let mut doc = self.prepare(&handle, key, properties)?;
        if let Value::Object(map) = &mut doc {
            map.insert(FROM_ATTRIBUTE.to_string(), Value::String(from.to_string()));
            map.insert(TO_ATTRIBUTE.to_string(), Value::String(to.to_string()));
        }

        let index = self.edge_collections.entry(collection.to_string()).or_default();
        index
            .outgoing
            .entry(from.to_string())
            .or_default()
            .push(handle.clone());
        index
            .incoming
            .entry(to.to_string())
            .or_default()
            .push(handle.clone());

        self.documents.insert(handle, doc.clone());
        Ok(doc)
    }

    /// Removes a document. Removing an edge also cleans up its adjacency.
    pub fn remove_document(&mut self, handle: &str) -> Option<Document> {
        let doc = self.documents.remove(handle)?;
        let (collection, _) = split_handle(handle);
        if let (Some(index), Some(from), Some(to)) = (
            self.edge_collections.get_mut(collection),
            doc.get(FROM_ATTRIBUTE).and_then(Value::as_str),
            doc.get(TO_ATTRIBUTE).and_then(Value::as_str),
        ) {
            index.remove(handle, from, to);
        }
        Some(doc)
    }

    /// Returns true if a document with the given handle exists.
    #[must_use]
    pub fn contains(&self, handle: &str) -> bool {
        self.documents.contains_key(handle)
    }

    /// Returns the total number of documents (vertices and edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns a handle on an edge collection. Unknown names yield an empty
    /// collection.
    #[must_use]
    pub fn edge_collection(self: &Arc<Self>, name: &str) -> MemoryEdgeCollection {
        MemoryEdgeCollection {
            store: Arc::clone(self),
            name: name.to_string(),
        }
    }

    // ── Edge queries ───────────────────────────────────────────────────

    fn out_edges_in(&self, collection: &str, vertex_id: &str) -> Vec<Document> {
        self.resolve(
            self.edge_collections
                .get(collection)
                .and_then(|index| index.outgoing.get(vertex_id)),
        )
    }

    fn in_edges_in(&self, collection: &str, vertex_id: &str) -> Vec<Document> {
        self.resolve(
            self.edge_collections
                .get(collection)
                .and_then(|index| index.incoming.get(vertex_id)),
        )
    }

    fn all_edges_in(&self, collection: &str, vertex_id: &str) -> Vec<Document> {
        let mut seen = FxHashSet::default();
        self.in_edges_in(collection, vertex_id)
            .into_iter()
            .chain(self.out_edges_in(collection, vertex_id))
            .filter(|edge| {
                edge.get(ID_ATTRIBUTE)
                    .and_then(Value::as_str)
                    .is_some_and(|id| seen.insert(id.to_string()))
            })
            .collect()
    }

    fn resolve(&self, handles: Option<&Vec<String>>) -> Vec<Document> {
        handles
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.documents.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn prepare(&self, handle: &str, key: &str, properties: Value) -> Result<Document> {
        if self.documents.contains_key(handle) {
            return Err(Error::DocumentConflict(handle.to_string()));
        }
        let mut map: Map<String, Value> = match properties {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::InvalidDocument(format!(
                    "expected an object for '{handle}', got {other}"
                )))
            }
        };
        map.insert(ID_ATTRIBUTE.to_string(), Value::String(handle.to_string()));
        map.insert(KEY_ATTRIBUTE.to_string(), Value::String(key.to_string()));
        Ok(Value::Object(map))
    }
}

impl DocumentStore for InMemoryStore {
    fn document(&self, handle: &str) -> Result<Document> {
        self.documents
            .get(handle)
            .cloned()
            .ok_or_else(|| Error::DocumentNotFound(handle.to_string()))
    }
}

impl BlueprintGraph for InMemoryStore {
    fn vertex(&self, id: &str) -> Result<Document> {
        self.document(id)
    }

    /// Edges of every edge collection, in collection-name order.
    fn edges(&self, vertex_id: &str, direction: ExpanderKind) -> Result<Vec<Document>> {
        let mut names: Vec<&String> = self.edge_collections.keys().collect();
        names.sort();

        let mut edges = Vec::new();
        for name in names {
            edges.extend(match direction {
                ExpanderKind::Outbound => self.out_edges_in(name, vertex_id),
                ExpanderKind::Inbound => self.in_edges_in(name, vertex_id),
                ExpanderKind::Any => self.all_edges_in(name, vertex_id),
            });
        }
        Ok(edges)
    }
}

/// Handle on one edge collection of an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryEdgeCollection {
    store: Arc<InMemoryStore>,
    name: String,
}

impl MemoryEdgeCollection {
    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl EdgeCollection for MemoryEdgeCollection {
    fn edges(&self, vertex_id: &str) -> Result<Vec<Document>> {
        Ok(self.store.all_edges_in(&self.name, vertex_id))
    }

    fn in_edges(&self, vertex_id: &str) -> Result<Vec<Document>> {
        Ok(self.store.in_edges_in(&self.name, vertex_id))
    }

    fn out_edges(&self, vertex_id: &str) -> Result<Vec<Document>> {
        Ok(self.store.out_edges_in(&self.name, vertex_id))
    }
}
