//! Values exchanged between strategies, expanders, filters and visitors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{Document, ID_ATTRIBUTE};

/// A neighbour reached from the vertex being expanded, via `edge`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// The edge that was followed.
    pub edge: Document,
    /// The vertex at the other end of `edge`.
    pub vertex: Document,
}

impl Connection {
    /// Creates a connection.
    #[must_use]
    pub fn new(edge: Document, vertex: Document) -> Self {
        Self { edge, vertex }
    }
}

/// The route from the start vertex to the vertex currently visited.
///
/// `edges[i]` connects `vertices[i]` and `vertices[i + 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalPath {
    /// Vertices from the start vertex to the current vertex.
    pub vertices: Vec<Document>,
    /// Edges between consecutive vertices.
    pub edges: Vec<Document>,
}

impl TraversalPath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of edges on the path (the start vertex is depth 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.edges.len()
    }

    /// Returns the last vertex on the path.
    #[must_use]
    pub fn last_vertex(&self) -> Option<&Document> {
        self.vertices.last()
    }

    /// Returns the `_id` of every vertex on the path.
    #[must_use]
    pub fn vertex_ids(&self) -> Vec<&str> {
        ids(&self.vertices)
    }

    /// Returns the `_id` of every edge on the path.
    #[must_use]
    pub fn edge_ids(&self) -> Vec<&str> {
        ids(&self.edges)
    }

    pub(crate) fn push(&mut self, edge: Option<Document>, vertex: Document) {
        if let Some(edge) = edge {
            self.edges.push(edge);
        }
        self.vertices.push(vertex);
    }

    pub(crate) fn pop(&mut self) {
        self.vertices.pop();
        self.edges.pop();
    }
}

fn ids(documents: &[Document]) -> Vec<&str> {
    documents
        .iter()
        .filter_map(|doc| doc.get(ID_ATTRIBUTE).and_then(Value::as_str))
        .collect()
}

/// Vertices and paths recorded by the tracking visitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitedItems {
    /// Visited vertices, in visitation order.
    pub vertices: Vec<Document>,
    /// The path of each visited vertex.
    pub paths: Vec<TraversalPath>,
}

/// Caller-owned accumulator, populated exclusively by visitors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Filled by [`tracking_visitor`](super::tracking_visitor) when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited: Option<VisitedItems>,
    /// Incremented by [`counting_visitor`](super::counting_visitor).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl TraversalResult {
    /// Creates an empty result with no tracking storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result ready for the tracking visitor.
    #[must_use]
    pub fn tracking() -> Self {
        Self {
            visited: Some(VisitedItems::default()),
            count: None,
        }
    }

    /// Returns the `_id` of every tracked vertex, in visitation order.
    #[must_use]
    pub fn visited_ids(&self) -> Vec<&str> {
        self.visited
            .as_ref()
            .map(|visited| ids(&visited.vertices))
            .unwrap_or_default()
    }

    /// Returns the vertex ids of every tracked path.
    #[must_use]
    pub fn visited_paths(&self) -> Vec<Vec<&str>> {
        self.visited
            .as_ref()
            .map(|visited| visited.paths.iter().map(TraversalPath::vertex_ids).collect())
            .unwrap_or_default()
    }
}
