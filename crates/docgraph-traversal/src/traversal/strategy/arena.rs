//! Node arena shared by the shortest-path strategies.
//!
//! Nodes are memoised by vertex id so that rediscovering a vertex reuses its
//! node. Parent links are arena indices.

use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;

use crate::document::Document;
use crate::error::Result;
use crate::traversal::config::TraverserConfig;
use crate::traversal::options::Order;
use crate::traversal::types::{TraversalPath, TraversalResult};

/// Search node stored in a [`NodeArena`].
pub(crate) trait SearchNode {
    fn new(id: String, vertex: Document) -> Self;
    fn id(&self) -> &str;
    fn vertex(&self) -> &Document;
    /// Parent index and the edge leading from it.
    fn parent(&self) -> Option<(usize, &Document)>;
    /// Excluded from the replay by a filter.
    fn hidden(&self) -> bool;
}

#[derive(Debug)]
pub(crate) struct NodeArena<N> {
    nodes: Vec<N>,
    by_id: FxHashMap<String, usize>,
}

impl<N: SearchNode> NodeArena<N> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            by_id: FxHashMap::default(),
        }
    }

    /// Returns the node of `vertex`, creating it on first sight.
    pub(crate) fn intern(&mut self, config: &TraverserConfig, vertex: &Document) -> Result<usize> {
        let id = config.datasource().vertex_id(vertex)?;
        if let Some(&index) = self.by_id.get(&id) {
            return Ok(index);
        }
        let index = self.nodes.len();
        self.by_id.insert(id.clone(), index);
        self.nodes.push(N::new(id, vertex.clone()));
        Ok(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Reconstructs the path from the start vertex to `index`.
    pub(crate) fn path(&self, index: usize) -> TraversalPath {
        let mut path = TraversalPath::new();
        let mut cursor = Some(index);
        while let Some(current) = cursor {
            let node = &self.nodes[current];
            path.vertices.push(node.vertex().clone());
            cursor = node.parent().map(|(parent, edge)| {
                path.edges.push(edge.clone());
                parent
            });
        }
        path.vertices.reverse();
        path.edges.reverse();
        path
    }

    /// Visits every non-hidden node on the chain ending at `target`.
    ///
    /// Pre-order replays from the start vertex to `target`; every other
    /// order replays backwards.
    pub(crate) fn replay(
        &self,
        config: &TraverserConfig,
        result: &mut TraversalResult,
        target: usize,
    ) -> Result<()> {
        let mut chain = Vec::new();
        let mut cursor = Some(target);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.nodes[current].parent().map(|(parent, _)| parent);
        }
        if config.order == Order::PreOrder {
            chain.reverse();
        }

        for index in chain {
            let node = &self.nodes[index];
            if node.hidden() {
                continue;
            }
            config.visit(result, node.vertex(), &self.path(index), None)?;
        }
        Ok(())
    }
}

impl<N> Index<usize> for NodeArena<N> {
    type Output = N;

    fn index(&self, index: usize) -> &N {
        &self.nodes[index]
    }
}

impl<N> IndexMut<usize> for NodeArena<N> {
    fn index_mut(&mut self, index: usize) -> &mut N {
        &mut self.nodes[index]
    }
}
