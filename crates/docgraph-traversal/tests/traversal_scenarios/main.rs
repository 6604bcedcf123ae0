//! Scenario test suite for the traversal engine.
//!
//! Each submodule builds a small document graph in an [`InMemoryStore`] and
//! checks the exact visitation sequence produced through the public API.
//!
//! [`InMemoryStore`]: docgraph_traversal::datasource::InMemoryStore

mod helpers;

mod collections;
mod shortest_path;
mod world;
