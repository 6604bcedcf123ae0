//! Document helpers.
//!
//! Vertices and edges are plain JSON documents. The engine only relies on a
//! handful of system attributes: `_id` and `_key` on every document, `_from`
//! and `_to` on edges.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A vertex or edge document.
pub type Document = Value;

/// Attribute holding the document handle (`collection/key`).
pub const ID_ATTRIBUTE: &str = "_id";
/// Attribute holding the document key.
pub const KEY_ATTRIBUTE: &str = "_key";
/// Edge attribute holding the source vertex handle.
pub const FROM_ATTRIBUTE: &str = "_from";
/// Edge attribute holding the target vertex handle.
pub const TO_ATTRIBUTE: &str = "_to";
/// Edge attribute holding the edge label.
pub const LABEL_ATTRIBUTE: &str = "$label";

/// Reads a string attribute, failing with `Error::InvalidDocument` if absent.
pub fn required_str<'a>(doc: &'a Document, attribute: &str) -> Result<&'a str> {
    doc.get(attribute).and_then(Value::as_str).ok_or_else(|| {
        Error::InvalidDocument(format!("document has no string attribute '{attribute}'"))
    })
}

/// Splits a handle `collection/key` into its two parts.
///
/// A handle without a slash is treated as a bare key with an empty collection.
#[must_use]
pub fn split_handle(handle: &str) -> (&str, &str) {
    match handle.split_once('/') {
        Some((collection, key)) => (collection, key),
        None => ("", handle),
    }
}

/// Builds a minimal `{ _id, _key }` vertex from a handle, without a lookup.
#[must_use]
pub fn stub_vertex(handle: &str) -> Document {
    let (_, key) = split_handle(handle);
    let mut doc = Map::with_capacity(2);
    doc.insert(ID_ATTRIBUTE.to_string(), Value::String(handle.to_string()));
    doc.insert(KEY_ATTRIBUTE.to_string(), Value::String(key.to_string()));
    Value::Object(doc)
}

/// Returns true if every attribute of `example` is present in `doc` with an
/// equal value. An empty example never matches.
#[must_use]
pub fn matches_example(doc: &Document, example: &Map<String, Value>) -> bool {
    if example.is_empty() {
        return false;
    }
    example
        .iter()
        .all(|(name, expected)| doc.get(name).is_some_and(|actual| actual == expected))
}
