//! Filter directives and built-in filters.
//!
//! A filter decides, per vertex, whether the visitor sees it and whether the
//! strategy expands it. Filters return a [`FilterDirective`] which is reduced
//! to a [`FilterResult`] by [`parse_filter_result`].

use std::str::FromStr;

use crate::document::{matches_example, Document};
use crate::error::{Error, Result};

use super::config::{FilterFn, TraverserConfig};
use super::options::{EXCLUDE, PRUNE};
use super::types::TraversalPath;

/// Value returned by a filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterDirective {
    /// Visit and expand (the empty string).
    #[default]
    Continue,
    /// Visit but do not expand.
    Prune,
    /// Expand but do not visit.
    Exclude,
    /// Several directives; each one applies.
    Many(Vec<FilterDirective>),
}

impl FilterDirective {
    /// Builds a directive from string tokens.
    ///
    /// Fails with `Error::InvalidFilterResult` on an unknown token.
    pub fn from_tokens(tokens: &[&str]) -> Result<Self> {
        tokens
            .iter()
            .map(|token| token.parse())
            .collect::<Result<Vec<_>>>()
            .map(Self::Many)
    }
}

impl FromStr for FilterDirective {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "" => Ok(Self::Continue),
            PRUNE => Ok(Self::Prune),
            EXCLUDE => Ok(Self::Exclude),
            other => Err(Error::InvalidFilterResult(other.to_string())),
        }
    }
}

/// Reduced filter outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterResult {
    /// The visitor is called for the vertex.
    pub visit: bool,
    /// The strategy expands the vertex.
    pub expand: bool,
}

impl Default for FilterResult {
    fn default() -> Self {
        Self {
            visit: true,
            expand: true,
        }
    }
}

/// Reduces a directive to `{ visit, expand }`, scanning nested lists.
#[must_use]
pub fn parse_filter_result(directive: &FilterDirective) -> FilterResult {
    fn scan(directive: &FilterDirective, result: &mut FilterResult) {
        match directive {
            FilterDirective::Continue => {}
            FilterDirective::Prune => result.expand = false,
            FilterDirective::Exclude => result.visit = false,
            FilterDirective::Many(items) => {
                for item in items {
                    scan(item, result);
                }
            }
        }
    }

    let mut result = FilterResult::default();
    scan(directive, &mut result);
    result
}

/// Runs every filter and merges their directives.
pub fn combine_filters(
    filters: &[FilterFn],
    config: &TraverserConfig,
    vertex: &Document,
    path: &TraversalPath,
) -> Result<FilterDirective> {
    let mut merged = Vec::with_capacity(filters.len());
    for filter in filters {
        match filter(config, vertex, path)? {
            FilterDirective::Continue => {}
            FilterDirective::Many(items) => merged.extend(items),
            directive => merged.push(directive),
        }
    }
    Ok(FilterDirective::Many(merged))
}

/// Visits and expands everything.
pub fn visit_all_filter(
    _config: &TraverserConfig,
    _vertex: &Document,
    _path: &TraversalPath,
) -> Result<FilterDirective> {
    Ok(FilterDirective::Continue)
}

/// Prunes paths with more than `max_depth` vertices.
pub fn max_depth_filter(
    config: &TraverserConfig,
    _vertex: &Document,
    path: &TraversalPath,
) -> Result<FilterDirective> {
    match config.max_depth {
        Some(max_depth) if path.vertices.len() > max_depth => Ok(FilterDirective::Prune),
        _ => Ok(FilterDirective::Continue),
    }
}

/// Excludes paths with at most `min_depth` vertices.
pub fn min_depth_filter(
    config: &TraverserConfig,
    _vertex: &Document,
    path: &TraversalPath,
) -> Result<FilterDirective> {
    if path.vertices.len() <= config.min_depth {
        return Ok(FilterDirective::Exclude);
    }
    Ok(FilterDirective::Continue)
}

/// Excludes vertices that match none of `matching_attributes`.
///
/// An example matches when it has at least one attribute and every attribute
/// equals the vertex's value.
pub fn include_matching_attributes_filter(
    config: &TraverserConfig,
    vertex: &Document,
    _path: &TraversalPath,
) -> Result<FilterDirective> {
    let matched = config
        .matching_attributes
        .iter()
        .any(|example| matches_example(vertex, example));
    if matched {
        Ok(FilterDirective::Continue)
    } else {
        Ok(FilterDirective::Exclude)
    }
}
