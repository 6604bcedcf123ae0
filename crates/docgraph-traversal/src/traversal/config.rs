//! Traverser configuration and its builder.
//!
//! A [`TraverserConfig`] is fully resolved: defaults are filled in, the
//! filters are composed into a single callable and the expander is chosen.
//! It is never modified after [`TraverserConfigBuilder::build`].

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::datasource::Datasource;
use crate::document::Document;
use crate::error::{Error, Result};

use super::abort::AbortSignal;
use super::expander::{any_expander, inbound_expander, outbound_expander};
use super::filter::{
    combine_filters, max_depth_filter, min_depth_filter, parse_filter_result, visit_all_filter,
    FilterDirective, FilterResult,
};
use super::options::{
    ExpanderKind, ItemOrder, Order, Strategy, TraversalOptions, UniquenessConfig,
    UniquenessScope,
};
use super::types::{Connection, TraversalPath, TraversalResult};
use super::visitor::tracking_visitor;

/// Visitor callable: `(config, result, vertex, path, connections)`.
///
/// `connections` is only passed in [`Order::PreOrderExpander`] mode.
pub type VisitorFn = Arc<
    dyn Fn(
        &TraverserConfig,
        &mut TraversalResult,
        &Document,
        &TraversalPath,
        Option<&[Connection]>,
    ) -> Result<()>,
>;

/// Filter callable: `(config, vertex, path) -> directive`.
pub type FilterFn =
    Arc<dyn Fn(&TraverserConfig, &Document, &TraversalPath) -> Result<FilterDirective>>;

/// Expander callable: `(config, vertex, path) -> connections`.
pub type ExpanderFn =
    Arc<dyn Fn(&TraverserConfig, &Document, &TraversalPath) -> Result<Vec<Connection>>>;

/// Edge comparator applied by the built-in expanders.
pub type SortFn = Arc<dyn Fn(&Document, &Document) -> Ordering>;

/// Connection filter for the built-in expanders: `(config, neighbour, edge, path)`.
pub type ExpandFilterFn =
    Arc<dyn Fn(&TraverserConfig, &Document, &Document, &TraversalPath) -> bool>;

/// Distance callable: `(config, from, to, edge) -> distance`.
///
/// Used as edge weight by Dijkstra and as heuristic by A*.
pub type DistanceFn = Arc<dyn Fn(&TraverserConfig, &Document, &Document, &Document) -> f64>;

/// Fully resolved traversal configuration.
#[derive(Clone)]
pub struct TraverserConfig {
    /// Visitation order.
    pub order: Order,
    /// Connection processing order.
    pub item_order: ItemOrder,
    /// Search strategy.
    pub strategy: Strategy,
    /// Uniqueness rules.
    pub uniqueness: UniquenessConfig,
    /// Maximum number of strategy iterations.
    pub max_iterations: u64,
    /// Paths with at most this many vertices are excluded by `min_depth_filter`.
    pub min_depth: usize,
    /// Paths with more vertices than this are pruned by `max_depth_filter`.
    pub max_depth: Option<usize>,
    /// Fetch neighbour documents instead of building `_id`/`_key` stubs.
    pub build_vertices: bool,
    /// Labels accepted by the label-restricted expanders.
    pub labels: Vec<String>,
    /// Examples for `include_matching_attributes_filter`.
    pub matching_attributes: Vec<Map<String, Value>>,
    /// Edge attribute holding the edge weight.
    pub weight: Option<String>,
    /// Weight for edges without a numeric weight attribute.
    pub default_weight: Option<f64>,
    datasource: Arc<dyn Datasource>,
    visitor: VisitorFn,
    filter: FilterFn,
    expander: ExpanderFn,
    sort: Option<SortFn>,
    expand_filter: Option<ExpandFilterFn>,
    distance: Option<DistanceFn>,
    abort: Option<AbortSignal>,
}

impl fmt::Debug for TraverserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraverserConfig")
            .field("order", &self.order)
            .field("item_order", &self.item_order)
            .field("strategy", &self.strategy)
            .field("uniqueness", &self.uniqueness)
            .field("max_iterations", &self.max_iterations)
            .field("min_depth", &self.min_depth)
            .field("max_depth", &self.max_depth)
            .field("build_vertices", &self.build_vertices)
            .field("labels", &self.labels)
            .field("weight", &self.weight)
            .field("default_weight", &self.default_weight)
            .finish_non_exhaustive()
    }
}

impl TraverserConfig {
    /// Starts building a configuration over `datasource`.
    #[must_use]
    pub fn builder(datasource: Arc<dyn Datasource>) -> TraverserConfigBuilder {
        TraverserConfigBuilder::new(datasource)
    }

    /// Returns the datasource.
    #[must_use]
    pub fn datasource(&self) -> &dyn Datasource {
        self.datasource.as_ref()
    }

    /// Returns the edge comparator, if any.
    #[must_use]
    pub fn sort(&self) -> Option<&SortFn> {
        self.sort.as_ref()
    }

    /// Returns the connection filter, if any.
    #[must_use]
    pub fn expand_filter(&self) -> Option<&ExpandFilterFn> {
        self.expand_filter.as_ref()
    }

    /// Returns the distance function, if any.
    #[must_use]
    pub fn distance(&self) -> Option<&DistanceFn> {
        self.distance.as_ref()
    }

    /// Returns the abort signal, if any.
    #[must_use]
    pub fn abort_signal(&self) -> Option<&AbortSignal> {
        self.abort.as_ref()
    }

    /// Fails with `Error::Aborted` when the abort signal was raised.
    pub fn throw_if_aborted(&self) -> Result<()> {
        match &self.abort {
            Some(signal) => signal.throw_if_aborted(),
            None => Ok(()),
        }
    }

    /// Runs the combined filter and reduces its directive.
    pub(crate) fn apply_filter(
        &self,
        vertex: &Document,
        path: &TraversalPath,
    ) -> Result<FilterResult> {
        let directive = (self.filter)(self, vertex, path)?;
        Ok(parse_filter_result(&directive))
    }

    /// Runs the expander.
    pub(crate) fn expand(
        &self,
        vertex: &Document,
        path: &TraversalPath,
    ) -> Result<Vec<Connection>> {
        (self.expander)(self, vertex, path)
    }

    /// Runs the visitor.
    pub(crate) fn visit(
        &self,
        result: &mut TraversalResult,
        vertex: &Document,
        path: &TraversalPath,
        connections: Option<&[Connection]>,
    ) -> Result<()> {
        (self.visitor)(self, result, vertex, path, connections)
    }
}

/// Builder for [`TraverserConfig`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use docgraph_traversal::datasource::{CollectionDatasource, InMemoryStore};
/// use docgraph_traversal::traversal::{Strategy, TraverserConfig, UniquenessScope};
/// use serde_json::json;
///
/// let mut store = InMemoryStore::new();
/// store.insert_vertex("v", "a", json!({})).unwrap();
/// let store = Arc::new(store);
/// let datasource = CollectionDatasource::new(store.clone(), store.edge_collection("e"));
///
/// let config = TraverserConfig::builder(Arc::new(datasource))
///     .strategy(Strategy::BreadthFirst)
///     .uniqueness(UniquenessScope::Global, UniquenessScope::None)
///     .max_depth(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_depth, Some(3));
/// ```
pub struct TraverserConfigBuilder {
    options: TraversalOptions,
    datasource: Arc<dyn Datasource>,
    visitor: Option<VisitorFn>,
    filters: Vec<FilterFn>,
    expander: Option<ExpanderFn>,
    sort: Option<SortFn>,
    expand_filter: Option<ExpandFilterFn>,
    distance: Option<DistanceFn>,
    abort: Option<AbortSignal>,
}

impl TraverserConfigBuilder {
    /// Creates a builder with default options.
    #[must_use]
    pub fn new(datasource: Arc<dyn Datasource>) -> Self {
        Self {
            options: TraversalOptions::default(),
            datasource,
            visitor: None,
            filters: Vec::new(),
            expander: None,
            sort: None,
            expand_filter: None,
            distance: None,
            abort: None,
        }
    }

    /// Replaces all serialisable options.
    ///
    /// Every option set earlier through the individual setters is
    /// overwritten, so call this first and refine afterwards. Callables
    /// (visitor, filters, expander, sort, distance, abort) are kept.
    #[must_use]
    pub fn options(mut self, options: TraversalOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the search strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.options.strategy = strategy;
        self
    }

    /// Sets the visitation order.
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.options.order = order;
        self
    }

    /// Sets the connection processing order.
    #[must_use]
    pub fn item_order(mut self, item_order: ItemOrder) -> Self {
        self.options.item_order = item_order;
        self
    }

    /// Sets vertex and edge uniqueness.
    #[must_use]
    pub fn uniqueness(mut self, vertices: UniquenessScope, edges: UniquenessScope) -> Self {
        self.options.uniqueness = UniquenessConfig::new(vertices, edges);
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.options.max_iterations = max_iterations;
        self
    }

    /// Sets the minimum depth.
    #[must_use]
    pub fn min_depth(mut self, min_depth: usize) -> Self {
        self.options.min_depth = min_depth;
        self
    }

    /// Sets the maximum depth (`None` for unbounded).
    #[must_use]
    pub fn max_depth(mut self, max_depth: impl Into<Option<usize>>) -> Self {
        self.options.max_depth = max_depth.into();
        self
    }

    /// Chooses between fetched neighbours and `_id`/`_key` stubs.
    #[must_use]
    pub fn build_vertices(mut self, build_vertices: bool) -> Self {
        self.options.build_vertices = build_vertices;
        self
    }

    /// Sets the labels for the label-restricted expanders.
    #[must_use]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the examples for the matching-attributes filter.
    #[must_use]
    pub fn matching_attributes(mut self, examples: Vec<Map<String, Value>>) -> Self {
        self.options.matching_attributes = examples;
        self
    }

    /// Sets the edge weight attribute.
    #[must_use]
    pub fn weight(mut self, attribute: impl Into<String>) -> Self {
        self.options.weight = Some(attribute.into());
        self
    }

    /// Sets the fallback edge weight.
    #[must_use]
    pub fn default_weight(mut self, weight: f64) -> Self {
        self.options.default_weight = Some(weight);
        self
    }

    /// Selects a built-in expander, replacing any custom expander.
    #[must_use]
    pub fn expander_kind(mut self, kind: ExpanderKind) -> Self {
        self.options.expander = kind;
        self.expander = None;
        self
    }

    /// Sets a custom expander.
    #[must_use]
    pub fn expander<F>(mut self, expander: F) -> Self
    where
        F: Fn(&TraverserConfig, &Document, &TraversalPath) -> Result<Vec<Connection>> + 'static,
    {
        self.expander = Some(Arc::new(expander));
        self
    }

    /// Sets the visitor.
    ///
    /// Without one, [`tracking_visitor`] records every visit.
    #[must_use]
    pub fn visitor<F>(mut self, visitor: F) -> Self
    where
        F: Fn(
                &TraverserConfig,
                &mut TraversalResult,
                &Document,
                &TraversalPath,
                Option<&[Connection]>,
            ) -> Result<()>
            + 'static,
    {
        self.visitor = Some(Arc::new(visitor));
        self
    }

    /// Appends a filter. Filters run in the order they were added.
    #[must_use]
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&TraverserConfig, &Document, &TraversalPath) -> Result<FilterDirective> + 'static,
    {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Sets the edge comparator used by the built-in expanders.
    #[must_use]
    pub fn sort<F>(mut self, sort: F) -> Self
    where
        F: Fn(&Document, &Document) -> Ordering + 'static,
    {
        self.sort = Some(Arc::new(sort));
        self
    }

    /// Sets the connection filter used by the built-in expanders.
    #[must_use]
    pub fn expand_filter<F>(mut self, expand_filter: F) -> Self
    where
        F: Fn(&TraverserConfig, &Document, &Document, &TraversalPath) -> bool + 'static,
    {
        self.expand_filter = Some(Arc::new(expand_filter));
        self
    }

    /// Sets the distance function.
    #[must_use]
    pub fn distance<F>(mut self, distance: F) -> Self
    where
        F: Fn(&TraverserConfig, &Document, &Document, &Document) -> f64 + 'static,
    {
        self.distance = Some(Arc::new(distance));
        self
    }

    /// Attaches an abort signal.
    #[must_use]
    pub fn abort_signal(mut self, signal: AbortSignal) -> Self {
        self.abort = Some(signal);
        self
    }

    /// Validates the options and resolves the configuration.
    pub fn build(self) -> Result<TraverserConfig> {
        let options = self.options;

        if options.max_iterations == 0 {
            return Err(Error::BadParameter(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if let Some(weight) = options.default_weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::BadParameter(format!(
                    "default_weight must be a finite non-negative number, got {weight}"
                )));
            }
        }

        let mut filters: Vec<FilterFn> = Vec::with_capacity(self.filters.len() + 2);
        if options.min_depth > 0 {
            filters.push(Arc::new(min_depth_filter));
        }
        if options.max_depth.is_some() {
            filters.push(Arc::new(max_depth_filter));
        }
        filters.extend(self.filters);

        let filter: FilterFn = match filters.len() {
            0 => Arc::new(visit_all_filter),
            1 => filters.swap_remove(0),
            _ => Arc::new(move |config: &TraverserConfig, vertex: &Document, path: &TraversalPath| {
                combine_filters(&filters, config, vertex, path)
            }),
        };

        let expander = self
            .expander
            .unwrap_or_else(|| builtin_expander(options.expander));
        let visitor = self.visitor.unwrap_or_else(|| Arc::new(tracking_visitor));

        Ok(TraverserConfig {
            order: options.order,
            item_order: options.item_order,
            strategy: options.strategy,
            uniqueness: options.uniqueness,
            max_iterations: options.max_iterations,
            min_depth: options.min_depth,
            max_depth: options.max_depth,
            build_vertices: options.build_vertices,
            labels: options.labels,
            matching_attributes: options.matching_attributes,
            weight: options.weight,
            default_weight: options.default_weight,
            datasource: self.datasource,
            visitor,
            filter,
            expander,
            sort: self.sort,
            expand_filter: self.expand_filter,
            distance: self.distance,
            abort: self.abort,
        })
    }
}

fn builtin_expander(kind: ExpanderKind) -> ExpanderFn {
    match kind {
        ExpanderKind::Outbound => Arc::new(outbound_expander),
        ExpanderKind::Inbound => Arc::new(inbound_expander),
        ExpanderKind::Any => Arc::new(any_expander),
    }
}
