//! Typed traversal options.
//!
//! Every enumerated option is a closed enum that can be parsed from its name
//! (case-insensitive, hyphens ignored) or from its numeric constant. Parsing
//! is the only place invalid values are rejected; once a value exists it is
//! valid.
//!
//! [`TraversalOptions`] groups the serialisable options so that they can be
//! loaded from a TOML file and the environment with figment.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Environment variable prefix used by [`TraversalOptions::load`].
pub const ENV_PREFIX: &str = "DOCGRAPH_TRAVERSAL_";

/// Default cap on strategy iterations.
pub const DEFAULT_MAX_ITERATIONS: u64 = 10_000_000;

/// Default maximum depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Filter directive: do not expand the vertex.
pub const PRUNE: &str = "prune";

/// Filter directive: do not visit the vertex.
pub const EXCLUDE: &str = "exclude";

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('-', "")
}

/// Raw option value as it appears in configuration sources.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Name(String),
    Code(u8),
}

macro_rules! traversal_option {
    (
        $(#[$meta:meta])*
        $name:ident ($option:literal, default = $default:ident) {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Option name used in error messages.
            pub const OPTION: &'static str = $option;

            /// Returns the numeric constant of this value.
            #[must_use]
            pub const fn code(self) -> u8 {
                match self {
                    $( Self::$variant => $code ),+
                }
            }

            /// Returns the canonical name of this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }

            /// Resolves a numeric constant.
            pub fn from_code(code: u8) -> Result<Self> {
                match code {
                    $( $code => Ok(Self::$variant), )+
                    _ => Err(Error::InvalidOption {
                        option: $option,
                        value: code.to_string(),
                    }),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(value: &str) -> Result<Self> {
                match normalize(value).as_str() {
                    $( $label => Ok(Self::$variant), )+
                    _ => Err(Error::InvalidOption {
                        option: $option,
                        value: value.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                match RawOption::deserialize(deserializer)? {
                    RawOption::Name(name) => name.parse(),
                    RawOption::Code(code) => Self::from_code(code),
                }
                .map_err(D::Error::custom)
            }
        }
    };
}

traversal_option! {
    /// Search strategy.
    Strategy ("strategy", default = DepthFirst) {
        /// Level-by-level expansion.
        BreadthFirst = 0 => "breadthfirst",
        /// Branch-by-branch expansion.
        DepthFirst = 1 => "depthfirst",
        /// A* shortest path to one end vertex.
        AStar = 2 => "astar",
        /// Dijkstra shortest path to one end vertex.
        Dijkstra = 3 => "dijkstra",
        /// Dijkstra shortest paths to a set of end vertices.
        DijkstraMulti = 4 => "dijkstramulti",
    }
}

traversal_option! {
    /// When the visitor is called relative to expansion.
    Order ("order", default = PreOrder) {
        /// Visit before the children.
        PreOrder = 0 => "preorder",
        /// Visit after the children.
        PostOrder = 1 => "postorder",
        /// Visit once, after expansion, passing the connections to the visitor.
        PreOrderExpander = 2 => "preorderexpander",
    }
}

traversal_option! {
    /// Order in which the connections of a vertex are processed.
    ItemOrder ("itemOrder", default = Forward) {
        /// Expander order.
        Forward = 0 => "forward",
        /// Reverse expander order.
        Backward = 1 => "backward",
    }
}

traversal_option! {
    /// Scope of the "already visited" bookkeeping.
    UniquenessScope ("uniqueness", default = None) {
        /// No uniqueness check.
        None = 0 => "none",
        /// Unique within the current path.
        Path = 1 => "path",
        /// Unique across the whole traversal.
        Global = 2 => "global",
    }
}

traversal_option! {
    /// Built-in expander selection.
    ExpanderKind ("expander", default = Outbound) {
        /// Follow outgoing edges.
        Outbound = 0 => "outbound",
        /// Follow incoming edges.
        Inbound = 1 => "inbound",
        /// Follow edges in both directions.
        Any = 2 => "any",
    }
}

/// `UniquenessScope::None` as a numeric constant.
pub const UNIQUE_NONE: u8 = UniquenessScope::None.code();
/// `UniquenessScope::Path` as a numeric constant.
pub const UNIQUE_PATH: u8 = UniquenessScope::Path.code();
/// `UniquenessScope::Global` as a numeric constant.
pub const UNIQUE_GLOBAL: u8 = UniquenessScope::Global.code();
/// `Strategy::BreadthFirst` as a numeric constant.
pub const BREADTH_FIRST: u8 = Strategy::BreadthFirst.code();
/// `Strategy::DepthFirst` as a numeric constant.
pub const DEPTH_FIRST: u8 = Strategy::DepthFirst.code();
/// `Strategy::AStar` as a numeric constant.
pub const ASTAR_SEARCH: u8 = Strategy::AStar.code();
/// `Strategy::Dijkstra` as a numeric constant.
pub const DIJKSTRA_SEARCH: u8 = Strategy::Dijkstra.code();
/// `Strategy::DijkstraMulti` as a numeric constant.
pub const DIJKSTRA_SEARCH_MULTI: u8 = Strategy::DijkstraMulti.code();
/// `Order::PreOrder` as a numeric constant.
pub const PRE_ORDER: u8 = Order::PreOrder.code();
/// `Order::PostOrder` as a numeric constant.
pub const POST_ORDER: u8 = Order::PostOrder.code();
/// `Order::PreOrderExpander` as a numeric constant.
pub const PRE_ORDER_EXPANDER: u8 = Order::PreOrderExpander.code();
/// `ItemOrder::Forward` as a numeric constant.
pub const FORWARD: u8 = ItemOrder::Forward.code();
/// `ItemOrder::Backward` as a numeric constant.
pub const BACKWARD: u8 = ItemOrder::Backward.code();

impl Strategy {
    /// Returns true if the strategy needs an end vertex to run.
    #[must_use]
    pub const fn requires_end_vertex(self) -> bool {
        matches!(self, Self::AStar | Self::Dijkstra | Self::DijkstraMulti)
    }
}

/// Uniqueness rules for vertices and edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniquenessConfig {
    /// Scope for vertex uniqueness.
    pub vertices: UniquenessScope,
    /// Scope for edge uniqueness.
    pub edges: UniquenessScope,
}

impl Default for UniquenessConfig {
    fn default() -> Self {
        Self {
            vertices: UniquenessScope::None,
            edges: UniquenessScope::Path,
        }
    }
}

impl UniquenessConfig {
    /// Creates uniqueness rules.
    #[must_use]
    pub fn new(vertices: UniquenessScope, edges: UniquenessScope) -> Self {
        Self { vertices, edges }
    }

    /// Returns true if any uniqueness check is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.vertices != UniquenessScope::None || self.edges != UniquenessScope::None
    }
}

fn one_or_many<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(label) => vec![label],
        OneOrMany::Many(labels) => labels,
    })
}

/// Serialisable traversal options.
///
/// Function-valued options (visitor, filters, custom expanders, comparators)
/// are set on [`TraverserConfigBuilder`](super::TraverserConfigBuilder)
/// directly; everything else can come from here.
///
/// # Example
///
/// ```rust
/// use docgraph_traversal::traversal::{Strategy, TraversalOptions, UniquenessScope};
///
/// let options = TraversalOptions::from_toml_str(
///     r#"
///     strategy = "breadth-first"
///     max_depth = 3
///
///     [uniqueness]
///     vertices = "global"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(options.strategy, Strategy::BreadthFirst);
/// assert_eq!(options.uniqueness.vertices, UniquenessScope::Global);
/// assert_eq!(options.max_depth, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalOptions {
    /// Search strategy.
    pub strategy: Strategy,
    /// Visitation order.
    pub order: Order,
    /// Connection processing order.
    #[serde(alias = "itemOrder")]
    pub item_order: ItemOrder,
    /// Uniqueness rules.
    pub uniqueness: UniquenessConfig,
    /// Built-in expander.
    pub expander: ExpanderKind,
    /// Maximum number of strategy iterations.
    #[serde(alias = "maxIterations")]
    pub max_iterations: u64,
    /// Paths with at most this many vertices are not visited.
    #[serde(alias = "minDepth")]
    pub min_depth: usize,
    /// Paths with more than this many vertices are not expanded.
    #[serde(alias = "maxDepth")]
    pub max_depth: Option<usize>,
    /// Fetch neighbour documents (`false` builds `_id`/`_key` stubs).
    #[serde(alias = "buildVertices")]
    pub build_vertices: bool,
    /// Edge labels accepted by the label-restricted expanders.
    #[serde(deserialize_with = "one_or_many")]
    pub labels: Vec<String>,
    /// Examples for the matching-attributes filter.
    #[serde(alias = "matchingAttributes")]
    pub matching_attributes: Vec<Map<String, Value>>,
    /// Edge attribute holding the edge weight.
    pub weight: Option<String>,
    /// Weight used when an edge has no numeric weight attribute.
    #[serde(alias = "defaultWeight")]
    pub default_weight: Option<f64>,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            order: Order::default(),
            item_order: ItemOrder::default(),
            uniqueness: UniquenessConfig::default(),
            expander: ExpanderKind::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            min_depth: 0,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            build_vertices: true,
            labels: Vec::new(),
            matching_attributes: Vec::new(),
            weight: None,
            default_weight: None,
        }
    }
}

impl TraversalOptions {
    /// Returns the figment used by [`load`](Self::load): the TOML file, then
    /// `DOCGRAPH_TRAVERSAL_*` environment variables (nested keys separated by
    /// `__`). Options found in neither keep their default.
    ///
    /// Each option must be spelled one way across all sources; `maxDepth` in
    /// the file and `DOCGRAPH_TRAVERSAL_MAX_DEPTH` together are a duplicate.
    #[must_use]
    pub fn figment<P: AsRef<Path>>(path: P) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads options from a TOML file and the environment.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::figment(path).extract()?)
    }

    /// Parses options from a TOML string on top of the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Figment::from(Toml::string(toml)).extract()?)
    }
}
