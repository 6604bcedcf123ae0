//! Error types for graph traversal.
//!
//! Every variant carries a stable numeric code (see [`Error::code`]) so that
//! callers bridging to a remote document store can report errors with the
//! same numbers the server uses.

use thiserror::Error;

/// Generic "bad parameter" code, shared by configuration and invocation errors.
pub const ERROR_BAD_PARAMETER: i32 = 10;
/// The traversal was cancelled through its abort signal.
pub const ERROR_TRAVERSAL_ABORTED: i32 = 1500;
/// A referenced document does not exist.
pub const ERROR_DOCUMENT_NOT_FOUND: i32 = 1202;
/// A document with the same handle already exists.
pub const ERROR_DOCUMENT_CONFLICT: i32 = 1210;
/// A document lacks a required system attribute.
pub const ERROR_INVALID_DOCUMENT: i32 = 1221;
/// The iteration counter exceeded `max_iterations`.
pub const ERROR_GRAPH_TOO_MANY_ITERATIONS: i32 = 1909;
/// A filter returned a token that is not a valid directive.
pub const ERROR_GRAPH_INVALID_FILTER_RESULT: i32 = 1910;

/// Traversal error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter passed to the traverser or its builder.
    #[error("bad parameter: {0}")]
    BadParameter(String),

    /// An enumerated option could not be resolved.
    #[error("bad parameter: invalid value '{value}' for option '{option}'")]
    InvalidOption {
        /// Name of the offending option.
        option: &'static str,
        /// The rejected value, as given.
        value: String,
    },

    /// Traversal options could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A document lookup failed.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// A document with the same handle already exists.
    #[error("unique constraint violated: {0}")]
    DocumentConflict(String),

    /// A document is missing a required attribute or has the wrong shape.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The traversal ran for more iterations than allowed.
    #[error("too many iterations - try increasing the value of 'max_iterations' (limit: {0})")]
    TooManyIterations(u64),

    /// A filter produced an unknown directive.
    #[error("invalid filter result: '{0}'")]
    InvalidFilterResult(String),

    /// The traversal was intentionally aborted.
    #[error("traversal aborted")]
    Aborted,
}

impl Error {
    /// Returns the numeric error code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::BadParameter(_) | Self::InvalidOption { .. } | Self::Config(_) => {
                ERROR_BAD_PARAMETER
            }
            Self::DocumentNotFound(_) => ERROR_DOCUMENT_NOT_FOUND,
            Self::DocumentConflict(_) => ERROR_DOCUMENT_CONFLICT,
            Self::InvalidDocument(_) => ERROR_INVALID_DOCUMENT,
            Self::TooManyIterations(_) => ERROR_GRAPH_TOO_MANY_ITERATIONS,
            Self::InvalidFilterResult(_) => ERROR_GRAPH_INVALID_FILTER_RESULT,
            Self::Aborted => ERROR_TRAVERSAL_ABORTED,
        }
    }

    /// Returns true for the intentional-abort marker.
    ///
    /// This is the only error the traverser swallows.
    #[must_use]
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for traversal operations.
pub type Result<T> = std::result::Result<T, Error>;
