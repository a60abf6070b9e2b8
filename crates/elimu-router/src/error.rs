//! Route table construction errors.

use thiserror::Error;

/// Result type for route table construction.
pub type Result<T> = std::result::Result<T, RouterError>;

/// Problems found while building a [`RouteTable`](crate::RouteTable).
///
/// Matching itself never fails; an unmatched path is a `None` result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RouterError {
    /// Two routes share a name.
    #[error("duplicate route name: {0}")]
    DuplicateName(String),

    /// A static path or dynamic prefix is not in normalized form.
    #[error("route '{name}' has a non-normalized path: {path}")]
    UnnormalizedPath {
        /// Route name.
        name: String,
        /// Offending path.
        path: String,
    },

    /// A dynamic segment has no parameter name.
    #[error("route '{0}' has an empty parameter name")]
    EmptyParam(String),
}
