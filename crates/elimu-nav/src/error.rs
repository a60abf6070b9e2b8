//! View construction errors.

use elimu_api::ApiError;
use elimu_model::ModelError;
use thiserror::Error;

/// Result type for view construction.
pub type Result<T> = std::result::Result<T, RenderError>;

/// A view could not be built.
///
/// The controller catches these at its boundary and mounts the generic error
/// view instead; they never escape `navigate` or `handle_event`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The matched route did not provide a parameter the view needs.
    #[error("missing route parameter: {0}")]
    MissingParam(&'static str),

    /// A route parameter could not be interpreted.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A deferred data load failed in a way the view did not handle.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl RenderError {
    /// Whether the failure is a cancelled load, which is never shown.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Api(ApiError::Cancelled))
    }
}
