//! Render Error Types

use thiserror::Error;

/// Errors raised while putting a chart on screen
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The draw target refused an operation
    #[error("Draw target '{target}' failed: {reason}")]
    Target { target: String, reason: String },

    /// Two renderers were handed containers with the same id
    #[error("Duplicate draw target id: {0}")]
    DuplicateTarget(String),
}

impl RenderError {
    pub fn target(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Target {
            target: target.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;
