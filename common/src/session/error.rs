use thiserror::Error;

use crate::check::TemplateError;

/// Failures surfaced by session operations.
///
/// Lifecycle misuse (operating on a session that was never initialized or
/// has been torn down) is deliberately not represented here: that is a
/// programming error and panics instead.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A payload failed structural validation at an ingress point.
    #[error("{0}")]
    Validation(#[from] TemplateError),

    /// A remote fetch could not produce a response body.
    #[error("catalog fetch failed: {0}")]
    Transport(String),

    /// The editor widget handed back something unusable.
    #[error("editor widget error: {0}")]
    Widget(String),

    /// The current template could not be serialized.
    #[error("template serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
