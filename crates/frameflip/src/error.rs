use thiserror::Error;

/// Errors reported while building or querying animation data.
///
/// Only construction and lookup paths fail. Per-tick calls (`Player::update`,
/// `Animator::update`, seeks) clamp or no-op instead of returning errors.
#[derive(Debug, Error)]
pub enum AnimError {
    /// A construction parameter was rejected (empty grid, zero frame time).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A stream was queried before it was successfully built.
    #[error("the stream was not properly initialized")]
    NotInitialized,
    /// A sheet referenced an atlas the lookup does not know.
    #[error("unknown atlas: {0}")]
    UnknownAtlas(String),
}

impl AnimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AnimError::InvalidArgument(msg.into())
    }
}
