/// Convenience result type used across framescroll.
pub type FramescrollResult<T> = Result<T, FramescrollError>;

/// Errors surfaced by construction and configuration APIs.
///
/// Runtime failures of the animation itself (a frame that fails to load, a paint with
/// nothing to draw) are not errors; they degrade to "keep the last frame on screen".
#[derive(thiserror::Error, Debug)]
pub enum FramescrollError {
    /// Invalid user-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramescrollError {
    /// Build a [`FramescrollError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramescrollError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FramescrollError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
