/// Convenience result type used across spudcat.
pub type SpudcatResult<T> = Result<T, SpudcatError>;

/// Top-level error type for spudcat APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpudcatError {
    /// Caller input is missing or malformed (for example a required subject image).
    #[error("validation error: {0}")]
    Validation(String),

    /// A font or embedded asset could not be loaded.
    #[error("resource error: {0}")]
    Resource(String),

    /// Frame composition failed.
    #[error("render error: {0}")]
    Render(String),

    /// The animated container could not be written.
    #[error("encode error: {0}")]
    Encode(String),

    /// A subject image source failed (network, status or decode).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpudcatError {
    /// Build [`SpudcatError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`SpudcatError::Resource`].
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build [`SpudcatError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build [`SpudcatError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build [`SpudcatError::Fetch`].
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
