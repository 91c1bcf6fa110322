//! Error types for Lexiserve

use crate::request::ValidationError;

/// Result type alias using Lexiserve's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Lexiserve operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model loading errors (fatal, startup-only)
    #[error("model load error: {0}")]
    ModelLoad(String),

    /// Request validation errors (client-caused, recoverable)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Inference execution errors (server-caused, per-request)
    #[error("inference error: {0}")]
    Inference(String),

    /// Per-request deadline expired
    #[error("operation timed out")]
    Timeout,

    /// Pipeline not yet loaded, or load failed
    #[error("pipeline is not ready")]
    NotReady,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new model load error
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable machine-readable code for this error.
    ///
    /// Codes are part of the wire contract: clients and operators match on
    /// them, so they never change even when messages are reworded.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ModelLoad(_) => "model_load",
            Self::Validation(e) => e.code(),
            Self::Inference(_) => "inference",
            Self::Timeout => "timeout",
            Self::NotReady => "not_ready",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(Error::model_load("missing file").code(), "model_load");
        assert_eq!(Error::inference("boom").code(), "inference");
        assert_eq!(Error::Timeout.code(), "timeout");
        assert_eq!(Error::NotReady.code(), "not_ready");
    }

    #[test]
    fn test_validation_error_code_passthrough() {
        let err = Error::from(ValidationError::EmptyText);
        assert_eq!(err.code(), "empty_text");
        assert_eq!(err.to_string(), "text must not be empty");
    }
}
