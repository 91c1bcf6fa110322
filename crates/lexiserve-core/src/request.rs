//! Inbound request payloads and validation

use serde::{Deserialize, Serialize};

use crate::types::{AnnotationKind, Direction};

/// Limits applied to inbound requests before they reach the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLimits {
    /// Maximum accepted text length in characters, after trimming
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_text_chars: default_max_text_chars(),
        }
    }
}

fn default_max_text_chars() -> usize {
    512
}

/// Wire shape of a `/process` payload, before validation
///
/// Option fields arrive as plain strings and are checked against the
/// recognized sets by [`RawTextRequest::validate`]; nothing here is
/// trusted until a [`TextRequest`] has been constructed from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTextRequest {
    /// Text to process
    #[serde(default)]
    pub text: Option<String>,

    /// Requested translation direction: "auto", "en-fr", or "fr-en"
    #[serde(default)]
    pub direction: Option<String>,

    /// Requested annotation types
    #[serde(default)]
    pub annotations: Vec<String>,
}

/// A validated request, ready for inference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    /// Trimmed, non-empty input text
    pub text: String,

    /// Explicit direction, or `None` for automatic detection
    pub direction: Option<Direction>,

    /// Recognized annotation kinds to include in the result
    pub annotations: Vec<AnnotationKind>,
}

/// Typed validation failure with a stable reason code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Text field missing, or empty after trimming
    #[error("text must not be empty")]
    EmptyText,

    /// Text longer than the configured maximum
    #[error("text length {len} exceeds the maximum of {max} characters")]
    TextTooLong { len: usize, max: usize },

    /// Direction outside the recognized set
    #[error("unknown direction '{0}', expected one of: auto, en-fr, fr-en")]
    UnknownDirection(String),

    /// Annotation type outside the recognized set
    #[error("unknown annotation type '{0}', expected one of: lemmas")]
    UnknownAnnotation(String),
}

impl ValidationError {
    /// Stable machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyText => "empty_text",
            Self::TextTooLong { .. } => "text_too_long",
            Self::UnknownDirection(_) => "unknown_direction",
            Self::UnknownAnnotation(_) => "unknown_annotation",
        }
    }
}

impl RawTextRequest {
    /// Validate this payload against the configured limits.
    ///
    /// Checks run in a fixed order and the first violation wins; a
    /// [`TextRequest`] is only constructed when every check passes.
    pub fn validate(self, limits: &RequestLimits) -> Result<TextRequest, ValidationError> {
        let text = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ValidationError::EmptyText)?
            .to_string();

        let len = text.chars().count();
        if len > limits.max_text_chars {
            return Err(ValidationError::TextTooLong {
                len,
                max: limits.max_text_chars,
            });
        }

        let direction = match self.direction.as_deref() {
            None | Some("auto") => None,
            Some("en-fr") => Some(Direction::EnFr),
            Some("fr-en") => Some(Direction::FrEn),
            Some(other) => return Err(ValidationError::UnknownDirection(other.to_string())),
        };

        let mut annotations = Vec::with_capacity(self.annotations.len());
        for kind in &self.annotations {
            match kind.as_str() {
                "lemmas" => annotations.push(AnnotationKind::Lemmas),
                other => return Err(ValidationError::UnknownAnnotation(other.to_string())),
            }
        }

        Ok(TextRequest {
            text,
            direction,
            annotations,
        })
    }
}
