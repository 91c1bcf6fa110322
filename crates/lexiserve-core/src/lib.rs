//! Lexiserve Core
//!
//! Core types, traits, and utilities shared across Lexiserve components.
//!
//! This crate provides:
//! - Common types for requests, translations, and inference results
//! - Request validation with stable, machine-readable reason codes
//! - Error types and result handling
//! - Process-wide health state with monotonic transitions

pub mod error;
pub mod health;
pub mod request;
pub mod types;

pub use error::{Error, Result};
pub use health::{HealthState, HealthStatus};
pub use request::{RawTextRequest, RequestLimits, TextRequest, ValidationError};
pub use types::{
    Annotation, AnnotationKind, Direction, Language, PipelineCapability, PipelineMetadata,
    TextResult, Translation,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::health::{HealthState, HealthStatus};
    pub use crate::request::{RawTextRequest, RequestLimits, TextRequest, ValidationError};
    pub use crate::types::{Direction, Language, TextResult, Translation};
}
