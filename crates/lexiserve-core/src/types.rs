//! Core types for Lexiserve

use serde::{Deserialize, Serialize};

/// Translation direction between the two supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// English to French
    #[serde(rename = "en-fr")]
    EnFr,

    /// French to English
    #[serde(rename = "fr-en")]
    FrEn,
}

impl Direction {
    /// Direction whose source side is the given language
    pub fn from_source(language: Language) -> Self {
        match language {
            Language::En => Self::EnFr,
            Language::Fr => Self::FrEn,
        }
    }

    /// Source language of this direction
    pub fn source_language(&self) -> Language {
        match self {
            Self::EnFr => Language::En,
            Self::FrEn => Language::Fr,
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

/// A single translation entry produced by the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Direction this entry translates in
    pub direction: Direction,

    /// Source side of the dictionary entry, cleaned for presentation
    pub source: String,

    /// Target side of the dictionary entry, cleaned for presentation
    pub target: String,
}

impl Translation {
    /// Create a new translation entry
    pub fn new(direction: Direction, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            direction,
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Kinds of annotations a request may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Per-token lemma annotations
    Lemmas,
}

/// A per-token annotation attached to a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The token as it appeared in the normalized input
    pub token: String,

    /// Candidate lemmas for the token, deduplicated, token first
    pub lemmas: Vec<String>,
}

/// What a loaded pipeline is able to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineCapability {
    /// Bilingual dictionary translation
    Translation,

    /// Per-token lemma tagging
    Lemmas,
}

/// Metadata describing a loaded pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineMetadata {
    /// Model name/identifier
    pub name: String,

    /// Model version
    pub version: String,

    /// Task the pipeline serves
    pub capability: PipelineCapability,

    /// Number of English-to-French entries loaded
    pub en_fr_entries: usize,

    /// Number of French-to-English entries loaded
    pub fr_en_entries: usize,
}

/// Structured result of one inference call
///
/// Created per request and immutable once returned; apart from
/// `processing_time_us` the contents are a pure function of the loaded
/// model and the validated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextResult {
    /// The text exactly as submitted
    pub input: String,

    /// The normalized query the pipeline operated on
    pub normalized: String,

    /// Detected source language of the query
    pub detected_language: Language,

    /// Ordered, deduplicated translation entries
    pub translations: Vec<Translation>,

    /// Requested annotations, empty unless asked for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    /// Name of the model that produced this result
    pub model: String,

    /// Wall-clock inference time in microseconds
    pub processing_time_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serde_names() {
        assert_eq!(serde_json::to_string(&Direction::EnFr).unwrap(), "\"en-fr\"");
        assert_eq!(serde_json::to_string(&Direction::FrEn).unwrap(), "\"fr-en\"");
    }

    #[test]
    fn test_direction_from_source() {
        assert_eq!(Direction::from_source(Language::En), Direction::EnFr);
        assert_eq!(Direction::from_source(Language::Fr), Direction::FrEn);
        assert_eq!(Direction::EnFr.source_language(), Language::En);
    }

    #[test]
    fn test_text_result_round_trip() {
        let result = TextResult {
            input: "Bonjour".to_string(),
            normalized: "bonjour".to_string(),
            detected_language: Language::Fr,
            translations: vec![Translation::new(Direction::FrEn, "bonjour", "hello")],
            annotations: Vec::new(),
            model: "wiktionary-fr-en".to_string(),
            processing_time_us: 42,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["detected_language"], "fr");
        assert_eq!(json["translations"][0]["target"], "hello");
        // Empty annotation lists stay off the wire
        assert!(json.get("annotations").is_none());
    }
}
