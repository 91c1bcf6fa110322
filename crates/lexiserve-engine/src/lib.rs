//! Lexiserve Engine
//!
//! The language-processing side of Lexiserve: parsing and indexing of the
//! bilingual lexicon model, rule-based lemmatizers, the inference pipeline
//! seam, and the one-shot model loader.
//!
//! A pipeline is loaded exactly once per process and shared read-only by
//! all in-flight requests; every type in this crate is immutable after
//! construction.

pub mod lemma;
pub mod lexicon;
pub mod loader;
pub mod normalize;
pub mod pipeline;

pub use lemma::{EnglishLemmatizer, FrenchLemmatizer};
pub use lexicon::Lexicon;
pub use loader::{ModelConfig, PipelineLoader};
pub use normalize::{clean_query, EntryCleaner};
pub use pipeline::{LemmaPipeline, TextPipeline, TranslationPipeline};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::lexicon::Lexicon;
    pub use crate::loader::{ModelConfig, PipelineLoader};
    pub use crate::pipeline::{TextPipeline, TranslationPipeline};
}
