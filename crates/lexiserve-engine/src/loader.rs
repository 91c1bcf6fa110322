//! One-shot model loading
//!
//! Loading is a blocking, high-latency operation that runs exactly once
//! per process, on a worker thread, before any inference traffic is
//! admitted. A failed load is fatal: the caller reports failed health and
//! exits rather than serving degraded.

use lexiserve_core::{Error, PipelineCapability, PipelineMetadata, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::lexicon::Lexicon;
use crate::pipeline::{LemmaPipeline, TextPipeline, TranslationPipeline};

/// Version reported for loaded models
const MODEL_VERSION: &str = "1.0";

/// Configuration for loading the lexicon model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name/identifier, reported in results and health output
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Directory holding the model artifacts
    #[serde(default = "default_model_dir")]
    pub dir: PathBuf,

    /// English-to-French artifact filename
    #[serde(default = "default_en_fr_file")]
    pub en_fr_file: String,

    /// French-to-English artifact filename
    #[serde(default = "default_fr_en_file")]
    pub fr_en_file: String,

    /// Task the loaded pipeline serves
    #[serde(default = "default_task")]
    pub task: PipelineCapability,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            dir: default_model_dir(),
            en_fr_file: default_en_fr_file(),
            fr_en_file: default_fr_en_file(),
            task: default_task(),
        }
    }
}

impl ModelConfig {
    /// Create a configuration pointing at a model directory
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// Set the model name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the task the pipeline should serve
    pub fn with_task(mut self, task: PipelineCapability) -> Self {
        self.task = task;
        self
    }

    /// Set the artifact filenames
    pub fn with_artifacts(
        mut self,
        en_fr_file: impl Into<String>,
        fr_en_file: impl Into<String>,
    ) -> Self {
        self.en_fr_file = en_fr_file.into();
        self.fr_en_file = fr_en_file.into();
        self
    }
}

fn default_model_name() -> String {
    "wiktionary-fr-en".to_string()
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_en_fr_file() -> String {
    "en-fr.txt".to_string()
}

fn default_fr_en_file() -> String {
    "fr-en.txt".to_string()
}

fn default_task() -> PipelineCapability {
    PipelineCapability::Translation
}

/// Loads the configured model into an immutable, shareable pipeline
pub struct PipelineLoader;

impl PipelineLoader {
    /// Load both lexicon artifacts and assemble the configured pipeline.
    ///
    /// The hosting environment is responsible for placing the artifacts
    /// on disk before startup; this performs no fetching.
    pub fn load(config: &ModelConfig) -> Result<Arc<dyn TextPipeline>> {
        info!(model = %config.name, dir = %config.dir.display(), "loading pipeline model");

        let en_fr = Self::load_lexicon(&config.dir, &config.en_fr_file)?;
        let fr_en = Self::load_lexicon(&config.dir, &config.fr_en_file)?;

        let metadata = PipelineMetadata {
            name: config.name.clone(),
            version: MODEL_VERSION.to_string(),
            capability: config.task,
            en_fr_entries: en_fr.entry_count(),
            fr_en_entries: fr_en.entry_count(),
        };
        info!(
            en_fr_entries = metadata.en_fr_entries,
            fr_en_entries = metadata.fr_en_entries,
            capability = ?metadata.capability,
            "lexicon artifacts parsed"
        );

        let pipeline: Arc<dyn TextPipeline> = match config.task {
            PipelineCapability::Translation => {
                Arc::new(TranslationPipeline::new(en_fr, fr_en, metadata)?)
            }
            PipelineCapability::Lemmas => Arc::new(LemmaPipeline::new(en_fr, fr_en, metadata)),
        };

        Ok(pipeline)
    }

    fn load_lexicon(dir: &Path, file: &str) -> Result<Lexicon> {
        let path = dir.join(file);
        if !path.exists() {
            return Err(Error::model_load(format!(
                "model artifact not found: {}",
                path.display()
            )));
        }

        let source = std::fs::read_to_string(&path).map_err(|e| {
            Error::model_load(format!("failed to read {}: {}", path.display(), e))
        })?;

        let lexicon = Lexicon::parse(&source)?;
        if lexicon.is_empty() {
            return Err(Error::model_load(format!(
                "no parseable entries in {}",
                path.display()
            )));
        }

        Ok(lexicon)
    }
}
