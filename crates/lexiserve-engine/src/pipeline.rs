//! Inference pipelines
//!
//! The [`TextPipeline`] trait is the seam between the HTTP layer and the
//! language machinery. The task a process serves is picked once at load
//! time; both implementations are pure functions of the loaded artifacts,
//! so concurrent calls share a pipeline read-only.

use async_trait::async_trait;
use lexiserve_core::{
    Annotation, AnnotationKind, Direction, Language, PipelineMetadata, Result, TextRequest,
    TextResult, Translation,
};
use std::collections::HashSet;
use std::time::Instant;

use crate::lemma::{EnglishLemmatizer, FrenchLemmatizer};
use crate::lexicon::{has_letter_translation, Lexicon};
use crate::normalize::{clean_query, EntryCleaner};

/// A loaded language pipeline, shared read-only across requests
#[async_trait]
pub trait TextPipeline: Send + Sync {
    /// Run the pipeline against a validated request.
    ///
    /// Deterministic for a fixed model and input, apart from the timing
    /// field of the result.
    async fn infer(&self, request: &TextRequest) -> Result<TextResult>;

    /// Metadata describing the loaded model
    fn metadata(&self) -> &PipelineMetadata;
}

/// Bilingual dictionary translation
///
/// Lookup order mirrors the dictionary workflow: direct headword matches
/// in both directions, then lemmatized retries, then a reverse search
/// over the translation sides when nothing else matched.
pub struct TranslationPipeline {
    en_fr: Lexicon,
    fr_en: Lexicon,
    english: EnglishLemmatizer,
    french: FrenchLemmatizer,
    cleaner: EntryCleaner,
    metadata: PipelineMetadata,
}

impl TranslationPipeline {
    pub fn new(en_fr: Lexicon, fr_en: Lexicon, metadata: PipelineMetadata) -> Result<Self> {
        Ok(Self {
            en_fr,
            fr_en,
            english: EnglishLemmatizer::new(),
            french: FrenchLemmatizer::new(),
            cleaner: EntryCleaner::new()?,
            metadata,
        })
    }

    fn detect_language(&self, query: &str) -> Language {
        if self.en_fr.contains(query) {
            Language::En
        } else if self.fr_en.contains(query) {
            Language::Fr
        } else {
            Language::En
        }
    }

    fn lexicon(&self, direction: Direction) -> &Lexicon {
        match direction {
            Direction::EnFr => &self.en_fr,
            Direction::FrEn => &self.fr_en,
        }
    }

    fn entry_translation(&self, direction: Direction, line: &str) -> Translation {
        match line.split_once("::") {
            Some((source, target)) => Translation::new(
                direction,
                self.cleaner.clean(source),
                self.cleaner.clean(target),
            ),
            None => Translation::new(direction, self.cleaner.clean(line), ""),
        }
    }

    /// Direct headword matches for one direction
    fn direct_matches(&self, direction: Direction, query: &str, out: &mut Vec<Translation>) {
        for line in self.lexicon(direction).lookup(query) {
            if has_letter_translation(line) {
                out.push(self.entry_translation(direction, line));
            }
        }
    }

    /// Lemmatized retries for one direction, skipping the surface form
    fn lemma_matches(&self, direction: Direction, query: &str, out: &mut Vec<Translation>) {
        let lemmas = match direction {
            Direction::EnFr => self.english.lemmas(query),
            Direction::FrEn => self.french.lemmas(query),
        };
        for lemma in lemmas.iter().filter(|l| l.as_str() != query) {
            self.direct_matches(direction, lemma, out);
        }
    }

    /// Fallback containment search over both translation sides.
    ///
    /// Results come back with source and target swapped, labeled with the
    /// direction implied by the detected query language.
    fn reverse_matches(
        &self,
        query: &str,
        detected: Language,
        filter: Option<Direction>,
    ) -> Result<Vec<Translation>> {
        let direction = Direction::from_source(detected);
        if filter.is_some_and(|want| want != direction) {
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        for lexicon in [&self.en_fr, &self.fr_en] {
            for (source, target) in lexicon.reverse_lookup(query)? {
                if source.chars().any(|c| c.is_ascii_alphabetic()) {
                    out.push(Translation::new(
                        direction,
                        self.cleaner.clean(source),
                        self.cleaner.clean(target),
                    ));
                }
            }
        }
        Ok(out)
    }

    fn lemma_annotations(&self, query: &str, detected: Language) -> Vec<Annotation> {
        query
            .split_whitespace()
            .map(|token| Annotation {
                token: token.to_string(),
                lemmas: match detected {
                    Language::En => self.english.lemmas(token),
                    Language::Fr => self.french.lemmas(token),
                },
            })
            .collect()
    }
}

#[async_trait]
impl TextPipeline for TranslationPipeline {
    async fn infer(&self, request: &TextRequest) -> Result<TextResult> {
        let start = Instant::now();

        let query = clean_query(&request.text);
        let detected = self.detect_language(&query);

        let mut found = Vec::new();
        if !query.is_empty() {
            for direction in [Direction::EnFr, Direction::FrEn] {
                if request.direction.map_or(true, |want| want == direction) {
                    self.direct_matches(direction, &query, &mut found);
                }
            }
            for direction in [Direction::EnFr, Direction::FrEn] {
                if request.direction.map_or(true, |want| want == direction) {
                    self.lemma_matches(direction, &query, &mut found);
                }
            }
            if found.is_empty() {
                found = self.reverse_matches(&query, detected, request.direction)?;
            }
        }

        // Deduplicate on cleaned content, keeping first-seen order
        let mut seen = HashSet::new();
        let translations: Vec<Translation> = found
            .into_iter()
            .filter(|t| seen.insert((t.direction, t.source.clone(), t.target.clone())))
            .collect();

        let annotations = if request.annotations.contains(&AnnotationKind::Lemmas) {
            self.lemma_annotations(&query, detected)
        } else {
            Vec::new()
        };

        Ok(TextResult {
            input: request.text.clone(),
            normalized: query,
            detected_language: detected,
            translations,
            annotations,
            model: self.metadata.name.clone(),
            processing_time_us: start.elapsed().as_micros() as u64,
        })
    }

    fn metadata(&self) -> &PipelineMetadata {
        &self.metadata
    }
}

/// Per-token lemma tagging
///
/// The second arm of the configurable task: no dictionary lookups, just
/// lemma candidates for each token, with the lexicon indices used for
/// per-token language detection.
pub struct LemmaPipeline {
    en_fr: Lexicon,
    fr_en: Lexicon,
    english: EnglishLemmatizer,
    french: FrenchLemmatizer,
    metadata: PipelineMetadata,
}

impl LemmaPipeline {
    pub fn new(en_fr: Lexicon, fr_en: Lexicon, metadata: PipelineMetadata) -> Self {
        Self {
            en_fr,
            fr_en,
            english: EnglishLemmatizer::new(),
            french: FrenchLemmatizer::new(),
            metadata,
        }
    }

    fn token_lemmas(&self, token: &str) -> Vec<String> {
        if self.en_fr.contains(token) {
            self.english.lemmas(token)
        } else if self.fr_en.contains(token) {
            self.french.lemmas(token)
        } else {
            // Unknown token: offer candidates from both analyzers
            let mut lemmas = self.english.lemmas(token);
            for lemma in self.french.lemmas(token) {
                if !lemmas.contains(&lemma) {
                    lemmas.push(lemma);
                }
            }
            lemmas
        }
    }
}

#[async_trait]
impl TextPipeline for LemmaPipeline {
    async fn infer(&self, request: &TextRequest) -> Result<TextResult> {
        let start = Instant::now();

        let normalized = request.text.trim().to_lowercase();

        let mut en_hits = 0usize;
        let mut fr_hits = 0usize;
        let annotations: Vec<Annotation> = normalized
            .split_whitespace()
            .map(|token| {
                if self.en_fr.contains(token) {
                    en_hits += 1;
                } else if self.fr_en.contains(token) {
                    fr_hits += 1;
                }
                Annotation {
                    token: token.to_string(),
                    lemmas: self.token_lemmas(token),
                }
            })
            .collect();

        let detected_language = if fr_hits > en_hits {
            Language::Fr
        } else {
            Language::En
        };

        Ok(TextResult {
            input: request.text.clone(),
            normalized,
            detected_language,
            translations: Vec::new(),
            annotations,
            model: self.metadata.name.clone(),
            processing_time_us: start.elapsed().as_micros() as u64,
        })
    }

    fn metadata(&self) -> &PipelineMetadata {
        &self.metadata
    }
}
