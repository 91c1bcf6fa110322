//! Bilingual dictionary parsing and lookup
//!
//! A lexicon artifact is a plain-text file with one entry per line:
//!
//! ```text
//! headword {pos} /phonetics/ :: translation
//! ```
//!
//! Entries are indexed by the lowercased headword (the phrase before the
//! first `{`). Some entries carry no translation of their own and instead
//! point at another headword with `SEE: other ::`; lookups follow those
//! references.

use aho_corasick::AhoCorasick;
use lexiserve_core::{Error, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// An immutable, indexed dictionary for one translation direction
pub struct Lexicon {
    /// Raw entry lines, in file order
    lines: Vec<String>,

    /// Lowercased headword -> indices into `lines`
    index: HashMap<String, Vec<usize>>,

    /// Number of lines that carry an indexable headword
    indexed_lines: usize,

    see_re: Regex,
}

impl Lexicon {
    /// Parse a dictionary artifact into an indexed lexicon
    pub fn parse(source: &str) -> Result<Self> {
        let headword_re = Regex::new(r"^(.*?)\s*\{")
            .map_err(|e| Error::model_load(format!("failed to compile headword pattern: {}", e)))?;
        let see_re = Regex::new(r"(?i)SEE:\s*(.*?)\s*::")
            .map_err(|e| Error::model_load(format!("failed to compile reference pattern: {}", e)))?;

        let mut lines = Vec::new();
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut indexed_lines = 0;

        for raw in source.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let id = lines.len();
            if let Some(caps) = headword_re.captures(line) {
                let key = caps[1].trim().to_lowercase();
                if !key.is_empty() {
                    index.entry(key).or_default().push(id);
                    indexed_lines += 1;
                }
            }
            lines.push(line.to_string());
        }

        Ok(Self {
            lines,
            index,
            indexed_lines,
            see_re,
        })
    }

    /// Number of indexed entries
    pub fn entry_count(&self) -> usize {
        self.indexed_lines
    }

    /// Whether the lexicon holds no indexed entries
    pub fn is_empty(&self) -> bool {
        self.indexed_lines == 0
    }

    /// Whether the given lowercased phrase is a known headword
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Direct headword lookup, following `SEE:` references.
    ///
    /// A reference is substituted for the referring entry only when it
    /// resolves to at most two entries; a dangling reference keeps the
    /// referring entry itself. A visited set bounds reference chains, so
    /// cyclic dictionaries terminate.
    pub fn lookup(&self, key: &str) -> Vec<&str> {
        let mut visited = HashSet::new();
        self.lookup_inner(key, &mut visited)
    }

    fn lookup_inner<'a>(&'a self, key: &str, visited: &mut HashSet<String>) -> Vec<&'a str> {
        let key = key.to_lowercase();
        if !visited.insert(key.clone()) {
            return Vec::new();
        }

        let mut results = Vec::new();
        let Some(ids) = self.index.get(&key) else {
            return results;
        };

        for &id in ids {
            let line = self.lines[id].as_str();
            match self.see_reference(line) {
                Some(reference) => {
                    let resolved = self.lookup_inner(&reference, visited);
                    if !resolved.is_empty() && resolved.len() <= 2 {
                        results.extend(resolved);
                    } else if resolved.is_empty() {
                        results.push(line);
                    }
                }
                None => results.push(line),
            }
        }

        results
    }

    /// Containment search over the translation side of every entry.
    ///
    /// Used as a fallback when no headword matched: finds entries whose
    /// text after `::` mentions the query, and returns them with source
    /// and target sides swapped.
    pub fn reverse_lookup(&self, query: &str) -> Result<Vec<(&str, &str)>> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build([query])
            .map_err(|e| Error::inference(format!("failed to build containment matcher: {}", e)))?;

        let mut results = Vec::new();
        for line in &self.lines {
            if let Some((before, after)) = line.split_once("::") {
                if matcher.is_match(after) {
                    results.push((after.trim(), before.trim()));
                }
            }
        }

        Ok(results)
    }

    /// Extract the target of a `SEE: other ::` reference, if present
    fn see_reference(&self, line: &str) -> Option<String> {
        self.see_re
            .captures(line)
            .map(|caps| caps[1].trim().to_string())
            .filter(|r| !r.is_empty())
    }
}

/// Whether the translation side of an entry contains any letters.
///
/// Entries whose right-hand side is only punctuation or digits are noise
/// and get filtered from results. Lines without a `::` separator pass.
pub fn has_letter_translation(line: &str) -> bool {
    match line.split_once("::") {
        Some((_, after)) => after.chars().any(|c| c.is_ascii_alphabetic()),
        None => true,
    }
}
