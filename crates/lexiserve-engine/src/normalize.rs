//! Query and entry text normalization

use lexiserve_core::{Error, Result};
use regex::Regex;

/// Leading articles stripped from French queries, checked in order
const FRENCH_ARTICLES: [&str; 4] = ["le ", "la ", "les ", "l'"];

/// Normalize a query for headword lookup.
///
/// Lowercases and trims, drops a leading English infinitive marker
/// (`to `), then strips French articles so `le chat` and `chat` hit the
/// same index slot.
pub fn clean_query(raw: &str) -> String {
    let mut word = raw.trim().to_lowercase();

    if let Some(rest) = word.strip_prefix("to ") {
        word = rest.to_string();
    }
    for article in FRENCH_ARTICLES {
        if let Some(rest) = word.strip_prefix(article) {
            word = rest.to_string();
        }
    }

    word
}

/// Cleans dictionary entry text for presentation
///
/// Removes phonetic segments (`/.../`) and collapses the whitespace that
/// dictionary files leave after `}` markers.
pub struct EntryCleaner {
    phonetics_re: Regex,
    brace_space_re: Regex,
}

impl EntryCleaner {
    /// Compile the cleanup patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            phonetics_re: Regex::new(r"/[^/]+/")
                .map_err(|e| Error::model_load(format!("failed to compile phonetics pattern: {}", e)))?,
            brace_space_re: Regex::new(r"\}\s+")
                .map_err(|e| Error::model_load(format!("failed to compile spacing pattern: {}", e)))?,
        })
    }

    /// Clean one side of a dictionary entry
    pub fn clean(&self, text: &str) -> String {
        let without_braceruns = self.brace_space_re.replace_all(text, "} ");
        let without_phonetics = self.phonetics_re.replace_all(&without_braceruns, "");
        without_phonetics.trim().to_string()
    }
}
