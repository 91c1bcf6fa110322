//! Rule-based lemmatizers
//!
//! Candidate generators rather than oracles: each lemmatizer returns the
//! surface form plus every plausible base form its rules produce, and the
//! caller filters candidates against the lexicon index. Misses are cheap,
//! so the rules stay small and deterministic.

use std::collections::HashMap;

/// Suffix rewrite rules: (suffix, replacement)
type SuffixRule = (&'static str, &'static str);

const EN_NOUN_RULES: &[SuffixRule] = &[
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("xes", "x"),
    ("zes", "z"),
    ("ves", "f"),
    ("s", ""),
];

const EN_VERB_RULES: &[SuffixRule] = &[
    ("ies", "y"),
    ("ying", "ie"),
    ("ing", ""),
    ("ing", "e"),
    ("ied", "y"),
    ("ed", ""),
    ("ed", "e"),
    ("es", ""),
    ("es", "e"),
    ("s", ""),
];

const FR_NOUN_RULES: &[SuffixRule] = &[
    ("eaux", "eau"),
    ("aux", "al"),
    ("x", ""),
    ("s", ""),
];

/// Endings of conjugated first-group verbs, mapped back to `-er`
const FR_VERB_RULES: &[SuffixRule] = &[
    ("issons", "ir"),
    ("issez", "ir"),
    ("issent", "ir"),
    ("issant", "ir"),
    ("aient", "er"),
    ("erons", "er"),
    ("eront", "er"),
    ("ant", "er"),
    ("ais", "er"),
    ("ait", "er"),
    ("ons", "er"),
    ("ez", "er"),
    ("ent", "er"),
    ("es", "er"),
    ("e", "er"),
];

/// English lemmatizer covering noun plurals and verb inflections
pub struct EnglishLemmatizer {
    irregular: HashMap<&'static str, &'static str>,
}

impl EnglishLemmatizer {
    pub fn new() -> Self {
        let irregular = HashMap::from([
            ("men", "man"),
            ("women", "woman"),
            ("children", "child"),
            ("feet", "foot"),
            ("teeth", "tooth"),
            ("geese", "goose"),
            ("mice", "mouse"),
            ("went", "go"),
            ("gone", "go"),
            ("was", "be"),
            ("were", "be"),
            ("been", "be"),
            ("is", "be"),
            ("are", "be"),
            ("has", "have"),
            ("had", "have"),
            ("did", "do"),
            ("done", "do"),
            ("said", "say"),
            ("made", "make"),
            ("took", "take"),
            ("taken", "take"),
            ("saw", "see"),
            ("seen", "see"),
        ]);
        Self { irregular }
    }

    /// Candidate lemmas for a word: the word itself first, then noun and
    /// verb base forms, deduplicated in generation order.
    pub fn lemmas(&self, word: &str) -> Vec<String> {
        let mut candidates = vec![word.to_string()];

        if let Some(&base) = self.irregular.get(word) {
            push_unique(&mut candidates, base.to_string());
        }
        apply_rules(word, EN_NOUN_RULES, &mut candidates);
        apply_rules(word, EN_VERB_RULES, &mut candidates);

        candidates
    }
}

impl Default for EnglishLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

/// French lemmatizer covering plural forms and first/second-group verbs
pub struct FrenchLemmatizer {
    irregular: HashMap<&'static str, &'static str>,
}

impl FrenchLemmatizer {
    pub fn new() -> Self {
        let irregular = HashMap::from([
            ("yeux", "oeil"),
            ("cieux", "ciel"),
            ("est", "etre"),
            ("sont", "etre"),
            ("suis", "etre"),
            ("ai", "avoir"),
            ("as", "avoir"),
            ("ont", "avoir"),
            ("va", "aller"),
            ("vont", "aller"),
            ("fait", "faire"),
            ("font", "faire"),
            ("dit", "dire"),
            ("peut", "pouvoir"),
            ("veut", "vouloir"),
            ("sait", "savoir"),
            ("vu", "voir"),
            ("pris", "prendre"),
            ("mis", "mettre"),
        ]);
        Self { irregular }
    }

    /// Candidate lemmas for a word, surface form first
    pub fn lemmas(&self, word: &str) -> Vec<String> {
        let mut candidates = vec![word.to_string()];

        if let Some(&base) = self.irregular.get(word) {
            push_unique(&mut candidates, base.to_string());
        }
        apply_rules(word, FR_NOUN_RULES, &mut candidates);
        apply_rules(word, FR_VERB_RULES, &mut candidates);

        candidates
    }
}

impl Default for FrenchLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_rules(word: &str, rules: &[SuffixRule], candidates: &mut Vec<String>) {
    for &(suffix, replacement) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            // Degenerate stems like "s" -> "" are never useful
            if stem.chars().count() < 2 {
                continue;
            }
            push_unique(candidates, format!("{}{}", stem, replacement));
        }
    }
}

fn push_unique(candidates: &mut Vec<String>, candidate: String) {
    if !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}
