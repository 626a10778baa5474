//! Vocabulary configuration
//!
//! Fuzzy-matching vocabulary, entity conversion table, ordered spelling
//! rewrite rules and the word lists used by the rule-based tagger.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One regex rewrite rule
///
/// `replacement` may reference capture groups with `$1` or `${name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingRule {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Domain terms the fuzzy corrector corrects towards, in priority order
    #[serde(default)]
    pub terms: Vec<String>,
    /// Entity mention (any case) -> canonical key
    #[serde(default)]
    pub conversions: HashMap<String, String>,
    /// Applied in list order, each rule sees the output of the previous one
    #[serde(default)]
    pub spelling_rules: Vec<SpellingRule>,
    /// Words never considered for correction
    #[serde(default)]
    pub stopwords: Vec<String>,
    /// Verb forms never considered for correction
    #[serde(default)]
    pub verbs: Vec<String>,
}

impl VocabularyConfig {
    /// Conversion table with lowercase keys
    pub fn normalized_conversions(&self) -> HashMap<String, String> {
        self.conversions
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.clone()))
            .collect()
    }

    /// Terms, lowercased and deduplicated, first occurrence wins
    pub fn unique_terms(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect()
    }

    pub fn has_term(&self, term: &str) -> bool {
        let term_lower = term.to_lowercase();
        self.terms.iter().any(|t| t.to_lowercase() == term_lower)
    }
}
