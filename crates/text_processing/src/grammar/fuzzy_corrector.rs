//! Vocabulary-driven fuzzy spelling correction
//!
//! Tokens are rewritten in place by byte span, so a correction never
//! leaks into other words that merely contain the token.

use std::sync::Arc;

use chat_context_core::{CorrectionResult, TokenCorrection, TokenTagger};

use super::similarity::{best_match, full_process, token_set_ratio};
use crate::substitution::{apply_replacements, Replacement};

/// Minimum score for a token to be replaced
pub const DEFAULT_THRESHOLD: u8 = 70;

/// Configuration for fuzzy correction
#[derive(Debug, Clone)]
pub struct FuzzyCorrectorConfig {
    /// Minimum token-set score (0-100) for a replacement
    pub threshold: u8,
}

impl Default for FuzzyCorrectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Corrects tokens towards the closest domain vocabulary entry
#[derive(Clone)]
pub struct FuzzyCorrector {
    /// Lowercase terms in priority order
    vocabulary: Vec<String>,
    tagger: Arc<dyn TokenTagger>,
    config: FuzzyCorrectorConfig,
}

impl FuzzyCorrector {
    /// Create a corrector
    ///
    /// Vocabulary order matters: on equal scores the earlier term wins.
    pub fn new(
        vocabulary: Vec<String>,
        tagger: Arc<dyn TokenTagger>,
        config: FuzzyCorrectorConfig,
    ) -> Self {
        let mut corrector = Self {
            vocabulary: Vec::new(),
            tagger,
            config,
        };
        corrector.add_vocabulary(vocabulary);
        corrector
    }

    /// Add vocabulary terms, skipping blanks and duplicates
    pub fn add_vocabulary(&mut self, terms: Vec<String>) {
        for term in terms {
            let term = term.trim().to_lowercase();
            if !term.is_empty() && !self.vocabulary.contains(&term) {
                self.vocabulary.push(term);
            }
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn threshold(&self) -> u8 {
        self.config.threshold
    }

    /// Best vocabulary entry for a word, regardless of threshold
    pub fn find_best_match(&self, word: &str) -> Option<(String, u8)> {
        if full_process(word).is_empty() {
            return None;
        }
        best_match(word, &self.vocabulary).map(|(term, score)| (term.to_string(), score))
    }

    /// Correct text against the vocabulary
    ///
    /// Stopwords, numbers and verbs are never touched. The confidence is the
    /// token-set similarity of the corrected text to the input.
    pub fn correct_spelling(&self, text: &str) -> CorrectionResult {
        let mut replacements = Vec::new();
        let mut corrections = Vec::new();

        for token in self.tagger.tag(text) {
            if !token.is_correctable() {
                continue;
            }
            if text.get(token.start..token.end) != Some(token.text.as_str()) {
                tracing::warn!(
                    token = %token.text,
                    start = token.start,
                    end = token.end,
                    "Tagger span does not match text, skipping token"
                );
                continue;
            }

            let Some((term, score)) = self.find_best_match(&token.text) else {
                continue;
            };

            if score < self.config.threshold {
                tracing::trace!(token = %token.text, best = %term, score, "Below threshold");
                continue;
            }
            if term == token.text {
                continue;
            }

            tracing::debug!(
                original = %token.text,
                corrected = %term,
                score,
                "Token corrected"
            );
            replacements.push(Replacement {
                start: token.start,
                end: token.end,
                text: term.clone(),
            });
            corrections.push(TokenCorrection {
                original: token.text,
                corrected: term,
                score,
                start: token.start,
                end: token.end,
            });
        }

        let corrected = apply_replacements(text, &replacements);
        let confidence = token_set_ratio(&corrected, text);

        CorrectionResult {
            text: corrected,
            confidence,
            corrections,
        }
    }
}
