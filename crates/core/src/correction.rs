//! Spelling correction results

use serde::{Deserialize, Serialize};

/// A single token rewritten by the fuzzy corrector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCorrection {
    /// Token as it appeared in the input
    pub original: String,
    /// Vocabulary entry it was replaced with
    pub corrected: String,
    /// Token-set similarity between the two (0-100)
    pub score: u8,
    /// Byte offset of the token in the input
    pub start: usize,
    pub end: usize,
}

/// Corrected text plus an overall confidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub text: String,
    /// Token-set similarity of `text` to the input (0-100)
    pub confidence: u8,
    pub corrections: Vec<TokenCorrection>,
}

impl CorrectionResult {
    /// Result for text that needed no change
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 100,
            corrections: Vec::new(),
        }
    }

    pub fn is_modified(&self) -> bool {
        !self.corrections.is_empty()
    }
}
