//! Token tagging trait used by the fuzzy corrector

use serde::{Deserialize, Serialize};

/// Coarse part of speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Verb,
    Num,
    Punct,
    Other,
}

/// One token of the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub text: String,
    /// Byte offsets into the tagged text
    pub start: usize,
    pub end: usize,
    pub is_stopword: bool,
    pub is_numeric: bool,
    pub pos: PartOfSpeech,
}

impl TokenInfo {
    /// Whether the corrector may try to rewrite this token
    pub fn is_correctable(&self) -> bool {
        !(self.is_stopword || self.is_numeric || self.pos == PartOfSpeech::Verb)
    }
}

/// Splits text into tagged tokens
pub trait TokenTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<TokenInfo>;
}
