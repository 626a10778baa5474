//! Text processing for the context resolver
//!
//! This crate provides:
//! - **Normalization**: diacritic folding, lowercasing, noise stripping
//! - **Spelling rules**: ordered regex rewrite table loaded from config
//! - **Entity canonicalization**: mention -> canonical key, with mention rewriting
//! - **Fuzzy correction**: token-set matching against the domain vocabulary
//! - **Tagging**: rule-based stopword/number/verb tagging
//! - **Intent classification**: keyword classifier driven by config
//!
//! # Example
//!
//! ```
//! use chat_context_text_processing::normalize;
//!
//! assert_eq!(normalize("Prix de l'ADSL à Alger ?"), "prix de l'adsl a alger  ");
//! ```

pub mod entities;
pub mod grammar;
pub mod intent;
pub mod normalizer;
pub mod substitution;
pub mod tagger;

mod error;

pub use error::{Result, TextProcessingError};

pub use entities::EntityCanonicalizer;
pub use grammar::{
    full_process, ratio, token_set_ratio, FuzzyCorrector, FuzzyCorrectorConfig,
};
pub use intent::KeywordClassifier;
pub use normalizer::{normalize, SpellingRules};
pub use tagger::RuleBasedTagger;
