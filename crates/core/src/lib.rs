//! Core traits and types for the conversational context resolver
//!
//! This crate provides foundational types used across all other crates:
//! - Turn data (utterances, intent candidates, resolved context)
//! - Correction results produced by the spelling corrector
//! - Collaborator traits (classifier, tagger, context store)
//! - Error types

pub mod conversation;
pub mod correction;
pub mod error;
pub mod traits;

pub use conversation::{
    Classification, ContextRecord, IntentCandidates, ResolvedContext, SessionId, Utterance,
};
pub use correction::{CorrectionResult, TokenCorrection};
pub use error::{Error, Result};

pub use traits::{ContextStore, IntentClassifier, PartOfSpeech, TokenInfo, TokenTagger};
