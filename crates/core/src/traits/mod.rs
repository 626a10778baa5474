//! Collaborator traits consumed by the resolver
//!
//! ```text
//! IntentClassifier: text -> intent candidates + entity mentions
//! TokenTagger:      text -> tokens with stopword/numeric/POS flags
//! ContextStore:     per-session last intent and last entity set
//! ```

mod classifier;
mod context_store;
mod tagger;

pub use classifier::IntentClassifier;
pub use context_store::ContextStore;
pub use tagger::{PartOfSpeech, TokenInfo, TokenTagger};
