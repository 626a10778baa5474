//! Spelling correction against the domain vocabulary
//!
//! Scores are token-set similarities in `[0, 100]`; a token is rewritten only
//! when its best vocabulary match reaches the configured threshold.

mod fuzzy_corrector;
mod similarity;

pub use fuzzy_corrector::{FuzzyCorrector, FuzzyCorrectorConfig, DEFAULT_THRESHOLD};
pub use similarity::{best_match, full_process, ratio, token_set_ratio};
