//! Keyword intent and entity classifier
//!
//! Reference `IntentClassifier` driven entirely by domain configuration:
//! an intent fires when one of its keywords occurs as a whole word, and
//! entity mentions are the vocabulary terms and conversion keys found in
//! the text.
//!
//! # Example
//!
//! ```
//! use chat_context_text_processing::KeywordClassifier;
//!
//! let classifier = KeywordClassifier::new(
//!     vec![("offer".to_string(), vec!["price".to_string()])],
//!     vec!["adsl".to_string()],
//! );
//! assert_eq!(classifier.detect_intents("price of adsl"), vec!["offer"]);
//! assert_eq!(classifier.extract_entities("price of adsl"), vec!["adsl"]);
//! ```

use async_trait::async_trait;

use chat_context_core::{Classification, IntentClassifier, IntentCandidates, Result};

use crate::substitution::find_whole_words;

/// Classifier matching configured keywords on whole words
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    /// Intent name -> lowercase keywords, in configuration order
    intents: Vec<(String, Vec<String>)>,
    /// Lowercase entity terms
    entity_terms: Vec<String>,
}

impl KeywordClassifier {
    pub fn new(intents: Vec<(String, Vec<String>)>, entity_terms: Vec<String>) -> Self {
        let intents = intents
            .into_iter()
            .map(|(name, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (name, keywords)
            })
            .collect();

        let mut terms: Vec<String> = Vec::new();
        for term in entity_terms {
            let term = term.trim().to_lowercase();
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }

        Self {
            intents,
            entity_terms: terms,
        }
    }

    /// Intent labels whose keywords occur in the text, configuration order
    pub fn detect_intents(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.intents
            .iter()
            .filter(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|k| !find_whole_words(&lower, k).is_empty())
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Entity mentions in order of appearance
    ///
    /// Overlapping matches resolve to the longest term, so `idoom fibre`
    /// wins over `fibre`. Each mention is reported once.
    pub fn extract_entities(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut matches: Vec<(usize, usize, &str)> = self
            .entity_terms
            .iter()
            .flat_map(|term| {
                find_whole_words(&lower, term)
                    .into_iter()
                    .map(move |(start, end)| (start, end, term.as_str()))
            })
            .collect();
        matches.sort_by(|a, b| a.0.cmp(&b.0).then((b.1 - b.0).cmp(&(a.1 - a.0))));

        let mut entities: Vec<String> = Vec::new();
        let mut cursor = 0;
        for (start, end, term) in matches {
            if start < cursor {
                continue;
            }
            cursor = end;
            if !entities.iter().any(|e| e == term) {
                entities.push(term.to_string());
            }
        }
        entities
    }
}

#[async_trait]
impl IntentClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        let intents = self.detect_intents(text);
        let entities = self.extract_entities(text);
        tracing::debug!(
            intents = ?intents,
            entities = ?entities,
            "Keyword classification"
        );
        Ok(Classification {
            intents: IntentCandidates::new(intents),
            entities,
        })
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
