//! Entity canonicalization
//!
//! Maps entity mentions to canonical keys through the configured conversion
//! table, and rewrites the mentions inside the text so later stages see the
//! canonical form.

use std::collections::HashMap;

use crate::substitution::replace_whole_words;

/// Mention -> canonical key lookup
#[derive(Debug, Clone, Default)]
pub struct EntityCanonicalizer {
    /// Lowercase mention -> canonical key
    conversions: HashMap<String, String>,
}

impl EntityCanonicalizer {
    pub fn new(conversions: HashMap<String, String>) -> Self {
        let conversions = conversions
            .into_iter()
            .map(|(mention, canonical)| (mention.trim().to_lowercase(), canonical))
            .collect();
        Self { conversions }
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    /// Canonical form of one entity
    ///
    /// Entities missing from the table canonicalize to their lowercase form.
    pub fn canonical(&self, entity: &str) -> String {
        let lower = entity.to_lowercase();
        match self.conversions.get(&lower) {
            Some(canonical) => canonical.clone(),
            None => lower,
        }
    }

    /// Canonical form of each entity, same order and length
    pub fn canonicalize(&self, entities: &[String]) -> Vec<String> {
        entities.iter().map(|e| self.canonical(e)).collect()
    }

    /// Replace each mention in `text` with its canonical form
    ///
    /// Mentions are processed in order; only whole-word occurrences are
    /// rewritten.
    pub fn correct_entities(&self, text: &str, entities: &[String]) -> String {
        let mut result = text.to_string();
        for mention in entities {
            if mention.is_empty() {
                continue;
            }
            let canonical = self.canonical(mention);
            if canonical == *mention {
                continue;
            }
            let updated = replace_whole_words(&result, mention, &canonical);
            if updated != result {
                tracing::debug!(mention = %mention, canonical = %canonical, "Entity mention rewritten");
                result = updated;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonicalizer() -> EntityCanonicalizer {
        let mut conversions = HashMap::new();
        conversions.insert("Idoom Fibre".to_string(), "fibre".to_string());
        conversions.insert("fttH".to_string(), "fibre".to_string());
        conversions.insert("dsl".to_string(), "adsl".to_string());
        EntityCanonicalizer::new(conversions)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_canonical_lookup_is_case_insensitive() {
        let c = canonicalizer();
        assert_eq!(c.canonical("IDOOM FIBRE"), "fibre");
        assert_eq!(c.canonical("FTTH"), "fibre");
        assert_eq!(c.canonical("Modem"), "modem");
    }

    #[test]
    fn test_canonicalize_preserves_length_and_order() {
        let c = canonicalizer();
        let input = strings(&["modem", "FTTH", "dsl", "ftth"]);
        let output = c.canonicalize(&input);
        assert_eq!(output.len(), input.len());
        assert_eq!(output, strings(&["modem", "fibre", "adsl", "fibre"]));
        assert!(c.canonicalize(&[]).is_empty());
    }

    #[test]
    fn test_correct_entities_rewrites_mentions() {
        let c = canonicalizer();
        let text = "prix idoom fibre et ftth";
        let result = c.correct_entities(text, &strings(&["idoom fibre", "ftth"]));
        assert_eq!(result, "prix fibre et fibre");
    }

    #[test]
    fn test_correct_entities_respects_word_boundaries() {
        let c = canonicalizer();
        let result = c.correct_entities("dsl or dslam", &strings(&["dsl"]));
        assert_eq!(result, "adsl or dslam");
    }

    #[test]
    fn test_unknown_entities_leave_text_alone() {
        let c = canonicalizer();
        let text = "my modem blinks";
        assert_eq!(c.correct_entities(text, &strings(&["modem", ""])), text);
    }
}
