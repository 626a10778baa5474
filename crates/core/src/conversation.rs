//! Conversation types: sessions, utterances, intents and per-session context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one conversation
///
/// Context is always stored per session so concurrent conversations never
/// see each other's intents or entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A user utterance for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Text as typed by the user
    pub raw: String,
    /// Text after normalization and the spelling rule table
    pub normalized: String,
}

impl Utterance {
    pub fn new(raw: impl Into<String>, normalized: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            normalized: normalized.into(),
        }
    }
}

/// Ordered intent labels returned by a classifier
///
/// Only the first candidate is ever acted on or persisted. A blank first
/// candidate counts as no intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentCandidates(Vec<String>);

impl IntentCandidates {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    /// The intent that is used for this turn
    pub fn primary(&self) -> Option<&str> {
        self.0
            .first()
            .map(|label| label.trim())
            .filter(|label| !label.is_empty())
    }

    /// True when there is no usable intent
    pub fn is_empty(&self) -> bool {
        self.primary().is_none()
    }

    /// All labels, including the discarded alternates
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }
}

impl From<&str> for IntentCandidates {
    fn from(label: &str) -> Self {
        Self(vec![label.to_string()])
    }
}

impl From<String> for IntentCandidates {
    fn from(label: String) -> Self {
        Self(vec![label])
    }
}

impl From<Option<&str>> for IntentCandidates {
    fn from(label: Option<&str>) -> Self {
        label.map(Self::from).unwrap_or_default()
    }
}

impl From<Option<String>> for IntentCandidates {
    fn from(label: Option<String>) -> Self {
        label.map(Self::from).unwrap_or_default()
    }
}

impl From<Vec<String>> for IntentCandidates {
    fn from(labels: Vec<String>) -> Self {
        Self(labels)
    }
}

impl From<&[String]> for IntentCandidates {
    fn from(labels: &[String]) -> Self {
        Self(labels.to_vec())
    }
}

/// Output of the intent/entity classifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub intents: IntentCandidates,
    pub entities: Vec<String>,
}

impl Classification {
    pub fn new(intents: impl Into<IntentCandidates>, entities: Vec<String>) -> Self {
        Self {
            intents: intents.into(),
            entities,
        }
    }

    pub fn primary_intent(&self) -> Option<&str> {
        self.intents.primary()
    }

    pub fn labels(&self) -> &[String] {
        self.intents.labels()
    }
}

/// Most recently saved context of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub intent: Option<String>,
    pub entities: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContextRecord {
    /// Nothing was ever saved
    pub fn is_empty(&self) -> bool {
        self.intent.is_none() && self.entities.is_empty()
    }
}

/// Intent and entities chosen for a turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedContext {
    pub entities: Vec<String>,
    pub intent: Option<String>,
    /// Entities were taken from the stored context
    pub entities_from_context: bool,
    /// Intent was taken from the stored context
    pub intent_from_context: bool,
}

impl ResolvedContext {
    /// Context made only of the turn's own values
    pub fn current(intent: Option<&str>, entities: &[String]) -> Self {
        Self {
            entities: entities.to_vec(),
            intent: intent.map(str::to_string),
            entities_from_context: false,
            intent_from_context: false,
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.entities_from_context || self.intent_from_context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_first_candidate() {
        let intents = IntentCandidates::from(vec!["offer".to_string(), "billing".to_string()]);
        assert_eq!(intents.primary(), Some("offer"));
        assert_eq!(intents.labels().len(), 2);
    }

    #[test]
    fn test_blank_candidates_are_empty() {
        assert!(IntentCandidates::none().is_empty());
        assert!(IntentCandidates::from("").is_empty());
        assert!(IntentCandidates::from("  ").is_empty());
        assert!(IntentCandidates::from(None::<&str>).is_empty());
        assert!(!IntentCandidates::from("offer").is_empty());
    }

    #[test]
    fn test_context_record_empty() {
        assert!(ContextRecord::default().is_empty());
        let record = ContextRecord {
            intent: Some("offer".into()),
            ..Default::default()
        };
        assert!(!record.is_empty());
    }

    #[test]
    fn test_session_id_serializes_as_string() {
        let id = SessionId::from("abc");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_resolved_current() {
        let entities = vec!["adsl".to_string()];
        let resolved = ResolvedContext::current(Some("offer"), &entities);
        assert_eq!(resolved.intent.as_deref(), Some("offer"));
        assert!(!resolved.used_fallback());
    }
}
