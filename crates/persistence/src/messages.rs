//! Conversation message log

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chat_context_core::{CorrectionResult, ResolvedContext, SessionId, Utterance};

use crate::{PersistenceError, ScyllaClient};

/// One processed user turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub message_id: Uuid,
    pub session_id: SessionId,
    pub raw_text: String,
    pub normalized_text: String,
    pub corrected_text: String,
    pub intent: Option<String>,
    pub entities: Vec<String>,
    pub confidence: u8,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    /// Record of a turn after correction and context resolution
    pub fn from_turn(
        session_id: &SessionId,
        utterance: &Utterance,
        correction: &CorrectionResult,
        resolved: &ResolvedContext,
    ) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            session_id: session_id.clone(),
            raw_text: utterance.raw.clone(),
            normalized_text: utterance.normalized.clone(),
            corrected_text: correction.text.clone(),
            intent: resolved.intent.clone(),
            entities: resolved.entities.clone(),
            confidence: correction.confidence,
            created_at: Utc::now(),
        }
    }
}

/// Append-only log of processed messages
#[async_trait]
pub trait MessageLog: Send + Sync {
    async fn append(&self, message: &ConversationMessage) -> Result<(), PersistenceError>;

    /// Up to `limit` most recent messages of a session, oldest first
    async fn recent(
        &self,
        session: &SessionId,
        limit: usize,
    ) -> Result<Vec<ConversationMessage>, PersistenceError>;
}

/// ScyllaDB implementation of the message log
#[derive(Clone)]
pub struct ScyllaMessageLog {
    client: ScyllaClient,
}

impl ScyllaMessageLog {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageLog for ScyllaMessageLog {
    async fn append(&self, message: &ConversationMessage) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.conversation_messages (
                session_id, created_at, message_id,
                raw_text, normalized_text, corrected_text,
                intent, entities, confidence
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    message.session_id.as_str(),
                    message.created_at.timestamp_millis(),
                    message.message_id,
                    &message.raw_text,
                    &message.normalized_text,
                    &message.corrected_text,
                    &message.intent,
                    &message.entities,
                    i32::from(message.confidence),
                ),
            )
            .await?;

        tracing::debug!(
            message_id = %message.message_id,
            session_id = %message.session_id,
            "Message logged"
        );
        Ok(())
    }

    async fn recent(
        &self,
        session: &SessionId,
        limit: usize,
    ) -> Result<Vec<ConversationMessage>, PersistenceError> {
        let query = format!(
            "SELECT session_id, created_at, message_id,
                    raw_text, normalized_text, corrected_text,
                    intent, entities, confidence
             FROM {}.conversation_messages WHERE session_id = ? LIMIT ?",
            self.client.keyspace()
        );

        let limit = i32::try_from(limit).unwrap_or(i32::MAX);
        let result = self
            .client
            .session()
            .query_unpaged(query, (session.as_str(), limit))
            .await?;

        let mut messages = Vec::new();
        if let Some(rows) = result.rows {
            for row in rows {
                messages.push(row_to_message(row)?);
            }
        }
        // Clustering order is newest first
        messages.reverse();
        Ok(messages)
    }
}

fn row_to_message(
    row: scylla::frame::response::result::Row,
) -> Result<ConversationMessage, PersistenceError> {
    let (
        session_id,
        created_at,
        message_id,
        raw_text,
        normalized_text,
        corrected_text,
        intent,
        entities,
        confidence,
    ): (
        String,
        i64,
        Uuid,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<Vec<String>>,
        Option<i32>,
    ) = row
        .into_typed()
        .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

    let created_at = DateTime::from_timestamp_millis(created_at).ok_or_else(|| {
        PersistenceError::InvalidData(format!("Timestamp out of range: {}", created_at))
    })?;
    let confidence = u8::try_from(confidence.unwrap_or(0).clamp(0, 100)).unwrap_or(0);

    Ok(ConversationMessage {
        message_id,
        session_id: SessionId::new(session_id),
        raw_text: raw_text.unwrap_or_default(),
        normalized_text: normalized_text.unwrap_or_default(),
        corrected_text: corrected_text.unwrap_or_default(),
        intent,
        entities: entities.unwrap_or_default(),
        confidence,
        created_at,
    })
}

/// Process-local message log
#[derive(Default)]
pub struct InMemoryMessageLog {
    messages: RwLock<HashMap<SessionId, Vec<ConversationMessage>>>,
}

impl InMemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn append(&self, message: &ConversationMessage) -> Result<(), PersistenceError> {
        self.messages
            .write()
            .entry(message.session_id.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn recent(
        &self,
        session: &SessionId,
        limit: usize,
    ) -> Result<Vec<ConversationMessage>, PersistenceError> {
        let messages = self.messages.read();
        let Some(history) = messages.get(session) else {
            return Ok(Vec::new());
        };
        let skip = history.len().saturating_sub(limit);
        Ok(history[skip..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(session: &str, text: &str) -> ConversationMessage {
        let session = SessionId::from(session);
        let utterance = Utterance::new(text, text.to_lowercase());
        let correction = CorrectionResult {
            text: text.to_lowercase(),
            confidence: 100,
            corrections: Vec::new(),
        };
        let resolved = ResolvedContext::current(Some("offer"), &["adsl".to_string()]);
        ConversationMessage::from_turn(&session, &utterance, &correction, &resolved)
    }

    #[test]
    fn test_from_turn() {
        let msg = message("s1", "Price ADSL");
        assert_eq!(msg.session_id.as_str(), "s1");
        assert_eq!(msg.raw_text, "Price ADSL");
        assert_eq!(msg.corrected_text, "price adsl");
        assert_eq!(msg.intent.as_deref(), Some("offer"));
        assert_eq!(msg.entities, vec!["adsl".to_string()]);
        assert_eq!(msg.confidence, 100);
    }

    #[tokio::test]
    async fn test_recent_keeps_latest_in_order() {
        let log = InMemoryMessageLog::new();
        for text in ["one", "two", "three"] {
            log.append(&message("s1", text)).await.unwrap();
        }
        log.append(&message("s2", "other")).await.unwrap();

        let recent = log.recent(&SessionId::from("s1"), 2).await.unwrap();
        let texts: Vec<&str> = recent.iter().map(|m| m.raw_text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);

        assert!(log.recent(&SessionId::from("none"), 5).await.unwrap().is_empty());
        assert_eq!(log.recent(&SessionId::from("s2"), 10).await.unwrap().len(), 1);
    }
}
