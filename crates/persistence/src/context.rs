//! Per-session context stores
//!
//! Both stores replace a field as a whole on every save. The in-memory store
//! does so under one write lock, the ScyllaDB store with one single-row
//! `UPDATE`, so an entity set is never observable half-written.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use chat_context_core::{ContextRecord, ContextStore, Result, SessionId};

use crate::{PersistenceError, ScyllaClient};

/// ScyllaDB-backed context store
#[derive(Clone)]
pub struct ScyllaContextStore {
    client: ScyllaClient,
}

impl ScyllaContextStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, session: &SessionId) -> std::result::Result<ContextRecord, PersistenceError> {
        let query = format!(
            "SELECT intent, entities, intent_updated_at, entities_updated_at
             FROM {}.session_context WHERE session_id = ?",
            self.client.keyspace()
        );

        let result = self
            .client
            .session()
            .query_unpaged(query, (session.as_str(),))
            .await?;

        if let Some(rows) = result.rows {
            if let Some(row) = rows.into_iter().next() {
                return row_to_record(row);
            }
        }

        Ok(ContextRecord::default())
    }
}

fn row_to_record(
    row: scylla::frame::response::result::Row,
) -> std::result::Result<ContextRecord, PersistenceError> {
    let (intent, entities, intent_updated_at, entities_updated_at): (
        Option<String>,
        Option<Vec<String>>,
        Option<i64>,
        Option<i64>,
    ) = row
        .into_typed()
        .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

    Ok(ContextRecord {
        intent,
        entities: entities.unwrap_or_default(),
        updated_at: latest_timestamp(intent_updated_at, entities_updated_at),
    })
}

/// Most recent of two optional millisecond timestamps
fn latest_timestamp(a: Option<i64>, b: Option<i64>) -> Option<DateTime<Utc>> {
    a.into_iter()
        .chain(b)
        .max()
        .and_then(DateTime::from_timestamp_millis)
}

#[async_trait]
impl ContextStore for ScyllaContextStore {
    async fn save_intent(&self, session: &SessionId, intent: &str) -> Result<()> {
        let query = format!(
            "UPDATE {}.session_context SET intent = ?, intent_updated_at = ?
             WHERE session_id = ?",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (intent, Utc::now().timestamp_millis(), session.as_str()),
            )
            .await
            .map_err(PersistenceError::from)?;

        tracing::info!(session_id = %session, intent = %intent, "Intent saved to ScyllaDB");
        Ok(())
    }

    async fn save_entities(&self, session: &SessionId, entities: &[String]) -> Result<()> {
        let query = format!(
            "UPDATE {}.session_context SET entities = ?, entities_updated_at = ?
             WHERE session_id = ?",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    entities.to_vec(),
                    Utc::now().timestamp_millis(),
                    session.as_str(),
                ),
            )
            .await
            .map_err(PersistenceError::from)?;

        tracing::info!(session_id = %session, entities = ?entities, "Entities saved to ScyllaDB");
        Ok(())
    }

    async fn get_last_intent(&self, session: &SessionId) -> Result<Option<String>> {
        Ok(self.fetch(session).await?.intent)
    }

    async fn get_last_entities(&self, session: &SessionId) -> Result<Vec<String>> {
        Ok(self.fetch(session).await?.entities)
    }

    async fn get_context(&self, session: &SessionId) -> Result<ContextRecord> {
        Ok(self.fetch(session).await?)
    }

    async fn clear(&self, session: &SessionId) -> Result<()> {
        let query = format!(
            "DELETE FROM {}.session_context WHERE session_id = ?",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(query, (session.as_str(),))
            .await
            .map_err(PersistenceError::from)?;

        tracing::info!(session_id = %session, "Context cleared");
        Ok(())
    }

    fn is_distributed(&self) -> bool {
        true
    }
}

/// Process-local context store
#[derive(Default)]
pub struct InMemoryContextStore {
    records: RwLock<HashMap<SessionId, ContextRecord>>,
}

impl InMemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions with stored context
    pub fn session_count(&self) -> usize {
        self.records.read().len()
    }
}

#[async_trait]
impl ContextStore for InMemoryContextStore {
    async fn save_intent(&self, session: &SessionId, intent: &str) -> Result<()> {
        let mut records = self.records.write();
        let record = records.entry(session.clone()).or_default();
        record.intent = Some(intent.to_string());
        record.updated_at = Some(Utc::now());
        tracing::debug!(session_id = %session, intent = %intent, "Intent saved");
        Ok(())
    }

    async fn save_entities(&self, session: &SessionId, entities: &[String]) -> Result<()> {
        let mut records = self.records.write();
        let record = records.entry(session.clone()).or_default();
        record.entities = entities.to_vec();
        record.updated_at = Some(Utc::now());
        tracing::debug!(session_id = %session, entities = ?entities, "Entities saved");
        Ok(())
    }

    async fn get_last_intent(&self, session: &SessionId) -> Result<Option<String>> {
        Ok(self
            .records
            .read()
            .get(session)
            .and_then(|r| r.intent.clone()))
    }

    async fn get_last_entities(&self, session: &SessionId) -> Result<Vec<String>> {
        Ok(self
            .records
            .read()
            .get(session)
            .map(|r| r.entities.clone())
            .unwrap_or_default())
    }

    async fn get_context(&self, session: &SessionId) -> Result<ContextRecord> {
        Ok(self.records.read().get(session).cloned().unwrap_or_default())
    }

    async fn clear(&self, session: &SessionId) -> Result<()> {
        self.records.write().remove(session);
        Ok(())
    }

    fn is_distributed(&self) -> bool {
        false
    }
}
