//! ScyllaDB schema creation

use crate::error::PersistenceError;
use scylla::Session;

/// Keyspace names are interpolated into CQL, so only `[A-Za-z0-9_]` is allowed
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 48
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Create the keyspace if it doesn't exist
pub async fn create_keyspace(
    session: &Session,
    keyspace: &str,
    replication_factor: u8,
) -> Result<(), PersistenceError> {
    let query = format!(
        "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
        keyspace, replication_factor
    );

    session
        .query_unpaged(query, &[])
        .await
        .map_err(|e| PersistenceError::SchemaError(format!("Failed to create keyspace: {}", e)))?;

    Ok(())
}

/// Create all required tables
pub async fn create_tables(session: &Session, keyspace: &str) -> Result<(), PersistenceError> {
    // One row per session; each field is replaced by a single-row UPDATE
    let context_table = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {}.session_context (
            session_id TEXT,
            intent TEXT,
            entities LIST<TEXT>,
            intent_updated_at BIGINT,
            entities_updated_at BIGINT,
            PRIMARY KEY (session_id)
        )
    "#,
        keyspace
    );

    session.query_unpaged(context_table, &[]).await.map_err(|e| {
        PersistenceError::SchemaError(format!("Failed to create session_context table: {}", e))
    })?;

    let messages_table = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {}.conversation_messages (
            session_id TEXT,
            created_at BIGINT,
            message_id UUID,
            raw_text TEXT,
            normalized_text TEXT,
            corrected_text TEXT,
            intent TEXT,
            entities LIST<TEXT>,
            confidence INT,
            PRIMARY KEY ((session_id), created_at, message_id)
        ) WITH CLUSTERING ORDER BY (created_at DESC, message_id DESC)
    "#,
        keyspace
    );

    session.query_unpaged(messages_table, &[]).await.map_err(|e| {
        PersistenceError::SchemaError(format!(
            "Failed to create conversation_messages table: {}",
            e
        ))
    })?;

    tracing::info!("All tables created successfully");
    Ok(())
}
