//! Context persistence for the conversational context resolver
//!
//! Provides storage for:
//! - Per-session context (last intent, last entity set)
//! - Conversation message log
//!
//! Each concern has a ScyllaDB implementation and an in-memory one used
//! when persistence is disabled and in tests.

pub mod client;
pub mod context;
pub mod error;
pub mod messages;
pub mod schema;

pub use client::{ScyllaClient, ScyllaConfig};
pub use context::{InMemoryContextStore, ScyllaContextStore};
pub use error::PersistenceError;
pub use messages::{ConversationMessage, InMemoryMessageLog, MessageLog, ScyllaMessageLog};

/// Connect to ScyllaDB, ensure the schema and build the stores
pub async fn init(config: ScyllaConfig) -> Result<PersistenceLayer, PersistenceError> {
    let client = ScyllaClient::connect(config).await?;
    client.ensure_schema().await?;

    Ok(PersistenceLayer {
        context: ScyllaContextStore::new(client.clone()),
        messages: ScyllaMessageLog::new(client),
    })
}

/// Combined persistence layer with all stores
pub struct PersistenceLayer {
    pub context: ScyllaContextStore,
    pub messages: ScyllaMessageLog,
}
