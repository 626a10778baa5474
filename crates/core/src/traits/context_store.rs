//! Per-session context persistence trait

use crate::{ContextRecord, Result, SessionId};
use async_trait::async_trait;

/// Stores the most recent intent and entity set of each session
///
/// Saves replace the stored field as a whole; they never merge with what
/// was there before. An entity set must never be observable half-written.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Replace the stored intent
    async fn save_intent(&self, session: &SessionId, intent: &str) -> Result<()>;

    /// Replace the stored entity set
    async fn save_entities(&self, session: &SessionId, entities: &[String]) -> Result<()>;

    /// Last saved intent, `None` if never saved
    async fn get_last_intent(&self, session: &SessionId) -> Result<Option<String>>;

    /// Last saved entity set, empty if never saved
    async fn get_last_entities(&self, session: &SessionId) -> Result<Vec<String>>;

    /// Full stored record
    async fn get_context(&self, session: &SessionId) -> Result<ContextRecord>;

    /// Drop everything stored for the session
    async fn clear(&self, session: &SessionId) -> Result<()>;

    /// Whether the store is shared between processes
    fn is_distributed(&self) -> bool;
}
