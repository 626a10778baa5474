//! Context fallback between turns
//!
//! A follow-up question that names no entity ("and how much is it?") reuses
//! the entities of the previous turn; one without a recognized intent reuses
//! the previous intent. The two fields are resolved and saved independently.

use std::sync::Arc;

use chat_context_core::{ContextStore, IntentCandidates, ResolvedContext, Result, SessionId};

/// Fills missing intent/entities from the session's stored context
#[derive(Clone)]
pub struct ContextResolver {
    store: Arc<dyn ContextStore>,
}

impl ContextResolver {
    pub fn new(store: Arc<dyn ContextStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ContextStore> {
        &self.store
    }

    /// Resolve the intent and entities to act on for this turn
    ///
    /// Non-empty current values are used as-is and the store is not read for
    /// them. Empty values fall back to what was last saved for the session.
    /// Has no side effects.
    pub async fn retrieve_context_if_missing(
        &self,
        session: &SessionId,
        intent: impl Into<IntentCandidates>,
        entities: &[String],
    ) -> Result<ResolvedContext> {
        let intent = intent.into();

        let (entities, entities_from_context) = if entities.is_empty() {
            (self.store.get_last_entities(session).await?, true)
        } else {
            (entities.to_vec(), false)
        };

        let (intent, intent_from_context) = match intent.primary() {
            Some(primary) => (Some(primary.to_string()), false),
            None => (self.store.get_last_intent(session).await?, true),
        };

        tracing::debug!(
            session_id = %session,
            intent = ?intent,
            entities = ?entities,
            intent_from_context,
            entities_from_context,
            "Context resolved"
        );

        Ok(ResolvedContext {
            entities,
            intent,
            entities_from_context,
            intent_from_context,
        })
    }

    /// Persist the turn's own non-empty fields
    ///
    /// A present intent replaces the stored one (first candidate only), a
    /// non-empty entity list replaces the stored set (repeats dropped, first
    /// occurrence kept). Empty fields leave the store untouched. Both fields
    /// are attempted; the first failure is returned.
    pub async fn save_context(
        &self,
        session: &SessionId,
        intent: impl Into<IntentCandidates>,
        entities: &[String],
    ) -> Result<()> {
        let intent = intent.into();
        let entities = dedup_entities(entities);
        let mut first_error = None;

        if let Some(primary) = intent.primary() {
            if let Err(e) = self.store.save_intent(session, primary).await {
                tracing::warn!(session_id = %session, error = %e, "Failed to save intent");
                first_error.get_or_insert(e);
            }
        }

        if !entities.is_empty() {
            if let Err(e) = self.store.save_entities(session, &entities).await {
                tracing::warn!(session_id = %session, error = %e, "Failed to save entities");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!(
                    session_id = %session,
                    intent = ?intent.primary(),
                    entities = ?entities,
                    "Context saved"
                );
                Ok(())
            }
        }
    }
}

fn dedup_entities(entities: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(entities.len());
    for entity in entities {
        if !unique.contains(entity) {
            unique.push(entity.clone());
        }
    }
    unique
}
