//! Intent/entity classifier trait

use crate::{Classification, Result};
use async_trait::async_trait;

/// Opaque classifier producing intent candidates and entity mentions
///
/// Either part of the result may be empty; the resolver fills the gaps
/// from the previous turn.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification>;

    /// Classifier name for logging
    fn name(&self) -> &str;
}
