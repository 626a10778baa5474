//! Intent keyword configuration for the rule-based classifier

use serde::{Deserialize, Serialize};

/// Single intent definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentDefinition {
    /// Intent label reported by the classifier
    pub name: String,
    /// Words or phrases that trigger the intent (matched on normalized text)
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
}
