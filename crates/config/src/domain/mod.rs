//! Static domain configuration
//!
//! Loaded once at startup from a single YAML file and treated as immutable
//! for the lifetime of the process. Loading is all-or-nothing: a missing
//! file, a parse failure or a failed validation aborts startup.
//!
//! ```yaml
//! domain_id: telecom
//! vocabulary:
//!   terms: [adsl, fibre]
//!   conversions: { "idoom fibre": fibre }
//!   spelling_rules:
//!     - { pattern: "\\bconexion\\b", replacement: "connexion" }
//! intents:
//!   - { name: offer, keywords: [offer, offre] }
//! responses:
//!   prices:
//!     adsl: [{ name: "ADSL 10 Mbps", price: 1600 }]
//! ```

mod intents;
mod responses;
mod vocabulary;

pub use intents::IntentDefinition;
pub use responses::{CeoConfig, ComparisonConfig, Offer, ResponsesConfig};
pub use vocabulary::{SpellingRule, VocabularyConfig};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// All static tables of one domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    #[serde(default = "default_domain_id")]
    pub domain_id: String,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub intents: Vec<IntentDefinition>,
    #[serde(default)]
    pub responses: ResponsesConfig,
}

fn default_domain_id() -> String {
    "default".to_string()
}

impl DomainConfig {
    /// Load and validate from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::ParseError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            domain = %config.domain_id,
            path = %path.display(),
            terms = config.vocabulary.terms.len(),
            spelling_rules = config.vocabulary.spelling_rules.len(),
            intents = config.intents.len(),
            "Loaded domain configuration"
        );
        Ok(config)
    }

    /// Parse and validate YAML content
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse domain config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vocabulary.unique_terms().is_empty() {
            return Err(ConfigError::MissingField("vocabulary.terms".to_string()));
        }

        for (idx, rule) in self.vocabulary.spelling_rules.iter().enumerate() {
            if let Err(e) = Regex::new(&rule.pattern) {
                return Err(ConfigError::InvalidValue {
                    field: format!("vocabulary.spelling_rules[{}].pattern", idx),
                    message: format!("'{}' is not a valid regex: {}", rule.pattern, e),
                });
            }
        }

        for (idx, intent) in self.intents.iter().enumerate() {
            if intent.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("intents[{}].name", idx),
                    message: "Intent name cannot be empty".to_string(),
                });
            }
        }

        for (entity, offers) in &self.responses.prices {
            if offers.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("responses.prices.{}", entity),
                    message: "Price list cannot be empty".to_string(),
                });
            }
            if offers.windows(2).any(|w| w[0].price > w[1].price) {
                return Err(ConfigError::InvalidValue {
                    field: format!("responses.prices.{}", entity),
                    message: "Offers must be sorted by ascending price".to_string(),
                });
            }
        }

        if self.responses.ceo.name.trim().is_empty() {
            return Err(ConfigError::MissingField("responses.ceo.name".to_string()));
        }

        Ok(())
    }

    pub fn intent_names(&self) -> Vec<&str> {
        self.intents.iter().map(|i| i.name.as_str()).collect()
    }
}
