//! Configuration management for the context resolver
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (`CHAT_CONTEXT__` prefix)
//!
//! # Domain Configuration
//!
//! The static tables (entity conversions, spelling rules, fuzzy vocabulary,
//! intent keywords, response fragments) live in one YAML file, by default
//! `config/domain.yaml`, and are loaded once into an immutable
//! [`DomainConfig`].

pub mod domain;
pub mod settings;

pub use domain::{
    CeoConfig, ComparisonConfig, DomainConfig, IntentDefinition, Offer, ResponsesConfig,
    SpellingRule, VocabularyConfig,
};
pub use settings::{
    load_settings, CorrectionConfig, LoggingConfig, OutputConfig, PersistenceConfig,
    RuntimeEnvironment, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
