//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - in-memory store unless persistence is enabled
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Path to the static domain tables (YAML)
    #[serde(default = "default_domain_config_path")]
    pub domain_config_path: String,

    /// Fuzzy correction thresholds
    #[serde(default)]
    pub correction: CorrectionConfig,

    /// Context store backend
    #[serde(default)]
    pub persistence: PersistenceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// REPL output format
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: RuntimeEnvironment::default(),
            domain_config_path: default_domain_config_path(),
            correction: CorrectionConfig::default(),
            persistence: PersistenceConfig::default(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_domain_config_path() -> String {
    "config/domain.yaml".to_string()
}

/// Fuzzy spelling correction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionConfig {
    /// Minimum token-set score (0-100) for a token to be replaced
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    /// When set, a correction whose overall confidence falls below this
    /// value is discarded and the uncorrected text is kept
    #[serde(default)]
    pub min_confidence: Option<u8>,
}

fn default_threshold() -> u8 {
    70
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            min_confidence: None,
        }
    }
}

/// Persistence configuration for ScyllaDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Enable ScyllaDB persistence (false = in-memory only)
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_scylla_hosts")]
    pub scylla_hosts: Vec<String>,

    #[serde(default = "default_scylla_keyspace")]
    pub keyspace: String,

    #[serde(default = "default_replication_factor")]
    pub replication_factor: u8,
}

fn default_scylla_hosts() -> Vec<String> {
    std::env::var("SCYLLA_HOSTS")
        .map(|s| s.split(',').map(|h| h.trim().to_string()).collect())
        .unwrap_or_else(|_| vec!["127.0.0.1:9042".to_string()])
}

fn default_scylla_keyspace() -> String {
    std::env::var("SCYLLA_KEYSPACE").unwrap_or_else(|_| "chat_context".to_string())
}

fn default_replication_factor() -> u8 {
    1
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scylla_hosts: default_scylla_hosts(),
            keyspace: default_scylla_keyspace(),
            replication_factor: default_replication_factor(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the full turn outcome as JSON instead of the response text
    #[serde(default)]
    pub json: bool,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_correction()?;
        self.validate_persistence()?;

        if self.domain_config_path.trim().is_empty() {
            return Err(ConfigError::MissingField("domain_config_path".to_string()));
        }

        Ok(())
    }

    fn validate_correction(&self) -> Result<(), ConfigError> {
        if self.correction.threshold > 100 {
            return Err(ConfigError::InvalidValue {
                field: "correction.threshold".to_string(),
                message: format!("Must be between 0 and 100, got {}", self.correction.threshold),
            });
        }

        if let Some(min) = self.correction.min_confidence {
            if min > 100 {
                return Err(ConfigError::InvalidValue {
                    field: "correction.min_confidence".to_string(),
                    message: format!("Must be between 0 and 100, got {}", min),
                });
            }
        }

        Ok(())
    }

    fn validate_persistence(&self) -> Result<(), ConfigError> {
        let persistence = &self.persistence;
        if !persistence.enabled {
            return Ok(());
        }

        if persistence.scylla_hosts.iter().all(|h| h.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "persistence.scylla_hosts".to_string(),
                message: "At least one host is required when persistence is enabled".to_string(),
            });
        }

        // Keyspace is interpolated into CQL statements
        let keyspace_ok = !persistence.keyspace.is_empty()
            && persistence
                .keyspace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !keyspace_ok {
            return Err(ConfigError::InvalidValue {
                field: "persistence.keyspace".to_string(),
                message: format!(
                    "Must be non-empty and contain only [A-Za-z0-9_], got '{}'",
                    persistence.keyspace
                ),
            });
        }

        if persistence.replication_factor == 0 {
            return Err(ConfigError::InvalidValue {
                field: "persistence.replication_factor".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (CHAT_CONTEXT__ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("CHAT_CONTEXT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
