/// Extractor configuration
///
/// Settings can come from a JSON file and are then overridden by command-line
/// flags. Every field has a default, so `{}` is a valid configuration file.

use std::path::Path;

use anyhow::Result;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::core::blocks::ScanStrategy;
use crate::core::patterns::{is_valid_identifier, DEFAULT_BLOCK_PREFIX};

/// Invalid configuration values
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("block prefix must not be empty")]
    EmptyPrefix,

    #[error("balanced scanning needs a block prefix ending with '(', got {0:?}")]
    PrefixNotOpening(String),

    #[error("{field} must be an identifier, got {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },
}

/// Options controlling extraction and rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Literal text opening a block
    pub block_prefix: String,
    /// Name of the emitted constant
    pub const_name: String,
    /// Element type of the emitted array, also used as the literal suffix
    pub element_type: String,
    /// How block ends are located
    pub strategy: ScanStrategy,
    /// Refuse ambiguous or unterminated blocks instead of warning
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_prefix: DEFAULT_BLOCK_PREFIX.to_string(),
            const_name: "COEFFS".to_string(),
            element_type: "U256".to_string(),
            strategy: ScanStrategy::default(),
            strict: false,
        }
    }
}

impl Settings {
    /// Check the settings before any input is touched
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if self.strategy == ScanStrategy::Balanced && !self.block_prefix.ends_with('(') {
            return Err(ConfigError::PrefixNotOpening(self.block_prefix.clone()));
        }
        for (field, value) in [
            ("const_name", &self.const_name),
            ("element_type", &self.element_type),
        ] {
            if !is_valid_identifier(value) {
                return Err(ConfigError::InvalidIdentifier {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Load settings from a JSON file if provided.
///
/// A missing or malformed file, including one with unknown keys, is logged
/// and the defaults are used.
pub fn load_config(config_path: Option<&Path>) -> Result<Settings> {
    let settings = match config_path {
        Some(path) => {
            if !path.exists() {
                error!("Configuration file not found: {}", path.display());
                Settings::default()
            } else {
                let config_str = std::fs::read_to_string(path)?;
                match serde_json::from_str(&config_str) {
                    Ok(settings) => {
                        info!("Loaded configuration from {}", path.display());
                        settings
                    }
                    Err(e) => {
                        error!("Invalid JSON in configuration file: {}", e);
                        Settings::default()
                    }
                }
            }
        }
        None => Settings::default(),
    };

    Ok(settings)
}
