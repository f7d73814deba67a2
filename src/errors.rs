//! # Error Handling for Generation Runs
//!
//! Derivation over validated schema facts cannot fail: a table without a
//! usable primary key simply yields a smaller artifact set. Errors only come
//! from the edges of a run:
//! - configuration that cannot be read or parsed,
//! - schema facts that break the host's preconditions,
//! - the filesystem while writing artifacts.
//!
//! All of them abort the whole run. There is no per-table recovery.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run
#[derive(Debug, Error)]
pub enum GenError {
    /// Configuration file could not be read
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for `GeneratorConfig`
    #[error("invalid config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration parsed but a value is unusable
    #[error("invalid config value for '{key}': {message}")]
    ConfigValue { key: &'static str, message: String },

    /// Schema document could not be parsed
    #[error("invalid schema document: {0}")]
    SchemaParse(#[from] serde_json::Error),

    /// Table facts violate a precondition of the schema collaborator
    #[error("table '{table}': {message}")]
    Schema { table: String, message: String },

    /// Artifact manifest could not be serialized
    #[error("failed to serialize manifest: {0}")]
    Manifest(#[source] serde_json::Error),

    /// Writing a generated artifact failed
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// Create a schema precondition error for the given table
    pub fn schema(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a configuration value error
    pub fn config_value(key: &'static str, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
