//! # Generator Configuration
//!
//! A single immutable struct read once from TOML and passed by reference into
//! every component. Nothing reads configuration from anywhere else.
//!
//! ```toml
//! service_package = "com.example.service"
//! controller_package = "com.example.controller"
//! response_type = "com.example.common.Response"
//! output_root = "src/main/java"
//! sql_map_root = "src/main/resources"
//! audit_column = "gmt_modified"
//! chunk_layout = "pairs"
//!
//! [swagger]
//! enabled = true
//! ```

use crate::errors::{GenError, Result};
use crate::java::JavaType;
use crate::sql::ChunkLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_AUDIT_COLUMN: &str = "gmt_modified";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Package of generated service classes
    pub service_package: String,
    /// Package of generated controller classes
    pub controller_package: String,
    /// Fully-qualified generic envelope wrapping controller return values
    pub response_type: JavaType,
    /// Root directory for Java sources
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    /// Root directory for SQL map XML documents
    #[serde(default = "default_sql_map_root")]
    pub sql_map_root: PathBuf,
    /// Package used when a table omits its domain type
    #[serde(default)]
    pub model_package: Option<String>,
    /// Package used when a table omits its mapper type
    #[serde(default)]
    pub mapper_package: Option<String>,
    /// Bookkeeping column set to `now()` by upserts. Empty disables it.
    #[serde(default = "default_audit_column")]
    pub audit_column: String,
    #[serde(default)]
    pub chunk_layout: ChunkLayout,
    #[serde(default)]
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwaggerConfig {
    pub enabled: bool,
    /// Use the short model class name in `@ApiModel(value = ...)`
    pub short_model_value: bool,
    /// Example value for TIMESTAMP columns
    pub timestamp_example: String,
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            short_model_value: false,
            timestamp_example: "2019-03-28 00:00:00".to_string(),
        }
    }
}

fn default_output_root() -> PathBuf {
    PathBuf::from("src/main/java")
}

fn default_sql_map_root() -> PathBuf {
    PathBuf::from("src/main/resources")
}

fn default_audit_column() -> String {
    DEFAULT_AUDIT_COLUMN.to_string()
}

impl GeneratorConfig {
    /// Config with the three required keys and every default
    #[must_use]
    pub fn for_packages(
        service_package: impl Into<String>,
        controller_package: impl Into<String>,
        response_type: JavaType,
    ) -> Self {
        Self {
            service_package: service_package.into(),
            controller_package: controller_package.into(),
            response_type,
            output_root: default_output_root(),
            sql_map_root: default_sql_map_root(),
            model_package: None,
            mapper_package: None,
            audit_column: default_audit_column(),
            chunk_layout: ChunkLayout::default(),
            swagger: SwaggerConfig::default(),
        }
    }

    /// Parse and validate TOML text
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|source| GenError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Reject values that would produce uncompilable output
    pub fn validate(&self) -> Result<()> {
        for (key, package) in [
            ("service_package", &self.service_package),
            ("controller_package", &self.controller_package),
        ] {
            if !is_package_name(package) {
                return Err(GenError::config_value(
                    key,
                    format!("'{package}' is not a Java package name"),
                ));
            }
        }
        if self.response_type.package().is_none() {
            return Err(GenError::config_value(
                "response_type",
                format!("'{}' must be fully qualified", self.response_type),
            ));
        }
        if self.audit_column.contains(char::is_whitespace) {
            return Err(GenError::config_value(
                "audit_column",
                "must be a single column name",
            ));
        }
        Ok(())
    }

    /// Bookkeeping column for upserts, if enabled
    #[must_use]
    pub fn audit_column(&self) -> Option<&str> {
        let column = self.audit_column.trim();
        (!column.is_empty()).then_some(column)
    }
}

fn is_package_name(package: &str) -> bool {
    !package.is_empty()
        && package.split('.').all(|part| {
            part.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
                && part.chars().all(|c| c.is_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
service_package = "com.example.service"
controller_package = "com.example.controller"
response_type = "com.example.common.Response"
"#;

    #[test]
    fn test_minimal_config_defaults() {
        let config = GeneratorConfig::from_toml(MINIMAL, Path::new("crudmapper.toml")).unwrap();
        assert_eq!(config.output_root, PathBuf::from("src/main/java"));
        assert_eq!(config.audit_column(), Some("gmt_modified"));
        assert_eq!(config.chunk_layout, ChunkLayout::Pairs);
        assert!(config.swagger.enabled);
        assert_eq!(config.response_type.short_name(), "Response");
    }

    #[test]
    fn test_full_config() {
        let text = format!(
            "{MINIMAL}audit_column = \"\"\nchunk_layout = \"flat\"\nmapper_package = \"com.example.mapper\"\n\n[swagger]\nenabled = false\n"
        );
        let config = GeneratorConfig::from_toml(&text, Path::new("x.toml")).unwrap();
        assert_eq!(config.audit_column(), None);
        assert_eq!(config.chunk_layout, ChunkLayout::Flat);
        assert_eq!(config.mapper_package.as_deref(), Some("com.example.mapper"));
        assert!(!config.swagger.enabled);
        assert!(!config.swagger.short_model_value);
    }

    #[test]
    fn test_missing_required_key() {
        let err = GeneratorConfig::from_toml("service_package = \"a\"", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(err, GenError::ConfigParse { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let text = format!("{MINIMAL}javaTargetProject = \"x\"\n");
        assert!(GeneratorConfig::from_toml(&text, Path::new("x.toml")).is_err());
    }

    #[test]
    fn test_malformed_response_type_rejected_at_parse() {
        let text = MINIMAL.replace("com.example.common.Response", "com..Response");
        let err = GeneratorConfig::from_toml(&text, Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, GenError::ConfigParse { .. }));
    }

    #[test]
    fn test_unqualified_response_type_rejected() {
        let config = GeneratorConfig::for_packages("a", "b", JavaType::parse("Response").unwrap());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("response_type"));
    }

    #[test]
    fn test_malformed_package_rejected() {
        let text = MINIMAL.replace("com.example.service", "com..service");
        let err = GeneratorConfig::from_toml(&text, Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, GenError::ConfigValue { key: "service_package", .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GeneratorConfig::load(Path::new("/nonexistent/crudmapper.toml")).unwrap_err();
        assert!(matches!(err, GenError::ConfigRead { .. }));
    }
}
