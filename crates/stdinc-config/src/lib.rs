#![deny(unsafe_code)]

//! Configuration loading and validation for stdinc.
//!
//! Loads TOML configuration files and validates them. Provides the
//! [`AppConfig`] type as the central configuration structure, and the
//! [`headers`] module holding the header → symbol table.

/// Header → symbol table and its built-in defaults.
pub mod headers;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use headers::{HeaderTable, HeadersConfig};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Project settings.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Header → symbol table.
    #[serde(default)]
    pub headers: HeadersConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output settings for the CLI.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Project settings.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Include paths starting with this prefix belong to the project itself
    /// and are left out of standard-library analysis (e.g. `"TMCompiler"`).
    #[serde(default)]
    pub namespace_prefix: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "report", "short", or "json".
    #[serde(default = "default_output_format")]
    pub format: String,

    /// Print a line for files that produced no diagnostics.
    #[serde(default)]
    pub show_clean: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            show_clean: false,
        }
    }
}

fn default_output_format() -> String {
    "report".to_string()
}

/// Accepted values for `output.format`.
pub const OUTPUT_FORMATS: [&str; 3] = ["report", "short", "json"];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.project.namespace_prefix
            && prefix.is_empty()
        {
            return Err(ConfigError::Validation(
                "project.namespace_prefix must not be empty when set".to_string(),
            ));
        }

        let table = self.headers.table();
        if table.values().all(Vec::is_empty) {
            return Err(ConfigError::Validation(
                "header table is empty: enable headers.use_defaults or add headers.provides entries"
                    .to_string(),
            ));
        }
        for (header, symbols) in &table {
            if header.is_empty()
                || header.contains(['<', '>'])
                || header.contains(char::is_whitespace)
            {
                return Err(ConfigError::Validation(format!(
                    "invalid header name {header:?}"
                )));
            }
            for symbol in symbols {
                let valid = symbol
                    .strip_prefix("std::")
                    .is_some_and(|name| !name.is_empty());
                if !valid {
                    return Err(ConfigError::Validation(format!(
                        "headers.provides.{header}: symbol {symbol:?} must look like \"std::name\""
                    )));
                }
            }
        }
        debug!(
            headers = table.len(),
            use_defaults = self.headers.use_defaults,
            "Header table validated"
        );

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {:?}, got {:?}",
                LOG_LEVELS, self.logging.level
            )));
        }
        if !OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "output.format must be one of {:?}, got {:?}",
                OUTPUT_FORMATS, self.output.format
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.project.namespace_prefix, None);
        assert!(config.headers.use_defaults);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.format, "report");
        assert!(!config.output.show_clean);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = AppConfig::parse("").unwrap();
        assert!(config.headers.table().contains_key("iostream"));
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            [project]
            namespace_prefix = "TMCompiler"

            [headers]
            use_defaults = false

            [headers.provides]
            vector = ["std::vector"]
            memory = ["std::unique_ptr", "std::shared_ptr"]

            [logging]
            level = "debug"

            [output]
            format = "short"
            show_clean = true
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.project.namespace_prefix.as_deref(), Some("TMCompiler"));
        let table = config.headers.table();
        assert_eq!(table.len(), 2);
        assert_eq!(table["memory"], vec!["std::unique_ptr", "std::shared_ptr"]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.format, "short");
        assert!(config.output.show_clean);
    }

    #[test_log::test]
    fn test_validate_custom_table_only() {
        let mut config = AppConfig::default();
        config.headers.use_defaults = false;
        config
            .headers
            .provides
            .insert("numeric".to_string(), vec!["std::accumulate".to_string()]);
        config.validate().unwrap();
        assert_eq!(config.headers.table().len(), 1);
    }

    #[test]
    fn test_validation_rejects_empty_prefix() {
        let toml = r#"
            [project]
            namespace_prefix = ""
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_table() {
        let toml = r#"
            [headers]
            use_defaults = false
        "#;
        let err = AppConfig::parse(toml).unwrap_err();
        assert!(err.to_string().contains("header table is empty"));
    }

    #[test]
    fn test_validation_rejects_table_without_symbols() {
        let toml = r#"
            [headers]
            use_defaults = false

            [headers.provides]
            vector = []
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_unqualified_symbol() {
        let toml = r#"
            [headers.provides]
            numeric = ["accumulate"]
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_bare_std_prefix() {
        let toml = r#"
            [headers.provides]
            numeric = ["std::"]
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_bracketed_header() {
        let toml = r#"
            [headers.provides]
            "<numeric>" = ["std::accumulate"]
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let toml = r#"
            [logging]
            level = "loud"
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_format() {
        let toml = r#"
            [output]
            format = "xml"
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = AppConfig::default();
        config.project.namespace_prefix = Some("TMCompiler".to_string());
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::parse(&serialized).unwrap();
        assert_eq!(parsed.project.namespace_prefix.as_deref(), Some("TMCompiler"));
        assert_eq!(parsed.headers.table(), config.headers.table());
    }

    // ── Async file-based loading ──────────────────────────────────────

    #[test_log::test(tokio::test)]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stdinc.toml");
        tokio::fs::write(&path, b"[project]\nnamespace_prefix = \"mylib\"\n")
            .await
            .unwrap();

        let config = AppConfig::load(&path).await.unwrap();
        assert_eq!(config.project.namespace_prefix.as_deref(), Some("mylib"));
    }

    #[tokio::test]
    async fn test_load_nonexistent_file() {
        let result = AppConfig::load(Path::new("/nonexistent/stdinc.toml")).await;
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test_log::test(tokio::test)]
    async fn test_load_invalid_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        tokio::fs::write(&path, b"not valid toml [[[").await.unwrap();

        let result = AppConfig::load(&path).await;
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    // ── Error display ─────────────────────────────────────────────────

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bad value".to_string());
        assert_eq!(err.to_string(), "validation error: bad value");
    }
}
