//! WLZ Configuration Management
//!
//! Handles configuration from environment variables and TOML config files
//! with sensible defaults for local runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Language and parse conventions
    pub language: LanguageConfig,

    /// Output table locations
    pub output: OutputConfig,

    /// Terminal rendering
    pub display: DisplayConfig,

    /// Relation label glossary
    pub glossary: GlossaryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply every `WLZ_*` key that `lookup` finds, whatever its value
    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Language
        if let Some(code) = lookup("WLZ_LANGUAGE") {
            self.language.code = code;
        }
        if let Some(label) = lookup("WLZ_ROOT_LABEL") {
            self.language.root_label = label;
        }

        // Output
        if let Some(dir) = lookup("WLZ_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        // Display
        if let Some(color) = lookup("WLZ_COLOR") {
            self.display.color = parse_bool("WLZ_COLOR", &color)?;
        }

        // Logging
        if let Some(level) = lookup("WLZ_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("WLZ_LOG_JSON") {
            self.logging.json_format = parse_bool("WLZ_LOG_JSON", &json)?;
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Language configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Language code (e.g. "uk")
    pub code: String,

    /// Relation label marking a sentence root, compared case-insensitively
    pub root_label: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            code: "uk".to_string(),
            root_label: "ROOT".to_string(),
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the tables
    pub dir: PathBuf,

    /// File name of the word table
    pub words_file: String,

    /// File name of the relation table
    pub relations_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            words_file: "words.txt".to_string(),
            relations_file: "relations.txt".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn words_path(&self) -> PathBuf {
        self.dir.join(&self.words_file)
    }

    pub fn relations_path(&self) -> PathBuf {
        self.dir.join(&self.relations_file)
    }
}

/// Terminal rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colorize pretty-printed relations
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Glossary configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryConfig {
    /// Label -> gloss entries consulted before the built-in glossary
    pub overrides: BTreeMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
