//! TOML configuration loading and validation.

use std::path::Path;

use nanopayoff::{DEFAULT_MARGIN, EngineConfig};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSection {
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            margin: default_margin(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Load config from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if !self.engine.margin.is_finite() || self.engine.margin <= 0.0 {
            return Err(Error::Config(format!(
                "engine.margin must be positive and finite, got {}",
                self.engine.margin
            )));
        }
        if !LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "logging.level must be one of {}, got '{}'",
                LEVELS.join(", "),
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Engine settings for the payoff library.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::with_margin(self.engine.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_toml() -> &'static str {
        r#"
[engine]
margin = 20.0

[output]
pretty = false

[logging]
level = "debug"
"#
    }

    #[test]
    fn parse_example_config() {
        let config = Config::from_toml(example_toml()).unwrap();
        assert_eq!(config.engine.margin, 20.0);
        assert!(!config.output.pretty);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.engine_config().margin, 20.0);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.engine.margin, 15.0);
        assert!(config.output.pretty);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_section_fills_defaults() {
        let config = Config::from_toml("[output]\n").unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.engine.margin, 15.0);
    }

    #[test]
    fn validate_catches_bad_margin() {
        let mut config = Config::from_toml(example_toml()).unwrap();
        config.engine.margin = 0.0;
        assert!(config.validate().is_err());
        config.engine.margin = -3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_catches_bad_level() {
        let toml = example_toml().replace("\"debug\"", "\"loud\"");
        assert!(matches!(Config::from_toml(&toml), Err(Error::Config(_))));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        assert!(matches!(
            Config::from_toml("[engine\nmargin = 1"),
            Err(Error::ConfigParse(_))
        ));
    }
}
