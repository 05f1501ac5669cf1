//! Configuration management for the roulette service
//!
//! Defaults, TOML files and `ROULETTE_*` environment overrides, validated
//! before use.

use crate::errors::{ConfigurationError, RouletteResult};
use crate::games::resolver::ResolutionPolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouletteConfig {
    pub logging: LoggingConfig,
    pub tables: TableRules,
    pub resolution: ResolutionPolicy,
}

/// Tracing subscriber settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roulette=info".to_string(),
        }
    }
}

/// Limits and currencies enforced on every table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRules {
    pub minimum_bet_floor: i64,
    pub currencies: Vec<String>,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            minimum_bet_floor: 10,
            currencies: vec!["GBP".to_string(), "USD".to_string(), "EUR".to_string()],
        }
    }
}

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> RouletteResult<RouletteConfig> {
        let mut config = match self.config_path {
            Some(ref path) => self.load_from_file(path)?,
            None => RouletteConfig::default(),
        };

        apply_overrides(&mut config, |key| env::var(key).ok())?;
        self.validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> RouletteResult<RouletteConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into())
    }

    /// Validate configuration values
    pub fn validate(&self, config: &RouletteConfig) -> RouletteResult<()> {
        if config.logging.filter.trim().is_empty() {
            return Err(ConfigurationError::MissingRequired("logging.filter".to_string()).into());
        }

        if config.tables.minimum_bet_floor <= 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "tables.minimum_bet_floor".to_string(),
                value: config.tables.minimum_bet_floor.to_string(),
                reason: "Floor must be positive".to_string(),
            }
            .into());
        }

        if config.tables.currencies.is_empty() {
            return Err(ConfigurationError::MissingRequired("tables.currencies".to_string()).into());
        }

        if let Some(bad) = config
            .tables
            .currencies
            .iter()
            .find(|c| c.len() != 3 || !c.chars().all(|ch| ch.is_ascii_uppercase()))
        {
            return Err(ConfigurationError::InvalidValue {
                field: "tables.currencies".to_string(),
                value: bad.clone(),
                reason: "Expected a three letter upper-case ISO 4217 code".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, config: &RouletteConfig, path: &str) -> RouletteResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into())
    }
}

/// Apply `ROULETTE_*` overrides read through `lookup`
pub fn apply_overrides<F>(config: &mut RouletteConfig, lookup: F) -> RouletteResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(filter) = lookup("ROULETTE_LOG") {
        config.logging.filter = filter;
    }
    if let Some(floor) = lookup("ROULETTE_MIN_BET_FLOOR") {
        config.tables.minimum_bet_floor = floor.parse().map_err(|_| ConfigurationError::InvalidValue {
            field: "ROULETTE_MIN_BET_FLOOR".to_string(),
            value: floor.clone(),
            reason: "Invalid integer".to_string(),
        })?;
    }
    if let Some(flag) = lookup("ROULETTE_MATCH_ALL_BET_TYPES") {
        config.resolution.match_all_bet_types = parse_flag("ROULETTE_MATCH_ALL_BET_TYPES", flag)?;
    }
    if let Some(flag) = lookup("ROULETTE_APPLY_MULTIPLIER") {
        config.resolution.apply_multiplier = parse_flag("ROULETTE_APPLY_MULTIPLIER", flag)?;
    }

    Ok(())
}

fn parse_flag(field: &str, value: String) -> RouletteResult<bool> {
    value.parse().map_err(|_| {
        ConfigurationError::InvalidValue {
            field: field.to_string(),
            value,
            reason: "Invalid boolean value".to_string(),
        }
        .into()
    })
}

/// Generate a sample configuration file
pub fn generate_sample_config(path: &str) -> RouletteResult<()> {
    ConfigLoader::new().save(&RouletteConfig::default(), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RouletteError;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = RouletteConfig::default();
        assert_eq!(config.tables.minimum_bet_floor, 10);
        assert_eq!(config.tables.currencies, vec!["GBP", "USD", "EUR"]);
        assert!(!config.resolution.match_all_bet_types);
        assert!(!config.resolution.apply_multiplier);
        assert!(ConfigLoader::new().validate(&config).is_ok());
    }

    #[test]
    fn test_config_validation() {
        let loader = ConfigLoader::new();

        let mut config = RouletteConfig::default();
        config.tables.minimum_bet_floor = 0;
        assert!(loader.validate(&config).is_err());

        let mut config = RouletteConfig::default();
        config.tables.currencies = vec!["pounds".to_string()];
        assert!(matches!(
            loader.validate(&config),
            Err(RouletteError::Configuration(ConfigurationError::InvalidValue { .. }))
        ));

        let mut config = RouletteConfig::default();
        config.tables.currencies.clear();
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ROULETTE_LOG", "roulette=debug"),
            ("ROULETTE_MIN_BET_FLOOR", "25"),
            ("ROULETTE_APPLY_MULTIPLIER", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = RouletteConfig::default();
        apply_overrides(&mut config, |key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.logging.filter, "roulette=debug");
        assert_eq!(config.tables.minimum_bet_floor, 25);
        assert!(config.resolution.apply_multiplier);
        assert!(!config.resolution.match_all_bet_types);
    }

    #[test]
    fn test_bad_env_override() {
        let mut config = RouletteConfig::default();
        let result = apply_overrides(&mut config, |key| {
            (key == "ROULETTE_MATCH_ALL_BET_TYPES").then(|| "sometimes".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() -> RouletteResult<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[resolution]\nmatch_all_bet_types = true").unwrap();

        let config = ConfigLoader::new().with_path(file.path()).load()?;
        assert!(config.resolution.match_all_bet_types);
        assert!(!config.resolution.apply_multiplier);
        assert_eq!(config.tables, TableRules::default());
        Ok(())
    }

    #[test]
    fn test_save_and_load_config() -> RouletteResult<()> {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        let mut original = RouletteConfig::default();
        original.tables.currencies = vec!["USD".to_string()];
        ConfigLoader::new().save(&original, path)?;

        let loaded: RouletteConfig = toml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(loaded, original);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::new().with_path("/nonexistent/roulette.toml").load();
        assert!(matches!(
            result,
            Err(RouletteError::Configuration(ConfigurationError::LoadFailed(_)))
        ));
    }
}
