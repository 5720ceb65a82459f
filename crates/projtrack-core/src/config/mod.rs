//! Configuration management with file persistence

use crate::error::Error;
use crate::form::FormRules;
use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Projtrack configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub form: FormRules,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_ids: bool,
}

const KEYS: [&str; 6] = [
    "form.title_required",
    "form.description_min_length",
    "form.description_max_length",
    "form.people_min",
    "form.people_max",
    "display.show_ids",
];

fn format_optional(value: Option<usize>) -> String {
    value.map_or_else(|| "(unset)".to_string(), |v| v.to_string())
}

fn parse_optional(key: &str, value: &str) -> anyhow::Result<Option<usize>> {
    match value.trim() {
        "" | "none" | "unset" => Ok(None),
        v => v
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {} value: {}", key, value)),
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("PROJTRACK_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("projtrack")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config = Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let form = &self.form;
        if form.people_min < 1 {
            return Err(Error::ConfigError("form.people_min must be at least 1".into()).into());
        }
        if form.people_min > form.people_max {
            return Err(Error::ConfigError(format!(
                "form.people_min ({}) must not exceed form.people_max ({})",
                form.people_min, form.people_max
            ))
            .into());
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "form.title_required" => Ok(self.form.title_required.to_string()),
            "form.description_min_length" => Ok(self.form.description_min_length.to_string()),
            "form.description_max_length" => Ok(format_optional(self.form.description_max_length)),
            "form.people_min" => Ok(self.form.people_min.to_string()),
            "form.people_max" => Ok(self.form.people_max.to_string()),
            "display.show_ids" => Ok(self.display.show_ids.to_string()),
            _ => Err(Error::UnknownConfigKey(key.to_string()).into()),
        }
    }

    /// Set a configuration value by key
    ///
    /// The whole configuration is re-validated; on failure nothing changes.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut next = self.clone();
        match key {
            "form.title_required" => {
                next.form.title_required = value
                    .parse()
                    .with_context(|| format!("Invalid title_required value: {}", value))?;
            }
            "form.description_min_length" => {
                next.form.description_min_length = value
                    .parse()
                    .with_context(|| format!("Invalid description_min_length value: {}", value))?;
            }
            "form.description_max_length" => {
                next.form.description_max_length = parse_optional("description_max_length", value)?;
            }
            "form.people_min" => {
                next.form.people_min = value
                    .parse()
                    .with_context(|| format!("Invalid people_min value: {}", value))?;
            }
            "form.people_max" => {
                next.form.people_max = value
                    .parse()
                    .with_context(|| format!("Invalid people_max value: {}", value))?;
            }
            "display.show_ids" => {
                next.display.show_ids = value
                    .parse()
                    .with_context(|| format!("Invalid show_ids value: {}", value))?;
            }
            _ => return Err(Error::UnknownConfigKey(key.to_string()).into()),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        KEYS.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.form.title_required);
        assert_eq!(config.form.description_min_length, 5);
        assert_eq!(config.form.description_max_length, None);
        assert_eq!(config.form.people_min, 1);
        assert_eq!(config.form.people_max, 5);
        assert!(!config.display.show_ids);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("[form]\npeople_max = 9\n").unwrap();
        assert_eq!(config.form.people_max, 9);
        assert_eq!(config.form.people_min, 1);
        assert_eq!(config.form.description_min_length, 5);
    }

    #[test]
    fn test_invalid_toml_bounds_rejected() {
        assert!(Config::from_toml("[form]\npeople_min = 6\npeople_max = 5\n").is_err());
        assert!(Config::from_toml("[form]\npeople_min = 0\n").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.form.description_max_length = Some(200);
        config.display.show_ids = true;

        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        config.set("form.people_max", "8").unwrap();
        assert_eq!(config.get("form.people_max").unwrap(), "8");

        config.set("form.description_max_length", "120").unwrap();
        assert_eq!(config.get("form.description_max_length").unwrap(), "120");
        config.set("form.description_max_length", "none").unwrap();
        assert_eq!(config.get("form.description_max_length").unwrap(), "(unset)");
    }

    #[test]
    fn test_set_rejects_inverted_bounds_without_changing() {
        let mut config = Config::default();
        assert!(config.set("form.people_min", "7").is_err());
        assert_eq!(config.form.people_min, 1);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("form.people_max", "lots").is_err());
        assert!(config.set("display.show_ids", "maybe").is_err());
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        let err = config.get("form.colour").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(config.set("form.colour", "red").is_err());
    }

    #[test]
    fn test_list_covers_every_key() {
        let items = Config::default().list().unwrap();
        assert_eq!(items.len(), KEYS.len());
        assert_eq!(items[0], ("form.title_required".to_string(), "true".to_string()));
    }
}
