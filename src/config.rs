use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Import configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ImportConfig {
    /// Accepted servings range for the second line
    #[serde(default)]
    pub servings: ServingsConfig,
    /// Extra unit spellings
    #[serde(default)]
    pub units: UnitsConfig,
    /// Extra section header patterns
    #[serde(default)]
    pub headers: HeadersConfig,
}

/// Bounds for the servings line
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServingsConfig {
    #[serde(default = "default_min_servings")]
    pub min: u32,
    #[serde(default = "default_max_servings")]
    pub max: u32,
}

impl Default for ServingsConfig {
    fn default() -> Self {
        Self {
            min: default_min_servings(),
            max: default_max_servings(),
        }
    }
}

/// Additional unit synonyms
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct UnitsConfig {
    /// Surface spelling -> canonical unit code (e.g. `katori = "cup"`)
    #[serde(default)]
    pub synonyms: HashMap<String, String>,
}

/// Additional header patterns
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct HeadersConfig {
    /// Regular expressions, matched case-insensitively against the whole line
    #[serde(default)]
    pub patterns: Vec<String>,
}

// Default value functions
fn default_min_servings() -> u32 {
    1
}

fn default_max_servings() -> u32 {
    100
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEALPLAN__ prefix
    /// 2. mealplan.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEALPLAN__SERVINGS__MAX
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ImportConfig::load`] for the layering.
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("mealplan").required(false))
        // Use double underscore for nested: MEALPLAN__UNITS__SYNONYMS__KATORI
        .add_source(
            Environment::with_prefix("MEALPLAN")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        assert_eq!(default_min_servings(), 1);
        assert_eq!(default_max_servings(), 100);

        let config = ImportConfig::default();
        assert_eq!(config.servings.min, 1);
        assert_eq!(config.servings.max, 100);
        assert!(config.units.synonyms.is_empty());
        assert!(config.headers.patterns.is_empty());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            [servings]
            max = 24

            [units.synonyms]
            katori = "cup"

            [headers]
            patterns = ["^zutaten:?$"]
        "#;

        let config: ImportConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.servings.min, 1);
        assert_eq!(config.servings.max, 24);
        assert_eq!(config.units.synonyms.get("katori").unwrap(), "cup");
        assert_eq!(config.headers.patterns, vec!["^zutaten:?$"]);
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: ImportConfig = Config::builder()
            .add_source(File::from_str("", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.servings.max, 100);
    }

    #[test]
    fn test_load_config_without_file() {
        // no mealplan.toml in the crate root, and no overrides from the environment
        let overrides: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with("MEALPLAN__"))
            .collect();
        for key in overrides {
            std::env::remove_var(key);
        }

        let config = load_config().unwrap();
        assert_eq!(config, ImportConfig::default());
    }
}
