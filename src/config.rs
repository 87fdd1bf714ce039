use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime settings for the meal planning pipeline
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Gemini API key (can also be set via the GEMINI_API_KEY environment variable)
    pub api_key: Option<String>,
    /// Model used for both ingredient detection and recipe generation
    #[serde(default = "default_model")]
    pub model: String,
    /// Upper bound on the number of ingredients requested per upload
    #[serde(default = "default_max_ingredients")]
    pub max_ingredients: u32,
    /// Sampling temperature for recipe generation (0.0-2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_ingredients: default_max_ingredients(),
            temperature: default_temperature(),
        }
    }
}

// Default value functions
fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_max_ingredients() -> u32 {
    20
}

fn default_temperature() -> f32 {
    0.6
}

impl Settings {
    /// Load settings from file and environment variables
    ///
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FRIDGE_ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FRIDGE_API_KEY, FRIDGE_MODEL, ...
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Environment variables with FRIDGE_ prefix
            .add_source(Environment::with_prefix("FRIDGE").try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check numeric settings against their allowed ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ingredients == 0 {
            return Err(ConfigError::Message(
                "max_ingredients must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Message(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear_fridge_env() {
        let keys_to_clear: Vec<String> = env::vars()
            .filter(|(k, _)| k.starts_with("FRIDGE_"))
            .map(|(k, _)| k)
            .collect();

        for key in keys_to_clear {
            env::remove_var(&key);
        }
    }

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert!(settings.api_key.is_none());
        assert_eq!(settings.model, "gemini-1.5-flash");
        assert_eq!(settings.max_ingredients, 20);
        assert_eq!(settings.temperature, 0.6);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        clear_fridge_env();

        // No config.toml in the test working directory and no FRIDGE_ vars,
        // so every field should come from its default
        let settings = Settings::load().expect("defaults should satisfy validation");
        assert_eq!(settings.model, "gemini-1.5-flash");
        assert_eq!(settings.max_ingredients, 20);
    }

    #[test]
    fn test_validate_rejects_zero_ingredient_cap() {
        let settings = Settings {
            max_ingredients: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        let settings = Settings {
            temperature: 2.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            temperature: -0.1,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_range_endpoints() {
        for temperature in [0.0, 2.0] {
            let settings = Settings {
                temperature,
                ..Settings::default()
            };
            assert!(settings.validate().is_ok());
        }
    }
}
