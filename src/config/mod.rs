//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `ESG_COPILOT` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use esg_copilot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! if !config.ai.has_credential() {
//!     println!("Running in offline mode with mock fallbacks");
//! }
//! ```

mod ai;
mod error;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI provider configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `ESG_COPILOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ESG_COPILOT__AI__GEMINI_API_KEY=AIza...` -> `ai.gemini_api_key`
    /// - `ESG_COPILOT__AI__MODEL=gemini-3-flash-preview` -> `ai.model`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ESG_COPILOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("ESG_COPILOT__AI__GEMINI_API_KEY");
        env::remove_var("ESG_COPILOT__AI__MODEL");
        env::remove_var("ESG_COPILOT__AI__TIMEOUT_SECS");
    }

    #[test]
    fn loads_defaults_without_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = AppConfig::load().unwrap();
        assert!(!config.ai.has_credential());
        assert_eq!(config.ai.model, "gemini-3-flash-preview");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_key_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("ESG_COPILOT__AI__GEMINI_API_KEY", "AIza-test");

        let config = AppConfig::load().unwrap();
        assert!(config.ai.has_credential());

        clear_env();
    }

    #[test]
    fn overrides_model_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("ESG_COPILOT__AI__MODEL", "gemini-3-pro");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.ai.model, "gemini-3-pro");

        clear_env();
    }
}
