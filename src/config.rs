//! TripPlan configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main TripPlan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Web search tool configuration
    pub search: SearchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that required environment variables are set. Call this early
    /// in startup to fail fast with clear error messages, before the first
    /// agent call would discover the problem mid-session.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        if std::env::var(&self.search.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "Web search API key not found. Set the {} environment variable.",
                self.search.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripplan.yml
        let local_config = PathBuf::from(".tripplan.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripplan/tripplan.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripplan").join("tripplan.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Peek at the configured log level before logging is initialized
    ///
    /// Best effort: any load or parse failure yields None and the caller
    /// falls back to the default level.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let config = Self::load(config_path).ok()?;
        config.logging.level
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "groq" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    ///
    /// The key lives in process memory only; it is never written to disk.
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .context(format!("environment variable {} not set", self.api_key_env))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            base_url: "https://api.groq.com/openai".to_string(),
            max_tokens: 4096,
            timeout_ms: 120_000,
        }
    }
}

/// Web search tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Search engine identifier
    pub engine: String,

    /// Number of results to request per query
    pub results: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl SearchConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .context(format!("environment variable {} not set", self.api_key_env))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key_env: "SERPAPI_API_KEY".to_string(),
            base_url: "https://serpapi.com".to_string(),
            engine: "google".to_string(),
            results: 10,
            timeout_ms: 30_000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.provider, "groq");
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.search.api_key_env, "SERPAPI_API_KEY");
        assert_eq!(config.search.engine, "google");
        assert_eq!(config.search.results, 10);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm:\n  model: llama-3.1-8b-instant\n  max-tokens: 2048\nsearch:\n  results: 5\nlogging:\n  level: DEBUG"
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.llm.max_tokens, 2048);
        // Unspecified fields keep their defaults
        assert_eq!(config.llm.provider, "groq");
        assert_eq!(config.search.results, 5);
        assert_eq!(config.logging.level.as_deref(), Some("DEBUG"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/nonexistent/tripplan.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn test_validate_requires_api_keys() {
        let mut config = Config::default();
        config.llm.api_key_env = "TRIPPLAN_TEST_LLM_KEY".to_string();
        config.search.api_key_env = "TRIPPLAN_TEST_SEARCH_KEY".to_string();

        unsafe {
            std::env::remove_var("TRIPPLAN_TEST_LLM_KEY");
            std::env::remove_var("TRIPPLAN_TEST_SEARCH_KEY");
        }
        assert!(config.validate().is_err());

        unsafe {
            std::env::set_var("TRIPPLAN_TEST_LLM_KEY", "k1");
        }
        assert!(config.validate().is_err());

        unsafe {
            std::env::set_var("TRIPPLAN_TEST_SEARCH_KEY", "k2");
        }
        assert!(config.validate().is_ok());

        unsafe {
            std::env::remove_var("TRIPPLAN_TEST_LLM_KEY");
            std::env::remove_var("TRIPPLAN_TEST_SEARCH_KEY");
        }
    }
}
