//! Configuration Loader
//!
//! Two entry points: `Config::from_env()` reads the flat environment variables
//! (`DB_HOST`, `GEMINI_API_KEY`, ...), `load_config()` reads a TOML file with one
//! section per external service. Both validate before returning.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;
use thiserror::Error;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GECKO_TERMINAL_API_URL: &str = "https://api.geckoterminal.com/api/v2";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseSection,
    pub gemini: GeminiSection,
    #[serde(default)]
    pub gecko_terminal: GeckoTerminalSection,
    #[serde(default)]
    pub http: HttpSection,
}

/// MySQL connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSection {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Falls back to DB_PASSWORD when empty
    #[serde(default)]
    pub password: String,
    pub database: String,
}

impl DatabaseSection {
    /// Connection options with each credential passed as its own field
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

/// Reasoning engine settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSection {
    /// Falls back to GEMINI_API_KEY when empty
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_api_url")]
    pub api_url: String,
}

/// Price service settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeckoTerminalSection {
    #[serde(default = "default_gecko_terminal_api_url")]
    pub api_url: String,
}

impl Default for GeckoTerminalSection {
    fn default() -> Self {
        Self {
            api_url: default_gecko_terminal_api_url(),
        }
    }
}

/// Timeouts applied to every external call
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSection {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl HttpSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_gemini_api_url() -> String {
    DEFAULT_GEMINI_API_URL.to_string()
}

fn default_gecko_terminal_api_url() -> String {
    DEFAULT_GECKO_TERMINAL_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to read environment: {0}")]
    EnvError(#[from] ::config::ConfigError),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Flat view of the environment variables
#[derive(Debug, Deserialize)]
struct EnvSettings {
    db_host: String,
    db_port: u16,
    db_user: String,
    db_password: String,
    db_name: String,
    gemini_api_key: String,
    gemini_model: String,
    gemini_api_url: String,
    gecko_terminal_api_url: String,
    request_timeout_secs: u64,
}

impl From<EnvSettings> for Config {
    fn from(env: EnvSettings) -> Self {
        Config {
            database: DatabaseSection {
                host: env.db_host,
                port: env.db_port,
                user: env.db_user,
                password: env.db_password,
                database: env.db_name,
            },
            gemini: GeminiSection {
                api_key: env.gemini_api_key,
                model: env.gemini_model,
                api_url: env.gemini_api_url,
            },
            gecko_terminal: GeckoTerminalSection {
                api_url: env.gecko_terminal_api_url,
            },
            http: HttpSection {
                request_timeout_secs: env.request_timeout_secs,
            },
        }
    }
}

/// Load configuration from a TOML file, filling empty secrets from the environment
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    config.apply_secret_overrides();
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Build configuration from environment variables (after `.env` is loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(::config::Environment::default())
    }

    /// Build configuration from an environment source, applying the documented defaults
    pub fn from_source(env: ::config::Environment) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .set_default("db_host", "localhost")?
            .set_default("db_port", 3306)?
            .set_default("db_user", "root")?
            .set_default("db_password", "")?
            .set_default("db_name", "analysis")?
            .set_default("gemini_api_key", "")?
            .set_default("gemini_model", DEFAULT_GEMINI_MODEL)?
            .set_default("gemini_api_url", DEFAULT_GEMINI_API_URL)?
            .set_default("gecko_terminal_api_url", DEFAULT_GECKO_TERMINAL_API_URL)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
            .add_source(env)
            .build()?;

        let env: EnvSettings = settings.try_deserialize()?;
        let config = Config::from(env);
        config.validate()?;
        Ok(config)
    }

    fn apply_secret_overrides(&mut self) {
        if self.gemini.api_key.is_empty() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                self.gemini.api_key = key;
            }
        }
        if self.database.password.is_empty() {
            if let Ok(password) = std::env::var("DB_PASSWORD") {
                self.database.password = password;
            }
        }
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.host.is_empty() {
            return Err(ConfigError::ValidationError(
                "database host cannot be empty".to_string(),
            ));
        }

        if self.database.port == 0 {
            return Err(ConfigError::ValidationError(
                "database port must be > 0".to_string(),
            ));
        }

        if self.database.database.is_empty() {
            return Err(ConfigError::ValidationError(
                "database name cannot be empty".to_string(),
            ));
        }

        if self.gemini.api_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "Gemini API key missing (set GEMINI_API_KEY)".to_string(),
            ));
        }

        if self.gemini.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "Gemini model name cannot be empty".to_string(),
            ));
        }

        if self.gemini.api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "Gemini api_url cannot be empty".to_string(),
            ));
        }

        if self.gecko_terminal.api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "GeckoTerminal api_url cannot be empty".to_string(),
            ));
        }

        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
