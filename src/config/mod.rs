//! Configuration Module
//!
//! Loads and validates configuration from the environment or a TOML file.

pub mod loader;

pub use loader::{
    Config, ConfigError, DatabaseSection, GeckoTerminalSection, GeminiSection, HttpSection,
    load_config,
};
