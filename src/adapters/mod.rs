//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - MySQL: tweet store and candidate token selection
//! - GeckoTerminal: hourly price history per pool
//! - Gemini: text generation for the scoring engine
//! - CLI: Command-line interface handlers

pub mod mysql;
pub mod gecko_terminal;
pub mod gemini;
pub mod cli;

pub use mysql::MySqlStore;
pub use gecko_terminal::GeckoTerminalClient;
pub use gemini::GeminiClient;
pub use cli::CliApp;
