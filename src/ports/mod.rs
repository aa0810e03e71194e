//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Tweet storage (recent tweets per handle)
//! - Candidate token selection
//! - Price history (hourly closes per trading pair)
//! - Text generation (the reasoning engine)

pub mod models;
pub mod tweets;
pub mod tokens;
pub mod market_data;
pub mod reasoning;
pub mod mocks;

pub use models::{PortError, PortResult};
pub use tweets::TweetSource;
pub use tokens::TokenSource;
pub use market_data::PriceSource;
pub use reasoning::TextGenerator;
