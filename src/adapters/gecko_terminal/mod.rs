//! GeckoTerminal Adapter
//!
//! Implementation of the PriceSource port on top of the GeckoTerminal
//! public OHLCV API (hourly candles per pool).

mod client;
mod types;

pub use client::{GeckoTerminalClient, GeckoTerminalConfig, network_code};
pub use types::parse_ohlcv;
