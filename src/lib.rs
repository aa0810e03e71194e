//! Tweet Alpha - LLM scoring of token tweets
//!
//! Picks tokens recently mentioned on Twitter, gathers each token's tweet history and
//! hourly price history, and asks a language model whether the newest tweet carries
//! new, price-relevant information or repeats stale news.
//!
//! # Modules
//!
//! - `domain`: Core types (TokenDescriptor, TweetBundle, PriceSeries, Score, Verdict, RunResult)
//! - `ports`: Trait abstractions (TweetSource, PriceSource, TextGenerator, TokenSource)
//! - `adapters`: External implementations (MySQL, GeckoTerminal, Gemini, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Scoring engine and decision pipeline

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
