//! MySQL Adapter
//!
//! Implementation of the TweetSource and TokenSource ports against the
//! `twitter` schema (token leaderboard and enhanced tweets tables).

mod queries;
mod store;

pub use store::{MySqlStore, TweetRow, TokenRow};
