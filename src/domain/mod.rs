//! Domain Layer - Core types for tweet-driven token analysis
//!
//! Pure data types and rules with no I/O. External interactions happen through the
//! ports layer.
//!
//! - `token`: Candidate token descriptor
//! - `tweet`: Tweet records and the recent/past bundle
//! - `price`: Hourly close-price series anchored at the recent tweet
//! - `verdict`: Score validation, threshold classification, (verdict, reason) pairs
//! - `run`: Insertion-ordered results of a batch run

pub mod token;
pub mod tweet;
pub mod price;
pub mod verdict;
pub mod run;

pub use token::TokenDescriptor;
pub use tweet::{TweetRecord, TweetBundle, MIN_TWEETS, TWEET_FETCH_LIMIT};
pub use price::{PricePoint, PriceSeries, MAX_PRICE_POINTS};
pub use verdict::{Score, Verdict, Assessment, classify, POSITIVE_THRESHOLD, MAX_SCORE};
pub use run::{RunResult, RunSummary};
