//! Tweet corpus port

use async_trait::async_trait;

use super::models::PortResult;
use crate::domain::TweetBundle;

/// Source of stored tweets per handle
#[async_trait]
pub trait TweetSource: Send + Sync {
    /// Fetch up to `limit` of the newest tweets for `handle`
    ///
    /// Returns `Ok(None)` when fewer than [`crate::domain::MIN_TWEETS`] exist.
    async fn fetch_tweet_bundle(&self, handle: &str, limit: usize) -> PortResult<Option<TweetBundle>>;
}
