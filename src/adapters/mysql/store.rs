//! MySQL-backed tweet and token store

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use super::queries::{SELECT_CANDIDATE_TOKENS, SELECT_RECENT_TWEETS};
use crate::domain::{TokenDescriptor, TweetBundle, TweetRecord, MIN_TWEETS};
use crate::ports::{PortResult, TokenSource, TweetSource};

/// Row of `twitter.enhanced_tweets`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TweetRow {
    pub tweet_id: String,
    pub body: Option<String>,
    pub tweet_create_time: NaiveDateTime,
    pub author_handle: String,
}

impl From<TweetRow> for TweetRecord {
    fn from(row: TweetRow) -> Self {
        Self {
            tweet_id: row.tweet_id,
            body: row.body.unwrap_or_default(),
            created_at: row.tweet_create_time,
            author_handle: row.author_handle,
        }
    }
}

/// Row of `twitter.token_leaderboard`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TokenRow {
    pub token_id: String,
    pub pair_id: String,
    pub twitter: Option<String>,
    pub chain: String,
    pub marketcap: Option<f64>,
    pub volume_24hr: Option<f64>,
}

impl From<TokenRow> for TokenDescriptor {
    fn from(row: TokenRow) -> Self {
        TokenDescriptor::new(row.token_id, row.pair_id, row.twitter, row.chain)
            .with_market_data(row.marketcap, row.volume_24hr)
    }
}

/// Connection pool plus the two queries the analysis needs
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Open a single-connection pool; the analysis never issues overlapping queries
    pub async fn connect(options: MySqlConnectOptions, acquire_timeout: Duration) -> PortResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create connection pool: {}", e);
                e
            })?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TweetSource for MySqlStore {
    async fn fetch_tweet_bundle(&self, handle: &str, limit: usize) -> PortResult<Option<TweetBundle>> {
        let rows = sqlx::query_as::<_, TweetRow>(SELECT_RECENT_TWEETS)
            .bind(handle)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let found = rows.len();
        let bundle = TweetBundle::from_records(rows.into_iter().map(TweetRecord::from).collect());
        if bundle.is_none() {
            tracing::info!(
                "Insufficient tweets for {}: found {} tweets, minimum {} required",
                handle,
                found,
                MIN_TWEETS
            );
        }

        Ok(bundle)
    }
}

#[async_trait]
impl TokenSource for MySqlStore {
    async fn select_candidate_tokens(&self, limit: usize) -> PortResult<Vec<TokenDescriptor>> {
        let rows = sqlx::query_as::<_, TokenRow>(SELECT_CANDIDATE_TOKENS)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(TokenDescriptor::from).collect())
    }
}
