//! Decision Pipeline
//!
//! Runs one token at a time through tweet fetch, price fetch, scoring and
//! classification. Every outcome is an [`Assessment`]; nothing is raised past
//! `analyze` or `analyze_all`.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use thiserror::Error;

use super::report::{log_outcome, log_token_header};
use super::scorer::ScoringEngine;
use crate::domain::{Assessment, RunResult, TokenDescriptor, TWEET_FETCH_LIMIT};
use crate::ports::{PortError, PriceSource, TweetSource};

pub const NO_HANDLE_REASON: &str = "No Twitter handle found for token";
pub const NO_PRICE_DATA_REASON: &str = "Failed to fetch price data";

/// Faults that abort a single token's analysis
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Port(#[from] PortError),
}

/// Orchestrates the collaborators for each token
#[derive(Clone)]
pub struct DecisionPipeline {
    tweets: Arc<dyn TweetSource>,
    prices: Arc<dyn PriceSource>,
    scorer: ScoringEngine,
}

impl DecisionPipeline {
    pub fn new(tweets: Arc<dyn TweetSource>, prices: Arc<dyn PriceSource>, scorer: ScoringEngine) -> Self {
        Self { tweets, prices, scorer }
    }

    /// Analyse one token
    pub async fn analyze(&self, token: &TokenDescriptor) -> Assessment {
        match self.try_analyze(token).await {
            Ok(assessment) => assessment,
            Err(e) => Assessment::indeterminate(format!("Error in analysis pipeline: {}", e)),
        }
    }

    async fn try_analyze(&self, token: &TokenDescriptor) -> Result<Assessment, PipelineError> {
        let Some(handle) = token.handle() else {
            return Ok(Assessment::indeterminate(NO_HANDLE_REASON));
        };

        let Some(tweets) = self.tweets.fetch_tweet_bundle(handle, TWEET_FETCH_LIMIT).await? else {
            return Ok(Assessment::indeterminate(format!(
                "No recent tweets found for Twitter handle: {}",
                handle
            )));
        };

        let anchor = tweets.anchor_time();
        let prices = match self
            .prices
            .fetch_price_series(&token.chain, &token.pair_id, anchor)
            .await
        {
            Ok(series) if !series.is_empty() => series,
            Ok(_) => {
                tracing::warn!("No price data before {} for token {}", anchor, token.token_id);
                return Ok(Assessment::indeterminate(NO_PRICE_DATA_REASON));
            }
            Err(e) => {
                tracing::warn!("Could not fetch price data for token {}: {}", token.token_id, e);
                return Ok(Assessment::indeterminate(NO_PRICE_DATA_REASON));
            }
        };

        let assessment = match self.scorer.score(&tweets, &prices).await {
            Ok(score) => Assessment::scored(score),
            Err(e) => Assessment::indeterminate(e.to_string()),
        };
        Ok(assessment)
    }

    /// Analyse tokens sequentially in input order
    ///
    /// A token whose analysis panics is recorded as indeterminate and the batch moves
    /// on. Repeated token ids are analysed once.
    pub async fn analyze_all(&self, tokens: &[TokenDescriptor]) -> RunResult {
        let mut results = RunResult::new();

        for token in tokens {
            if results.contains(&token.token_id) {
                tracing::warn!("Token {} already analyzed in this run, skipping", token.token_id);
                continue;
            }

            log_token_header(token);
            let assessment = match AssertUnwindSafe(self.analyze(token)).catch_unwind().await {
                Ok(assessment) => assessment,
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    tracing::error!("Error processing token {}: {}", token.token_id, message);
                    Assessment::indeterminate(format!("Unexpected error: {}", message))
                }
            };

            log_outcome(&token.token_id, &assessment);
            results.record(token.token_id.clone(), assessment);
        }

        results
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
