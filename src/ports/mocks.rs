//! In-memory port implementations that record calls and replay scripted responses
//!
//! Used by unit and integration tests to drive the pipeline without a database,
//! price API or model endpoint.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::models::{PortError, PortResult};
use super::{PriceSource, TextGenerator, TokenSource, TweetSource};
use crate::domain::{PriceSeries, TokenDescriptor, TweetBundle};

/// Mock tweet store keyed by handle
///
/// Unconfigured handles behave like an account with too few tweets (`Ok(None)`).
#[derive(Debug, Default, Clone)]
pub struct MockTweetSource {
    calls: Arc<Mutex<Vec<(String, usize)>>>,
    responses: Arc<Mutex<HashMap<String, PortResult<Option<TweetBundle>>>>>,
    panics: Arc<Mutex<HashSet<String>>>,
}

impl MockTweetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to serve a bundle for a handle
    pub fn with_bundle(self, handle: &str, bundle: TweetBundle) -> Self {
        self.responses.lock().unwrap().insert(handle.to_string(), Ok(Some(bundle)));
        self
    }

    /// Builder method to make a handle fail with `error`
    pub fn with_error(self, handle: &str, error: PortError) -> Self {
        self.responses.lock().unwrap().insert(handle.to_string(), Err(error));
        self
    }

    /// Builder method to make a handle panic mid-fetch
    pub fn with_panic(self, handle: &str) -> Self {
        self.panics.lock().unwrap().insert(handle.to_string());
        self
    }

    /// Get all recorded (handle, limit) calls
    pub fn get_calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TweetSource for MockTweetSource {
    async fn fetch_tweet_bundle(&self, handle: &str, limit: usize) -> PortResult<Option<TweetBundle>> {
        self.calls.lock().unwrap().push((handle.to_string(), limit));
        if self.panics.lock().unwrap().contains(handle) {
            panic!("tweet store blew up for {}", handle);
        }
        self.responses
            .lock()
            .unwrap()
            .get(handle)
            .cloned()
            .unwrap_or(Ok(None))
    }
}

/// Recorded price request
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCall {
    pub chain: String,
    pub pair_id: String,
    pub anchor: NaiveDateTime,
}

/// Mock price service keyed by pair id
///
/// Unconfigured pairs return an empty series.
#[derive(Debug, Default, Clone)]
pub struct MockPriceSource {
    calls: Arc<Mutex<Vec<PriceCall>>>,
    responses: Arc<Mutex<HashMap<String, PortResult<PriceSeries>>>>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to serve a series for a pair
    pub fn with_series(self, pair_id: &str, series: PriceSeries) -> Self {
        self.responses.lock().unwrap().insert(pair_id.to_string(), Ok(series));
        self
    }

    /// Builder method to make a pair fail with `error`
    pub fn with_error(self, pair_id: &str, error: PortError) -> Self {
        self.responses.lock().unwrap().insert(pair_id.to_string(), Err(error));
        self
    }

    pub fn get_calls(&self) -> Vec<PriceCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch_price_series(
        &self,
        chain: &str,
        pair_id: &str,
        anchor: NaiveDateTime,
    ) -> PortResult<PriceSeries> {
        self.calls.lock().unwrap().push(PriceCall {
            chain: chain.to_string(),
            pair_id: pair_id.to_string(),
            anchor,
        });
        self.responses
            .lock()
            .unwrap()
            .get(pair_id)
            .cloned()
            .unwrap_or_else(|| Ok(PriceSeries::empty()))
    }
}

/// Text generator that replays scripted replies in order
#[derive(Debug, Default, Clone)]
pub struct ScriptedGenerator {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    replies: Arc<Mutex<VecDeque<PortResult<String>>>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to queue a literal reply
    pub fn with_reply(self, reply: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
        self
    }

    /// Builder method to queue a failed call
    pub fn with_error(self, error: PortError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Get all recorded (model, prompt) calls
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, model: &str, prompt: &str) -> PortResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PortError::Communication("No reply scripted".to_string())))
    }
}

/// Mock token selection returning a fixed list
#[derive(Debug, Default, Clone)]
pub struct MockTokenSource {
    calls: Arc<Mutex<Vec<usize>>>,
    tokens: Vec<TokenDescriptor>,
}

impl MockTokenSource {
    pub fn new(tokens: Vec<TokenDescriptor>) -> Self {
        Self {
            calls: Arc::default(),
            tokens,
        }
    }

    pub fn get_calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenSource for MockTokenSource {
    async fn select_candidate_tokens(&self, limit: usize) -> PortResult<Vec<TokenDescriptor>> {
        self.calls.lock().unwrap().push(limit);
        Ok(self.tokens.iter().take(limit).cloned().collect())
    }
}
