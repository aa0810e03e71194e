//! Candidate token selection port

use async_trait::async_trait;

use super::models::PortResult;
use crate::domain::TokenDescriptor;

/// Source of tokens worth analysing in this run
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn select_candidate_tokens(&self, limit: usize) -> PortResult<Vec<TokenDescriptor>>;
}
