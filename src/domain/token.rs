//! Candidate token descriptor
//!
//! One row of the token-selection query: the identifiers needed to fetch a token's
//! tweets and its price history.

/// A token selected for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDescriptor {
    /// Token identifier (result key)
    pub token_id: String,
    /// Trading pair / pool identifier on `chain`
    pub pair_id: String,
    /// Twitter handle of the project account
    pub twitter_handle: Option<String>,
    /// Chain name as stored upstream (e.g. "ethereum", "binance")
    pub chain: String,
    /// Market capitalization in USD (informational)
    pub market_cap: Option<f64>,
    /// 24h trading volume in USD (informational)
    pub volume_24h: Option<f64>,
}

impl TokenDescriptor {
    pub fn new(
        token_id: impl Into<String>,
        pair_id: impl Into<String>,
        twitter_handle: Option<String>,
        chain: impl Into<String>,
    ) -> Self {
        Self {
            token_id: token_id.into(),
            pair_id: pair_id.into(),
            twitter_handle,
            chain: chain.into(),
            market_cap: None,
            volume_24h: None,
        }
    }

    /// Attach the informational market figures
    pub fn with_market_data(mut self, market_cap: Option<f64>, volume_24h: Option<f64>) -> Self {
        self.market_cap = market_cap;
        self.volume_24h = volume_24h;
        self
    }

    /// The usable handle, if any. Blank handles count as absent.
    pub fn handle(&self) -> Option<&str> {
        self.twitter_handle
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_present() {
        let token = TokenDescriptor::new("T1", "P1", Some("@proj".to_string()), "ethereum");
        assert_eq!(token.handle(), Some("@proj"));
    }

    #[test]
    fn test_blank_handle_is_absent() {
        let missing = TokenDescriptor::new("T1", "P1", None, "ethereum");
        let empty = TokenDescriptor::new("T1", "P1", Some(String::new()), "ethereum");
        let blank = TokenDescriptor::new("T1", "P1", Some("   ".to_string()), "ethereum");

        assert_eq!(missing.handle(), None);
        assert_eq!(empty.handle(), None);
        assert_eq!(blank.handle(), None);
    }

    #[test]
    fn test_with_market_data() {
        let token = TokenDescriptor::new("T1", "P1", None, "bsc")
            .with_market_data(Some(1_500_000.0), Some(42_000.0));

        assert_eq!(token.market_cap, Some(1_500_000.0));
        assert_eq!(token.volume_24h, Some(42_000.0));
    }
}
