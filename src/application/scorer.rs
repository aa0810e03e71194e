//! Scoring Engine
//!
//! The contract with the reasoning engine: serialize tweets and prices into one
//! instruction, call the model once, and read back a single `Score: N` line.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{PriceSeries, Score, TweetBundle, TweetRecord};
use crate::ports::{PortError, TextGenerator};

const TWEET_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PRICE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Why no score could be obtained
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoreError {
    /// Reply did not contain a `Score:` line
    #[error("Unexpected model response: {0}")]
    UnexpectedResponse(String),

    /// Reply contained a number outside 0-100
    #[error("Score out of range: {0}")]
    OutOfRange(String),

    /// The generation call itself failed
    #[error(transparent)]
    Generation(#[from] PortError),

    /// Tweets or prices could not be serialized
    #[error("Failed to build prompt: {0}")]
    Prompt(String),
}

#[derive(Serialize)]
struct TweetView<'a> {
    tweet_id: &'a str,
    body: &'a str,
    tweet_create_time: String,
    author_handle: &'a str,
}

impl<'a> From<&'a TweetRecord> for TweetView<'a> {
    fn from(tweet: &'a TweetRecord) -> Self {
        Self {
            tweet_id: &tweet.tweet_id,
            body: &tweet.body,
            tweet_create_time: tweet.created_at.format(TWEET_TIME_FORMAT).to_string(),
            author_handle: &tweet.author_handle,
        }
    }
}

#[derive(Serialize)]
struct BundleView<'a> {
    recent_tweet: TweetView<'a>,
    past_tweets: Vec<TweetView<'a>>,
}

/// Serialize the bundle, keeping the recent/past split and timestamps verbatim
pub fn format_tweets(tweets: &TweetBundle) -> Result<String, ScoreError> {
    let view = BundleView {
        recent_tweet: tweets.recent_tweet().into(),
        past_tweets: tweets.past_tweets().iter().map(TweetView::from).collect(),
    };
    serde_json::to_string_pretty(&view).map_err(|e| ScoreError::Prompt(e.to_string()))
}

/// Serialize the series as `[time, price]` pairs, or `None` when there is nothing to show
pub fn format_prices(prices: &PriceSeries) -> Result<Option<String>, ScoreError> {
    if prices.is_empty() {
        return Ok(None);
    }

    let pairs: Vec<(String, f64)> = prices
        .points()
        .iter()
        .map(|p| (p.timestamp.format(PRICE_TIME_FORMAT).to_string(), p.close))
        .collect();

    serde_json::to_string(&pairs)
        .map(Some)
        .map_err(|e| ScoreError::Prompt(e.to_string()))
}

/// Compose the full instruction sent to the model
pub fn build_prompt(tweets: &TweetBundle, prices: &PriceSeries) -> Result<String, ScoreError> {
    let tweet_block = format_tweets(tweets)?;
    let price_block = format_prices(prices)?;

    let mut prompt = String::from(
        "You are a crypto market analyst reviewing tweets from a crypto project's official account.\n\n\
         Context:\n\
         - Look for unique, new information that could move the token's price\n\
         - \"recent_tweet\" is the newest tweet; \"past_tweets\" are older tweets, newest first\n\n",
    );

    prompt.push_str("Tweets:\n");
    prompt.push_str(&tweet_block);
    prompt.push_str("\n\n");

    if let Some(price_block) = price_block {
        prompt.push_str(
            "Recent Price Data (hourly USD closes as [time, price], oldest first, up to the recent tweet):\n",
        );
        prompt.push_str(&price_block);
        prompt.push_str("\n\n");
    }

    prompt.push_str(
        "Task: Decide whether the most recent tweet carries unique, price-relevant information, \
         or whether it repeats earlier announcements, in light of the recent price movement.\n\n\
         Consider:\n\
         1. Is this new information or a repeat of previous announcements?\n\
         2. Could it move the token's price?\n\
         3. How does it relate to the recent price action?\n\n\
         Respond with EXACTLY one line in this format:\n\
         Score: <integer 0-100>\n\n\
         0 means stale or irrelevant, 100 means certainly new and price-moving. \
         Do not add any explanation.",
    );

    Ok(prompt)
}

fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Score:\s*(-?[0-9]+)").expect("score pattern is valid"))
}

/// Extract and validate the score from a raw model reply
///
/// Only the first integer after the literal `Score:` label counts.
pub fn parse_score(raw: &str) -> Result<Score, ScoreError> {
    let digits = score_pattern()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ScoreError::UnexpectedResponse(raw.to_string()))?;

    digits
        .parse::<i64>()
        .ok()
        .and_then(Score::new)
        .ok_or_else(|| ScoreError::OutOfRange(digits.to_string()))
}

/// Turns a tweet bundle and price series into a validated score
#[derive(Clone)]
pub struct ScoringEngine {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl ScoringEngine {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the prompt, call the model once, parse the reply
    pub async fn score(&self, tweets: &TweetBundle, prices: &PriceSeries) -> Result<Score, ScoreError> {
        let prompt = build_prompt(tweets, prices)?;
        tracing::debug!(
            "Scoring with {} ({} tweets, {} price points, {} prompt chars)",
            self.model,
            tweets.len(),
            prices.len(),
            prompt.len()
        );

        let reply = self.generator.generate_text(&self.model, &prompt).await?;
        let result = parse_score(&reply);

        if let Err(e) = &result {
            tracing::warn!("Model reply rejected: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use crate::ports::reasoning::MockTextGenerator;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(hours_ago: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            - Duration::hours(hours_ago)
    }

    fn bundle() -> TweetBundle {
        let records = (0..6)
            .map(|i| TweetRecord {
                tweet_id: format!("{}", 100 + i),
                body: format!("announcement number {}", i),
                created_at: at(i * 24),
                author_handle: "@proj".to_string(),
            })
            .collect();
        TweetBundle::from_records(records).unwrap()
    }

    fn prices() -> PriceSeries {
        PriceSeries::from_points(
            vec![PricePoint::new(at(2), 0.5), PricePoint::new(at(1), 0.75)],
            at(0),
        )
    }

    #[test]
    fn test_parse_exact_line() {
        assert_eq!(parse_score("Score: 73").unwrap().value(), 73);
    }

    #[test]
    fn test_parse_ignores_surrounding_text() {
        assert_eq!(parse_score("  Score:7\n").unwrap().value(), 7);
        assert_eq!(
            parse_score("Thinking it over...\nScore: 55 (moderate)").unwrap().value(),
            55
        );
        assert_eq!(parse_score("Score: 20\nScore: 90").unwrap().value(), 20);
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(parse_score("Score: 101"), Err(ScoreError::OutOfRange("101".into())));
        assert_eq!(parse_score("Score: -3"), Err(ScoreError::OutOfRange("-3".into())));
        assert_eq!(
            parse_score("Score: 99999999999999999999999").unwrap_err().to_string(),
            "Score out of range: 99999999999999999999999"
        );
    }

    #[test]
    fn test_parse_no_match() {
        let err = parse_score("I think it's good").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected model response: I think it's good");
        assert!(parse_score("score: 80").is_err());
        assert!(parse_score("Score: high").is_err());
    }

    #[test]
    fn test_parse_is_deterministic() {
        for raw in ["Score: 73", "Score: 101", "nope", ""] {
            assert_eq!(parse_score(raw), parse_score(raw));
        }
    }

    #[test]
    fn test_prompt_contains_tweets_and_prices() {
        let prompt = build_prompt(&bundle(), &prices()).unwrap();

        assert!(prompt.contains("\"recent_tweet\""));
        assert!(prompt.contains("\"past_tweets\""));
        assert!(prompt.contains("announcement number 0"));
        assert!(prompt.contains("announcement number 5"));
        assert!(prompt.contains("2025-03-01 12:00:00"));
        assert!(prompt.contains("Recent Price Data"));
        assert!(prompt.contains("[\"2025-03-01 11:00\",0.75]"));
        assert!(prompt.contains("Score: <integer 0-100>"));
    }

    #[test]
    fn test_prompt_omits_empty_prices() {
        let prompt = build_prompt(&bundle(), &PriceSeries::empty()).unwrap();
        assert!(!prompt.contains("Recent Price Data"));
        assert!(prompt.contains("announcement number 0"));
    }

    #[test]
    fn test_format_prices_keeps_sub_nano_closes() {
        let series = PriceSeries::from_points(
            vec![
                PricePoint::new(at(2), 2e-9),
                PricePoint::new(at(1), 9e-9),
            ],
            at(0),
        );

        let rendered = format_prices(&series).unwrap().unwrap();
        let pairs: Vec<(String, f64)> = serde_json::from_str(&rendered).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "2025-03-01 10:00");
        assert_relative_eq!(pairs[0].1, 2e-9);
        assert_relative_eq!(pairs[1].1, 9e-9);
        assert!(pairs[0].1 > 0.0);
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        let err = parse_score("Score: \u{0667}\u{0663}").unwrap_err();
        assert!(matches!(err, ScoreError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_format_prices_empty() {
        assert_eq!(format_prices(&PriceSeries::empty()).unwrap(), None);
    }

    #[tokio::test]
    async fn test_score_calls_model_once() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate_text()
            .withf(|model, prompt| model == "gemini-1.5-flash" && prompt.contains("Score:"))
            .times(1)
            .returning(|_, _| Ok("Score: 64".to_string()));

        let engine = ScoringEngine::new(Arc::new(generator), "gemini-1.5-flash");
        let score = engine.score(&bundle(), &prices()).await.unwrap();

        assert_eq!(score.value(), 64);
    }

    #[tokio::test]
    async fn test_score_generation_failure_described() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate_text()
            .times(1)
            .returning(|_, _| Err(PortError::Communication("timeout".to_string())));

        let engine = ScoringEngine::new(Arc::new(generator), "m");
        let err = engine.score(&bundle(), &prices()).await.unwrap_err();

        assert_eq!(err.to_string(), "Communication error: timeout");
    }

    #[tokio::test]
    async fn test_score_malformed_reply() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate_text()
            .times(1)
            .returning(|_, _| Ok("buy".to_string()));

        let engine = ScoringEngine::new(Arc::new(generator), "m");
        let err = engine.score(&bundle(), &prices()).await.unwrap_err();

        assert_eq!(err, ScoreError::UnexpectedResponse("buy".to_string()));
    }
}
