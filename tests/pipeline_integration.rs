//! Decision Pipeline Integration Tests
//!
//! Integration tests that verify the analysis components work together:
//! 1. TweetSource -> PriceSource -> ScoringEngine flow for a single token
//! 2. Verdict classification at the threshold boundary
//! 3. Batch isolation: one failing token never stops the run
//!
//! All tests are deterministic (no real network calls) and use the port mocks.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use tweet_alpha::adapters::cli::run_analysis;
use tweet_alpha::application::{parse_score, DecisionPipeline, ScoringEngine, NO_PRICE_DATA_REASON};
use tweet_alpha::domain::{
    Assessment, PricePoint, PriceSeries, Score, TokenDescriptor, TweetBundle, TweetRecord, Verdict,
};
use tweet_alpha::ports::mocks::{MockPriceSource, MockTokenSource, MockTweetSource, ScriptedGenerator};
use tweet_alpha::ports::PortError;

// ============================================================================
// Test Fixtures
// ============================================================================

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Create a bundle of `count` tweets one hour apart, newest at `base_time()`
fn create_bundle(handle: &str, count: usize) -> TweetBundle {
    let records = (0..count)
        .map(|i| TweetRecord {
            tweet_id: format!("{}", 1000 + i),
            body: format!("{} update #{}", handle, i),
            created_at: base_time() - Duration::hours(i as i64),
            author_handle: handle.to_string(),
        })
        .collect();
    TweetBundle::from_records(records).unwrap()
}

/// Create an hourly series ending one hour before the anchor
fn create_series(hours: usize) -> PriceSeries {
    let points = (1..=hours).map(|h| {
        PricePoint::new(base_time() - Duration::hours(h as i64), 0.0001 * h as f64)
    });
    PriceSeries::from_points(points, base_time())
}

fn create_token(id: &str, pair: &str, handle: &str) -> TokenDescriptor {
    TokenDescriptor::new(id, pair, Some(handle.to_string()), "ethereum")
}

fn create_pipeline(
    tweets: MockTweetSource,
    prices: MockPriceSource,
    generator: ScriptedGenerator,
) -> DecisionPipeline {
    DecisionPipeline::new(
        Arc::new(tweets),
        Arc::new(prices),
        ScoringEngine::new(Arc::new(generator), "gemini-1.5-flash"),
    )
}

// ============================================================================
// Single Token Flow
// ============================================================================

#[tokio::test]
async fn test_high_score_is_positive() {
    let tweets = MockTweetSource::new().with_bundle("@proj", create_bundle("@proj", 6));
    let prices = MockPriceSource::new().with_series("P1", create_series(24));
    let generator = ScriptedGenerator::new().with_reply("Fresh partnership news.\nScore: 80");
    let pipeline = create_pipeline(tweets.clone(), prices.clone(), generator.clone());

    let result = pipeline.analyze(&create_token("T1", "P1", "@proj")).await;

    assert_eq!(result.verdict, Verdict::Positive);
    assert_eq!(result.reason, "Score: 80");

    // Price history is requested up to the recent tweet
    let price_calls = prices.get_calls();
    assert_eq!(price_calls.len(), 1);
    assert_eq!(price_calls[0].chain, "ethereum");
    assert_eq!(price_calls[0].anchor, base_time());

    // Exactly one model call, with the configured model
    let calls = generator.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "gemini-1.5-flash");
    assert!(calls[0].1.contains("@proj update #0"));
}

#[tokio::test]
async fn test_low_score_is_negative() {
    let tweets = MockTweetSource::new().with_bundle("@proj", create_bundle("@proj", 6));
    let prices = MockPriceSource::new().with_series("P1", create_series(24));
    let generator = ScriptedGenerator::new().with_reply("Repeats last week's listing.\nScore: 40");
    let pipeline = create_pipeline(tweets, prices, generator);

    let result = pipeline.analyze(&create_token("T1", "P1", "@proj")).await;

    assert_eq!(result.verdict, Verdict::Negative);
    assert_eq!(result.reason, "Score: 40");
}

#[tokio::test]
async fn test_threshold_boundary() {
    let tweets = MockTweetSource::new().with_bundle("@proj", create_bundle("@proj", 6));
    let prices = MockPriceSource::new().with_series("P1", create_series(24));
    let generator = ScriptedGenerator::new()
        .with_reply("Score: 60")
        .with_reply("Score: 59");
    let pipeline = create_pipeline(tweets, prices, generator);
    let token = create_token("T1", "P1", "@proj");

    assert_eq!(pipeline.analyze(&token).await.verdict, Verdict::Positive);
    assert_eq!(pipeline.analyze(&token).await.verdict, Verdict::Negative);
}

#[tokio::test]
async fn test_insufficient_tweets_skips_price_and_model() {
    let tweets = MockTweetSource::new();
    let prices = MockPriceSource::new();
    let generator = ScriptedGenerator::new().with_reply("Score: 99");
    let pipeline = create_pipeline(tweets, prices.clone(), generator.clone());

    let result = pipeline.analyze(&create_token("T1", "P1", "@proj")).await;

    assert_eq!(
        result,
        Assessment::indeterminate("No recent tweets found for Twitter handle: @proj")
    );
    assert!(prices.get_calls().is_empty());
    assert!(generator.get_calls().is_empty());
}

#[tokio::test]
async fn test_missing_prices_never_reach_model() {
    let tweets = MockTweetSource::new().with_bundle("@proj", create_bundle("@proj", 6));
    let generator = ScriptedGenerator::new().with_reply("Score: 99");
    let pipeline = create_pipeline(tweets, MockPriceSource::new(), generator.clone());

    let result = pipeline.analyze(&create_token("T1", "P1", "@proj")).await;

    assert_eq!(result, Assessment::indeterminate(NO_PRICE_DATA_REASON));
    assert!(generator.get_calls().is_empty());
}

#[tokio::test]
async fn test_unparseable_reply_is_indeterminate() {
    let tweets = MockTweetSource::new().with_bundle("@proj", create_bundle("@proj", 6));
    let prices = MockPriceSource::new().with_series("P1", create_series(24));
    let generator = ScriptedGenerator::new().with_reply("I cannot judge this tweet.");
    let pipeline = create_pipeline(tweets, prices, generator);

    let result = pipeline.analyze(&create_token("T1", "P1", "@proj")).await;

    assert_eq!(result.verdict, Verdict::Indeterminate);
    assert!(!result.is_decision());
}

// ============================================================================
// Batch Run
// ============================================================================

#[tokio::test]
async fn test_batch_isolates_failing_token() {
    let tweets = MockTweetSource::new()
        .with_bundle("@one", create_bundle("@one", 6))
        .with_error("@two", PortError::Database("connection reset".into()))
        .with_bundle("@three", create_bundle("@three", 8));
    let prices = MockPriceSource::new()
        .with_series("P1", create_series(24))
        .with_series("P3", create_series(48));
    let generator = ScriptedGenerator::new()
        .with_reply("Score: 75")
        .with_reply("Score: 10");
    let pipeline = create_pipeline(tweets, prices, generator);

    let tokens = MockTokenSource::new(vec![
        create_token("T1", "P1", "@one"),
        create_token("T2", "P2", "@two"),
        create_token("T3", "P3", "@three"),
    ]);

    let results = run_analysis(&tokens, &pipeline, 3).await.unwrap();

    let ids: Vec<&str> = results.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["T1", "T2", "T3"]);

    assert_eq!(results.get("T1").unwrap().verdict, Verdict::Positive);
    let failed = results.get("T2").unwrap();
    assert_eq!(failed.verdict, Verdict::Indeterminate);
    assert!(failed.reason.starts_with("Error in analysis pipeline:"));
    assert_eq!(results.get("T3").unwrap().verdict, Verdict::Negative);

    let summary = results.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.positive, 1);
    assert_eq!(summary.negative, 1);
    assert_eq!(summary.indeterminate, 1);
}

#[tokio::test]
async fn test_batch_survives_panicking_token() {
    let tweets = MockTweetSource::new()
        .with_panic("@boom")
        .with_bundle("@ok", create_bundle("@ok", 6));
    let prices = MockPriceSource::new().with_series("P2", create_series(12));
    let generator = ScriptedGenerator::new().with_reply("Score: 90");
    let pipeline = create_pipeline(tweets, prices, generator);

    let results = pipeline
        .analyze_all(&[create_token("T1", "P1", "@boom"), create_token("T2", "P2", "@ok")])
        .await;

    assert_eq!(results.len(), 2);
    assert!(results.get("T1").unwrap().reason.starts_with("Unexpected error:"));
    assert_eq!(results.get("T2").unwrap().verdict, Verdict::Positive);
}

// ============================================================================
// Reply Parsing
// ============================================================================

#[test]
fn test_parse_score_accepts_range_edges() {
    assert_eq!(parse_score("Score: 0").unwrap(), Score::new(0).unwrap());
    assert_eq!(parse_score("Score: 100").unwrap(), Score::new(100).unwrap());
    assert!(parse_score("Score: 101").is_err());
    assert!(parse_score("no score here").is_err());
}
