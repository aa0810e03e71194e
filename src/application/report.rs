//! Run reporting
//!
//! Log lines for per-token outcomes and the end-of-run summary.

use crate::domain::{Assessment, RunResult, TokenDescriptor};

fn optional_figure(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "n/a".to_string())
}

/// Progress block emitted before a token is analysed
pub fn log_token_header(token: &TokenDescriptor) {
    let rule = "=".repeat(60);
    tracing::info!(
        "\n{}\nAnalyzing Token: {}\n   Pair ID     : {}\n   Twitter     : {}\n   Chain       : {}\n   Market Cap  : {}\n   Volume 24h  : {}\n{}",
        rule,
        token.token_id,
        token.pair_id,
        token.twitter_handle.as_deref().unwrap_or("n/a"),
        token.chain,
        optional_figure(token.market_cap),
        optional_figure(token.volume_24h),
        rule
    );
}

/// One line per outcome: info for decisions, warn for indeterminate results
pub fn log_outcome(token_id: &str, assessment: &Assessment) {
    if assessment.is_decision() {
        tracing::info!("Token {}: {}", token_id, assessment);
    } else {
        tracing::warn!("Token {}: {}", token_id, assessment);
    }
}

pub fn log_summary(results: &RunResult) {
    let summary = results.summary();
    tracing::info!("Analysis Summary:");
    tracing::info!("Total tokens analyzed: {}", summary.total);
    tracing::info!("Positive signals: {}", summary.positive);
    tracing::info!("Negative signals: {}", summary.negative);
    tracing::info!("Failed analysis: {}", summary.indeterminate);
}

pub fn log_details(results: &RunResult) {
    tracing::info!("Detailed Analysis Results:");
    for (token_id, assessment) in results.iter() {
        log_outcome(token_id, assessment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_figure() {
        assert_eq!(optional_figure(Some(1234.5)), "1234.50");
        assert_eq!(optional_figure(None), "n/a");
    }
}
