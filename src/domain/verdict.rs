//! Scores, verdicts and the (verdict, reason) pair produced per token

use std::fmt;

/// Scores at or above this value are classified as positive
pub const POSITIVE_THRESHOLD: u8 = 60;

/// Upper bound of the score scale
pub const MAX_SCORE: u8 = 100;

/// Model-estimated likelihood (0-100) that the recent tweet moves the price
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    /// Validate a raw integer; anything outside 0..=100 is not a score
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_SCORE)
            .map(Self)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of analysing one token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Recent tweet carries new, price-relevant information
    Positive,
    /// Recent tweet repeats old news or is not significant
    Negative,
    /// No valid score could be obtained
    Indeterminate,
}

impl Verdict {
    pub fn is_decision(self) -> bool {
        !matches!(self, Verdict::Indeterminate)
    }

    /// Upper-case label used in log lines
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Positive => "POSITIVE",
            Verdict::Negative => "NEGATIVE",
            Verdict::Indeterminate => "FAIL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Positive => write!(f, "positive"),
            Verdict::Negative => write!(f, "negative"),
            Verdict::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// Map a valid score onto a decision
pub fn classify(score: Score) -> Verdict {
    if score.value() >= POSITIVE_THRESHOLD {
        Verdict::Positive
    } else {
        Verdict::Negative
    }
}

/// A verdict together with the human-readable reason behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub verdict: Verdict,
    pub reason: String,
}

impl Assessment {
    /// Classify a score; the reason is always `"Score: N"`
    pub fn scored(score: Score) -> Self {
        Self {
            verdict: classify(score),
            reason: format!("Score: {}", score),
        }
    }

    pub fn indeterminate(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Indeterminate,
            reason: reason.into(),
        }
    }

    pub fn is_decision(&self) -> bool {
        self.verdict.is_decision()
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.verdict.label(), self.reason)
    }
}
