//! Per-run accumulation of token assessments

use super::verdict::{Assessment, Verdict};

/// Insertion-ordered token id -> assessment mapping built by one batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    entries: Vec<(String, Assessment)>,
}

/// Outcome counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub indeterminate: usize,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a token's outcome. Returns `false` (and keeps the first entry) when the
    /// token id was already recorded in this run.
    pub fn record(&mut self, token_id: impl Into<String>, assessment: Assessment) -> bool {
        let token_id = token_id.into();
        if self.contains(&token_id) {
            return false;
        }
        self.entries.push((token_id, assessment));
        true
    }

    pub fn contains(&self, token_id: &str) -> bool {
        self.entries.iter().any(|(id, _)| id == token_id)
    }

    pub fn get(&self, token_id: &str) -> Option<&Assessment> {
        self.entries
            .iter()
            .find(|(id, _)| id == token_id)
            .map(|(_, a)| a)
    }

    /// Entries in processing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Assessment)> {
        self.entries.iter().map(|(id, a)| (id.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        self.entries
            .iter()
            .fold(RunSummary::default(), |mut summary, (_, assessment)| {
                summary.total += 1;
                match assessment.verdict {
                    Verdict::Positive => summary.positive += 1,
                    Verdict::Negative => summary.negative += 1,
                    Verdict::Indeterminate => summary.indeterminate += 1,
                }
                summary
            })
    }
}
