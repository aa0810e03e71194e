//! Application Layer - Use cases
//!
//! - `scorer`: prompt construction, the single model call, reply parsing
//! - `pipeline`: per-token decision flow and the sequential batch run
//! - `report`: outcome and summary log lines

pub mod scorer;
pub mod pipeline;
pub mod report;

pub use scorer::{ScoringEngine, ScoreError, build_prompt, parse_score};
pub use pipeline::{DecisionPipeline, PipelineError, NO_HANDLE_REASON, NO_PRICE_DATA_REASON};
pub use report::{log_summary, log_details};
