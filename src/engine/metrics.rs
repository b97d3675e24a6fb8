//! Engine run metrics.
//!
//! The intended usage is:
//!
//! - `Extractor::run` for normal operation.
//! - `Extractor::run_with_metrics` for profiling and for inspecting what each
//!   rule contributed.
//!
//! Counters are cheap (one integer per rule); timings use `Instant`.

use super::report::Report;
use crate::Field;
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Extractor::run_with_metrics`](super::Extractor::run_with_metrics).
    pub total: Duration,
    /// Cumulative time spent evaluating rules.
    pub matching: Duration,
    /// Time spent building the report from records.
    pub report: Duration,
    /// One entry per rule, in evaluation order.
    pub rules: Vec<RuleMetrics>,
    /// Tokens in the document.
    pub tokens: usize,
    /// Distinct indexes that produced a record.
    pub records: usize,
}

/// Timing and counters for a single rule run.
#[derive(Debug, Clone)]
pub struct RuleMetrics {
    pub rule: String,
    pub field: Field,
    /// Elapsed time for the rule.
    pub duration: Duration,
    /// Tokens the predicate was evaluated on.
    pub evaluated: usize,
    /// Tokens that satisfied the predicate.
    pub matched: usize,
    /// Fuzzy threshold in force, if the rule is fuzzy.
    pub threshold: Option<u8>,
}

/// Extractor output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub report: Report,
    pub metrics: RunMetrics,
}
