use crate::engine::{Extractor, Registry, Report, RunResult};
use crate::{Field, Result};
use chrono::{Datelike, Local};
use std::collections::HashMap;
use std::time::Duration;

/// Extraction context.
///
/// This holds what the engine needs from its environment. The year rule
/// accepts 1980 up to and including `current_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub current_year: i32,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) { Self { current_year: 2024 } } else { Self { current_year: Local::now().year() } }
    }
}

/// Which LOI (legal reference) pattern to use.
///
/// Gazette references look like `2.22.645`. Two readings of the middle
/// segment exist in practice, so both are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoiVariant {
    /// `^2\.\d{2}\.\d{3}$`: any two-digit middle segment.
    #[default]
    Strict,
    /// `^2\.(0[0-9]|1[0-9]|2[0-9]|3[0-9])\.\d{3}$`: middle segment 00..=39.
    Bounded,
}

/// Who writes `word`/`context` when several rules hit the same index.
///
/// Field flags are unioned under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The rule evaluated last overwrites earlier ones.
    #[default]
    LastWins,
    /// The first rule to hit an index keeps it.
    FirstWins,
}

/// Where the region column looks for locality names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionScope {
    /// The row's own context window.
    #[default]
    Context,
    /// The whole document; every row gets the same region.
    Document,
}

/// Options that affect which rules run and how results are merged.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub loi: LoiVariant,
    pub tie_break: TieBreak,
    pub region_scope: RegionScope,
    /// Also flag the issue-number word `عدد` (`is_عدد` column).
    pub issue_number: bool,
    /// Fuzzy threshold per field, replacing the rule's own.
    pub thresholds: HashMap<Field, u8>,
}

/// Result from [`extract`] and [`extract_with`].
#[derive(Debug, Clone)]
pub struct ExtractResult {
    pub report: Report,
    /// Total elapsed time spent tokenizing, matching and reporting.
    pub elapsed: Duration,
}

/// Per-rule trace entry in [`ExtractDetails`].
#[derive(Debug, Clone)]
pub struct RuleTrace {
    pub rule: String,
    /// Column header of the rule's field.
    pub field: &'static str,
    pub duration: Duration,
    pub evaluated: usize,
    pub matched: usize,
    pub threshold: Option<u8>,
}

/// Additional details returned by [`extract_verbose_with`].
///
/// This is meant for debugging rule sets and thresholds.
#[derive(Debug, Clone)]
pub struct ExtractDetails {
    pub total: Duration,
    pub matching: Duration,
    pub report: Duration,
    pub tokens: usize,
    pub records: usize,
    /// One entry per rule, in evaluation order.
    pub rules: Vec<RuleTrace>,
}

/// Result from [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExtractResultVerbose {
    pub report: Report,
    pub elapsed: Duration,
    pub details: ExtractDetails,
}

/// Extract with the built-in rule set and a default [`Context`].
///
/// # Example
/// ```
/// use jarida::{Field, extract};
///
/// let out = extract("المرسوم رقم 2.22.645").unwrap();
/// let row = out.report.row_at(2).unwrap();
/// assert_eq!(row.flag(Field::Loi), Some(true));
/// ```
pub fn extract(text: &str) -> Result<ExtractResult> {
    extract_with(text, &Context::default(), &Options::default())
}

/// Extract with the built-in rule set and the provided `context`/`options`.
///
/// Use this when you want deterministic output by pinning the current year.
pub fn extract_with(text: &str, context: &Context, options: &Options) -> Result<ExtractResult> {
    let run = run(text, context, options)?;
    Ok(ExtractResult { report: run.report, elapsed: run.metrics.total })
}

/// Extract and return per-rule timings and counters alongside the report.
pub fn extract_verbose_with(text: &str, context: &Context, options: &Options) -> Result<ExtractResultVerbose> {
    let run = run(text, context, options)?;
    let metrics = run.metrics;

    let details = ExtractDetails {
        total: metrics.total,
        matching: metrics.matching,
        report: metrics.report,
        tokens: metrics.tokens,
        records: metrics.records,
        rules: metrics
            .rules
            .into_iter()
            .map(|r| RuleTrace {
                rule: r.rule,
                field: r.field.name(),
                duration: r.duration,
                evaluated: r.evaluated,
                matched: r.matched,
                threshold: r.threshold,
            })
            .collect(),
    };

    Ok(ExtractResultVerbose { report: run.report, elapsed: metrics.total, details })
}

fn run(text: &str, context: &Context, options: &Options) -> Result<RunResult> {
    let registry = Registry::builtin(context, options)?;
    Ok(Extractor::new(text, &registry).run_with_metrics(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn reference_context() -> Context {
        Context { current_year: 2024 }
    }

    #[test]
    fn extract_with_returns_rows() {
        let res = extract_with("بمبلغ 500 درهم", &reference_context(), &Options::default()).unwrap();
        assert_eq!(res.report.len(), 1);
        assert!(res.elapsed >= Duration::ZERO);

        let row = res.report.row_at(2).unwrap();
        assert_eq!(row.word, "درهم");
        assert_eq!(row.final_extraction, "500");
    }

    #[test]
    fn extract_verbose_includes_every_rule() {
        let res = extract_verbose_with("سنة 2019", &reference_context(), &Options::default()).unwrap();
        assert_eq!(res.elapsed, res.details.total);
        assert!(res.details.matching <= res.details.total);
        assert_eq!(res.details.tokens, 2);
        assert_eq!(res.details.records, 1);

        let year = res.details.rules.iter().find(|r| r.field == "is_year").unwrap();
        assert_eq!(year.matched, 1);
        let gazette = res.details.rules.iter().find(|r| r.field == "is_جريدة").unwrap();
        assert_eq!(gazette.threshold, Some(99));
    }

    #[test]
    fn year_before_1980_is_rejected_up_front() {
        let err = extract_with("1985", &Context { current_year: 1975 }, &Options::default()).unwrap_err();
        assert!(matches!(err, Error::YearOutOfRange { year: 1975, .. }));
    }

    #[test]
    fn year_past_9999_is_rejected_up_front() {
        let err = extract_with("2019", &Context { current_year: 2_000_000_000 }, &Options::default()).unwrap_err();
        assert!(matches!(err, Error::YearOutOfRange { year: 2_000_000_000, last: 9999, .. }));
    }

    #[test]
    fn default_context_is_pinned_in_tests() {
        assert_eq!(Context::default(), reference_context());
    }
}
