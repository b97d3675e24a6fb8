//! Pipeline driver.
//!
//! [`Extractor`] owns a tokenized [`Document`] and borrows a compiled
//! [`Registry`]. A run is one deterministic pass:
//!
//! ```text
//! for rule in registry.rules():            (registry order)
//!     tokens  = document.tokens(rule.source)
//!     matches = matcher::run(rule, tokens)
//!     aggregator.absorb(rule, matches)
//! records = aggregator.finish(registry.known())
//! report  = report::build(records, ...)
//! ```
//!
//! The aggregator is the only mutable state and is consumed before the report
//! is built, so identical input, rules and options give identical reports.

use super::aggregate::Aggregator;
use super::matcher;
use super::metrics::{RuleMetrics, RunMetrics, RunResult};
use super::registry::Registry;
use super::report::{self, Report};
use super::tokenizer::Document;
use crate::api::Options;
use std::time::Instant;
use tracing::debug;

/// Runs a [`Registry`] over one document.
///
/// Usage: `Extractor::new(text, &registry).run(&options)`.
#[derive(Debug)]
pub struct Extractor<'a> {
    document: Document,
    registry: &'a Registry,
}

impl<'a> Extractor<'a> {
    /// Tokenize `text` for a run with `registry`.
    pub fn new(text: &str, registry: &'a Registry) -> Self {
        Self::with_document(Document::new(text), registry)
    }

    /// Use an already tokenized document.
    pub fn with_document(document: Document, registry: &'a Registry) -> Self {
        Extractor { document, registry }
    }

    /// Run every rule and build the report, with per-rule timings.
    pub fn run_with_metrics(self, options: &Options) -> RunResult {
        let total_start = Instant::now();
        let mut aggregator = Aggregator::new(options.tie_break);
        let mut rules = Vec::with_capacity(self.registry.rules().len());

        debug!(tokens = self.document.len(), rules = self.registry.rules().len(), "extraction started");

        let matching_start = Instant::now();
        for (id, rule) in self.registry.rules().iter().enumerate() {
            let rule_start = Instant::now();
            let tokens = self.document.tokens(rule.source);
            let matches = matcher::run(rule, tokens);

            rules.push(RuleMetrics {
                rule: rule.name.clone(),
                field: rule.field,
                duration: rule_start.elapsed(),
                evaluated: tokens.len(),
                matched: matches.len(),
                threshold: rule.threshold(),
            });
            aggregator.absorb(id, rule, matches);
        }
        let matching = matching_start.elapsed();

        let records = aggregator.len();
        let report_start = Instant::now();
        let report =
            report::build(aggregator.finish(self.registry.known()), self.registry, &self.document, options.region_scope);
        let report_elapsed = report_start.elapsed();

        debug!(records, "extraction finished");

        RunResult {
            report,
            metrics: RunMetrics {
                total: total_start.elapsed(),
                matching,
                report: report_elapsed,
                rules,
                tokens: self.document.len(),
                records,
            },
        }
    }

    /// Run every rule and build the report.
    ///
    /// Convenience wrapper that discards timing details. Use
    /// [`run_with_metrics`](Self::run_with_metrics) to inspect per-rule work.
    pub fn run(self, options: &Options) -> Report {
        self.run_with_metrics(options).report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Context, TieBreak};
    use crate::{Field, LocalityMap, Predicate, RuleSpec, Source, Window};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn keyword(name: &str, field: Field, word: &str) -> RuleSpec {
        RuleSpec {
            name: name.into(),
            field,
            predicate: Predicate::Keyword(word.into()),
            threshold: None,
            window: Window::new(3, 3),
            source: Source::Raw,
            extraction: None,
        }
    }

    #[test]
    fn two_rules_on_one_index_make_one_record() {
        let specs = vec![keyword("amount", Field::Amount, "X"), keyword("area", Field::Area, "X")];
        let registry = Registry::from_specs(&specs, &HashMap::new(), LocalityMap::default()).unwrap();
        let report = Extractor::new("a b c d e X f g", &registry).run(&Options::default());

        assert_eq!(report.len(), 1);
        let row = report.row_at(5).unwrap();
        assert_eq!(row.flag(Field::Amount), Some(true));
        assert_eq!(row.flag(Field::Area), Some(true));
        assert_eq!(row.context, "c d e X f g");
    }

    #[test]
    fn cleaned_rules_see_cleaned_tokens_and_context() {
        let specs = vec![RuleSpec {
            name: "year".into(),
            field: Field::Year,
            predicate: Predicate::Regex(r"\d{4}".into()),
            threshold: None,
            window: Window::new(2, 0),
            source: Source::Cleaned,
            extraction: None,
        }];
        let registry = Registry::from_specs(&specs, &HashMap::new(), LocalityMap::default()).unwrap();
        let report = Extractor::new("صادر في (2019).", &registry).run(&Options::default());
        let row = report.row_at(2).unwrap();
        assert_eq!(row.word, "2019");
        assert_eq!(row.context, "صادر في 2019");
    }

    #[test]
    fn metrics_cover_every_rule() {
        let specs = vec![keyword("a", Field::Decree, "قرار"), keyword("b", Field::Judgment, "حكم")];
        let registry = Registry::from_specs(&specs, &HashMap::new(), LocalityMap::default()).unwrap();
        let run = Extractor::new("قرار و قرار", &registry).run_with_metrics(&Options::default());

        assert_eq!(run.metrics.rules.len(), 2);
        assert_eq!(run.metrics.rules[0].matched, 2);
        assert_eq!(run.metrics.rules[1].matched, 0);
        assert_eq!(run.metrics.rules[0].evaluated, 3);
        assert_eq!(run.metrics.tokens, 3);
        assert_eq!(run.metrics.records, 2);
        assert!(run.metrics.matching <= run.metrics.total);
    }

    #[test]
    fn first_wins_keeps_earlier_context() {
        let mut wide = keyword("wide", Field::Amount, "X");
        wide.window = Window::new(1, 1);
        let narrow = RuleSpec { window: Window::new(0, 0), ..keyword("narrow", Field::Area, "X") };
        let registry = Registry::from_specs(&[wide, narrow], &HashMap::new(), LocalityMap::default()).unwrap();

        let last = Extractor::new("a X b", &registry).run(&Options::default());
        assert_eq!(last.row_at(1).unwrap().context, "X");

        let options = Options { tie_break: TieBreak::FirstWins, ..Options::default() };
        let first = Extractor::new("a X b", &registry).run(&options);
        assert_eq!(first.row_at(1).unwrap().context, "a X b");
    }

    proptest! {
        #[test]
        fn rows_respect_bounds_and_windows(words in proptest::collection::vec("(درهم|متر|حكم|2019|[a-z]{1,3}|DH)", 0..40)) {
            let text = words.join(" ");
            let registry = Registry::builtin(&Context { current_year: 2024 }, &Options::default()).unwrap();
            let report = Extractor::new(&text, &registry).run(&Options::default());
            let widest = registry.rules().iter().map(|r| r.window.max_len()).max().unwrap_or(1);

            let mut last = None;
            for row in report.rows() {
                prop_assert!(row.index < words.len());
                prop_assert!(last.is_none_or(|prev| prev < row.index));
                last = Some(row.index);
                prop_assert!(row.context.split(' ').count() <= widest);
                prop_assert_eq!(row.flags.len(), registry.fields().len());
            }
        }
    }
}
