//! Extraction engine.
//!
//! The engine is split into focused submodules under `src/engine/`, wired
//! together by [`Extractor`].
//!
//! ## How the parts work together
//!
//! ```text
//! rule specs ──┐
//!              │  Registry::from_specs          (registry.rs)
//!              └───────────────┬──────────────
//!                              │  compiled rules + locality map + thresholds
//!                              │
//! text ── Document::new ───────┤
//!         (tokenizer.rs)       │  raw tokens, cleaned tokens (index-aligned)
//!                              v
//!                    matcher::run, once per rule, registry order
//!                      (matcher.rs)
//!                              │  Vec<Match>
//!                              v
//!                    Aggregator::absorb            (aggregate.rs)
//!                      - one Record per index
//!                      - flags union, tie-break on word/context
//!                              │
//!                              v
//!                    report::build                 (report.rs)
//!                      - rows sorted by index
//!                      - context strings, extraction, region
//!                              │
//!                              v
//!                           Report
//! ```
//!
//! ## Responsibilities by module
//!
//! - `tokenizer.rs`: whitespace tokens and their punctuation-stripped twins.
//! - `registry.rs`: compiles `RuleSpec`s (fail fast on bad patterns), holds the
//!   locality → region map and the field → threshold map.
//! - `matcher.rs`: the single generic rule evaluator.
//! - `aggregate.rs`: per-index merge of matches into records.
//! - `report.rs`: the output table and its derived columns.
//! - `extractor.rs`: runs the stages in order and times them.
//! - `metrics.rs`: timing/counter structs for verbose runs.
//!
//! ## Adding new rules
//!
//! Rules are data. Add a `rule! { .. }` entry under `src/rules/**`; a new field
//! also needs a `Field` variant, a `FieldSet` bit and a `FIELD_NAMES` row.
//!
//! ## Debugging
//!
//! Every match is emitted as a `tracing` event at `info` level (target
//! `jarida::engine::matcher`), rule progress at `debug`.

#[path = "engine/aggregate.rs"]
mod aggregate;
#[path = "engine/extractor.rs"]
mod extractor;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/registry.rs"]
mod registry;
#[path = "engine/report.rs"]
mod report;
#[path = "engine/tokenizer.rs"]
mod tokenizer;

pub use extractor::Extractor;
pub use metrics::{RuleMetrics, RunMetrics, RunResult};
pub use registry::{CompiledRule, DEFAULT_THRESHOLD, LocalityMap, Registry};
pub use report::{NO_REGION, Report, Row};
pub use tokenizer::{Document, strip_punctuation, tokenize};
