//! Rule compilation and lookup tables.
//!
//! This module holds the *static* side of a run: everything derived once from
//! the rule list and the region table before a single token is scanned.
//!
//! Building a [`Registry`] is the only fallible step of the engine:
//!
//! 1. every `RuleSpec` is compiled into a [`CompiledRule`] (regexes built,
//!    keywords escaped and anchored, fuzzy thresholds resolved);
//! 2. the field → threshold map is collected from the fuzzy rules;
//! 3. the ordered list of known fields (report columns) is collected.
//!
//! A malformed pattern aborts the build and names the offending rule; the run
//! never starts with a rule silently skipped.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `Registry::rules`, which keeps `RuleSpec` order.
//!   Evaluation order, and therefore tie-breaking, follows it.
//! - `fields` lists each field once, in order of first appearance.

use crate::api::{Context, Options};
use crate::rules::gazette;
use crate::{Error, Field, FieldSet, Predicate, Result, RuleKind, RuleSpec, Source, Window};
use regex::Regex;
use std::collections::HashMap;

/// Rule identifier (index into the rules vector).
pub(crate) type RuleId = usize;

/// Threshold used by fuzzy rules that don't name one.
pub const DEFAULT_THRESHOLD: u8 = 90;

/// Compiled predicate of a rule.
#[derive(Debug, Clone)]
pub(crate) enum Test {
    /// `^(?:pattern)$`
    Regex(Regex),
    /// `^keyword(?:$|[^\w]|\p{Mn})`: a word boundary after the keyword,
    /// where a combining mark does not continue the word.
    Keyword(Regex),
    Fuzzy { target: String, threshold: u8 },
}

/// A rule ready to run.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub field: Field,
    pub window: Window,
    pub source: Source,
    pub kind: RuleKind,
    pub(crate) test: Test,
    pub(crate) extraction: Option<Regex>,
}

impl CompiledRule {
    fn compile(spec: &RuleSpec, overrides: &HashMap<Field, u8>) -> Result<Self> {
        let invalid = |source| Error::InvalidPattern { rule: spec.name.clone(), source };

        let test = match &spec.predicate {
            Predicate::Regex(pattern) => Test::Regex(Regex::new(&format!("^(?:{pattern})$")).map_err(invalid)?),
            Predicate::Keyword(word) => {
                let pattern = format!(r"^{}(?:$|[^\w]|\p{{Mn}})", regex::escape(word));
                Test::Keyword(Regex::new(&pattern).map_err(invalid)?)
            }
            Predicate::Fuzzy(target) => {
                let threshold =
                    overrides.get(&spec.field).copied().or(spec.threshold).unwrap_or(DEFAULT_THRESHOLD);
                if threshold > 100 {
                    return Err(Error::InvalidThreshold {
                        rule: spec.name.clone(),
                        field: spec.field.name(),
                        threshold,
                    });
                }
                Test::Fuzzy { target: target.clone(), threshold }
            }
        };

        let extraction = spec.extraction.as_deref().map(Regex::new).transpose().map_err(invalid)?;

        Ok(CompiledRule {
            name: spec.name.clone(),
            field: spec.field,
            window: spec.window,
            source: spec.source,
            kind: spec.kind(),
            test,
            extraction,
        })
    }

    /// Fuzzy threshold, `None` for regex and keyword rules.
    pub fn threshold(&self) -> Option<u8> {
        match self.test {
            Test::Fuzzy { threshold, .. } => Some(threshold),
            Test::Regex(_) | Test::Keyword(_) => None,
        }
    }

    /// Source of the extraction regex, if the rule has one.
    pub fn extraction_pattern(&self) -> Option<&str> {
        self.extraction.as_ref().map(Regex::as_str)
    }
}

/// Locality name → region name.
///
/// Flattened from a region → localities table. When two regions list the same
/// locality, the region declared first keeps it.
#[derive(Debug, Clone, Default)]
pub struct LocalityMap {
    by_name: HashMap<String, String>,
    /// Most whitespace-separated words in any locality name.
    max_words: usize,
}

impl LocalityMap {
    pub fn from_table(table: &[(&str, &[&str])]) -> Self {
        let mut by_name = HashMap::new();
        let mut max_words = 0;

        for (region, localities) in table {
            for locality in *localities {
                max_words = max_words.max(locality.split_whitespace().count());
                by_name.entry((*locality).to_string()).or_insert_with(|| (*region).to_string());
            }
        }

        LocalityMap { by_name, max_words }
    }

    pub fn region_of(&self, locality: &str) -> Option<&str> {
        self.by_name.get(locality).map(String::as_str)
    }

    /// Region of the first locality named in `tokens`.
    ///
    /// Multi-word names are matched over consecutive tokens, longest first.
    /// Each candidate is also tried with leading/trailing punctuation removed,
    /// so `"الرباط،"` resolves like `"الرباط"`.
    pub fn resolve(&self, tokens: &[String]) -> Option<&str> {
        for start in 0..tokens.len() {
            let widest = self.max_words.min(tokens.len() - start);
            for width in (1..=widest).rev() {
                let candidate = tokens[start..start + width].join(" ");
                let trimmed = candidate.trim_matches(|c: char| !c.is_alphanumeric());
                if let Some(region) = self.region_of(&candidate).or_else(|| self.region_of(trimmed)) {
                    return Some(region);
                }
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Compiled rule set plus the lookup tables a run needs.
#[derive(Debug, Clone)]
pub struct Registry {
    rules: Vec<CompiledRule>,
    fields: Vec<Field>,
    thresholds: HashMap<Field, u8>,
    localities: LocalityMap,
}

impl Registry {
    /// Compile the built-in gazette rule set for `context` and `options`.
    pub fn builtin(context: &Context, options: &Options) -> Result<Self> {
        let specs = gazette::rules::get(context, options)?;
        Self::from_specs(&specs, &options.thresholds, gazette::regions::LOCALITIES.clone())
    }

    /// Compile an arbitrary rule list.
    ///
    /// `overrides` replaces the threshold of every fuzzy rule of that field.
    pub fn from_specs(specs: &[RuleSpec], overrides: &HashMap<Field, u8>, localities: LocalityMap) -> Result<Self> {
        let rules = specs.iter().map(|spec| CompiledRule::compile(spec, overrides)).collect::<Result<Vec<_>>>()?;

        let mut fields: Vec<Field> = Vec::new();
        let mut thresholds = HashMap::new();
        for rule in &rules {
            if !fields.contains(&rule.field) {
                fields.push(rule.field);
            }
            if let Some(threshold) = rule.threshold() {
                thresholds.entry(rule.field).or_insert(threshold);
            }
        }

        Ok(Registry { rules, fields, thresholds, localities })
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Fields any rule can set, in column order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn known(&self) -> FieldSet {
        self.fields.iter().fold(FieldSet::empty(), |set, field| set | field.flag())
    }

    /// Fuzzy threshold in force for `field`.
    pub fn threshold(&self, field: Field) -> Option<u8> {
        self.thresholds.get(&field).copied()
    }

    pub fn localities(&self) -> &LocalityMap {
        &self.localities
    }
}
