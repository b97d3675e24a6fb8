//! Per-index merging of rule matches.
//!
//! Several rules can hit the same token (a `DH` keyword and an amount word at
//! the same index, a year that also sits in a gazette window...). The
//! aggregator folds them into one [`Record`] per index:
//!
//! - field flags and the `is_regex`/`is_keyword` classification are unioned
//!   and never cleared;
//! - `word`, `context` and the writing rule follow the [`TieBreak`] policy:
//!   with `LastWins` the rule evaluated last overwrites them, with `FirstWins`
//!   the first rule to hit the index keeps them.
//!
//! Records live in a `BTreeMap` keyed by index, so they come out sorted.

use super::registry::{CompiledRule, RuleId};
use crate::api::TieBreak;
use crate::{FieldSet, Match, Record};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Debug)]
pub(crate) struct Aggregator {
    records: BTreeMap<usize, Record>,
    tie_break: TieBreak,
}

impl Aggregator {
    pub fn new(tie_break: TieBreak) -> Self {
        Aggregator { records: BTreeMap::new(), tie_break }
    }

    /// Fold the matches of one rule run into the record set.
    pub fn absorb(&mut self, id: RuleId, rule: &CompiledRule, matches: Vec<Match>) {
        for m in matches {
            match self.records.entry(m.index) {
                Entry::Vacant(slot) => {
                    slot.insert(Record {
                        index: m.index,
                        word: m.word,
                        context: m.context,
                        fields: m.field.flag(),
                        kind: rule.kind,
                        rule: id,
                    });
                }
                Entry::Occupied(mut slot) => {
                    let record = slot.get_mut();
                    record.fields |= m.field.flag();
                    record.kind |= rule.kind;
                    if self.tie_break == TieBreak::LastWins {
                        record.word = m.word;
                        record.context = m.context;
                        record.rule = id;
                    }
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records sorted by index, with flags restricted to `known` fields.
    ///
    /// Fields outside a record's set read as 0, so no explicit back-fill is
    /// needed beyond the mask.
    pub fn finish(self, known: FieldSet) -> Vec<Record> {
        self.records
            .into_values()
            .map(|mut record| {
                record.fields &= known;
                record
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{LocalityMap, Registry};
    use crate::{Field, Predicate, RuleKind, RuleSpec, Source, Window};
    use std::collections::HashMap;

    fn registry() -> Registry {
        let specs = vec![
            RuleSpec {
                name: "year".into(),
                field: Field::Year,
                predicate: Predicate::Regex(r"\d{4}".into()),
                threshold: None,
                window: Window::new(2, 0),
                source: Source::Cleaned,
                extraction: None,
            },
            RuleSpec {
                name: "amount".into(),
                field: Field::Amount,
                predicate: Predicate::Keyword("DH".into()),
                threshold: None,
                window: Window::new(3, 3),
                source: Source::Raw,
                extraction: None,
            },
        ];
        Registry::from_specs(&specs, &HashMap::new(), LocalityMap::default()).unwrap()
    }

    fn hit(index: usize, word: &str, context: &[&str], field: Field) -> Match {
        Match { index, word: word.into(), context: context.iter().map(|s| s.to_string()).collect(), field }
    }

    #[test]
    fn flags_union_and_last_writer_keeps_context() {
        let registry = registry();
        let mut agg = Aggregator::new(TieBreak::LastWins);
        agg.absorb(0, &registry.rules()[0], vec![hit(4, "2019", &["a", "b", "2019"], Field::Year)]);
        agg.absorb(1, &registry.rules()[1], vec![hit(4, "2019DH", &["x", "2019DH", "y"], Field::Amount)]);
        assert_eq!(agg.len(), 1);

        let records = agg.finish(registry.known());
        let record = &records[0];
        assert_eq!(record.fields, FieldSet::YEAR | FieldSet::AMOUNT);
        assert_eq!(record.kind, RuleKind::REGEX | RuleKind::KEYWORD);
        assert_eq!(record.word, "2019DH");
        assert_eq!(record.context, vec!["x", "2019DH", "y"]);
        assert_eq!(record.rule, 1);
    }

    #[test]
    fn first_writer_keeps_context_under_first_wins() {
        let registry = registry();
        let mut agg = Aggregator::new(TieBreak::FirstWins);
        agg.absorb(0, &registry.rules()[0], vec![hit(4, "2019", &["2019"], Field::Year)]);
        agg.absorb(1, &registry.rules()[1], vec![hit(4, "DH", &["DH"], Field::Amount)]);

        let records = agg.finish(registry.known());
        assert_eq!(records[0].word, "2019");
        assert_eq!(records[0].rule, 0);
        assert_eq!(records[0].fields, FieldSet::YEAR | FieldSet::AMOUNT);
    }

    #[test]
    fn records_come_out_sorted_by_index() {
        let registry = registry();
        let mut agg = Aggregator::new(TieBreak::LastWins);
        agg.absorb(1, &registry.rules()[1], vec![hit(9, "DH", &["DH"], Field::Amount)]);
        agg.absorb(0, &registry.rules()[0], vec![hit(2, "1999", &["1999"], Field::Year)]);
        agg.absorb(1, &registry.rules()[1], vec![hit(5, "DH", &["DH"], Field::Amount)]);

        let order: Vec<usize> = agg.finish(registry.known()).iter().map(|r| r.index).collect();
        assert_eq!(order, vec![2, 5, 9]);
    }

    #[test]
    fn finish_masks_unknown_fields() {
        let registry = registry();
        let mut agg = Aggregator::new(TieBreak::LastWins);
        agg.absorb(0, &registry.rules()[0], vec![hit(0, "x", &["x"], Field::Judgment)]);
        assert_eq!(agg.finish(registry.known())[0].fields, FieldSet::empty());
    }
}
