//! Rule-based field extraction for Moroccan official-gazette text.
//!
//! A document is split into whitespace tokens, a battery of declarative rules
//! (exact regex, keyword, fuzzy similarity) is run over them in registry
//! order, and every token index hit by at least one rule becomes one row of a
//! [`Report`], carrying a context window and one 0/1 flag per known field.
//!
//! ```
//! use jarida::{Context, Field, Options, extract_with};
//!
//! let ctx = Context { current_year: 2024 };
//! let out = extract_with("بمبلغ 500 درهم سنة 2019", &ctx, &Options::default()).unwrap();
//! let amount = out.report.row_at(2).unwrap();
//! assert_eq!(amount.flag(Field::Amount), Some(true));
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod fuzz;
mod io;
mod rules;

pub use api::{
    Context, ExtractDetails, ExtractResult, ExtractResultVerbose, LoiVariant, Options, RegionScope, RuleTrace,
    TieBreak, extract, extract_verbose_with, extract_with,
};
pub use engine::{
    CompiledRule, DEFAULT_THRESHOLD, Document, Extractor, LocalityMap, NO_REGION, Registry, Report, Row, RuleMetrics,
    RunMetrics, RunResult, strip_punctuation, tokenize,
};
pub use error::{Error, Result};
pub use fuzz::{partial_ratio, ratio};
pub use io::{read_document, write_csv};
pub use rules::gazette::patterns::{FIRST_YEAR, LOI_BOUNDED, LOI_STRICT, year_pattern};

// --- Fields -----------------------------------------------------------------

/// Closed set of fields a rule can flag.
///
/// Display names (the report column headers) live in [`FIELD_NAMES`], not on
/// the variants, so the Arabic headers never act as structural keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Loi,
    Year,
    Gazette,
    IssueNumber,
    Official,
    Amount,
    Area,
    Decree,
    Decision,
    Judgment,
}

/// `(field, short key, column header)`, indexed by `Field as usize`.
const FIELD_NAMES: [(Field, &str, &str); 10] = [
    (Field::Loi, "loi", "is_loi"),
    (Field::Year, "year", "is_year"),
    (Field::Gazette, "gazette", "is_جريدة"),
    (Field::IssueNumber, "issue_number", "is_عدد"),
    (Field::Official, "official", "is_الرسمية"),
    (Field::Amount, "amount", "is_amount"),
    (Field::Area, "area", "is_area"),
    (Field::Decree, "decree", "is_قرار"),
    (Field::Decision, "decision", "is_مقرر"),
    (Field::Judgment, "judgment", "is_حكم"),
];

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Loi,
        Field::Year,
        Field::Gazette,
        Field::IssueNumber,
        Field::Official,
        Field::Amount,
        Field::Area,
        Field::Decree,
        Field::Decision,
        Field::Judgment,
    ];

    /// Column header used in reports, e.g. `"is_amount"` or `"is_قرار"`.
    pub fn name(self) -> &'static str {
        FIELD_NAMES[self as usize].2
    }

    /// ASCII key accepted on the command line, e.g. `"decree"`.
    pub fn key(self) -> &'static str {
        FIELD_NAMES[self as usize].1
    }

    /// Look a field up by its short key or its column header.
    pub fn parse(s: &str) -> Option<Field> {
        FIELD_NAMES.iter().find(|(_, key, name)| *key == s || *name == s).map(|(field, _, _)| *field)
    }

    pub fn flag(self) -> FieldSet {
        match self {
            Field::Loi => FieldSet::LOI,
            Field::Year => FieldSet::YEAR,
            Field::Gazette => FieldSet::GAZETTE,
            Field::IssueNumber => FieldSet::ISSUE_NUMBER,
            Field::Official => FieldSet::OFFICIAL,
            Field::Amount => FieldSet::AMOUNT,
            Field::Area => FieldSet::AREA,
            Field::Decree => FieldSet::DECREE,
            Field::Decision => FieldSet::DECISION,
            Field::Judgment => FieldSet::JUDGMENT,
        }
    }
}

bitflags::bitflags! {
    /// Per-record field flags. A set bit is a `1` in the report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldSet: u16 {
        const LOI          = 1 << 0;
        const YEAR         = 1 << 1;
        const GAZETTE      = 1 << 2;
        const ISSUE_NUMBER = 1 << 3;
        const OFFICIAL     = 1 << 4;
        const AMOUNT       = 1 << 5;
        const AREA         = 1 << 6;
        const DECREE       = 1 << 7;
        const DECISION     = 1 << 8;
        const JUDGMENT     = 1 << 9;
    }
}

bitflags::bitflags! {
    /// Static classification of a rule, unioned into every record it touches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RuleKind: u8 {
        const REGEX   = 1 << 0;
        const KEYWORD = 1 << 1;
    }
}

// --- Rule definitions -------------------------------------------------------

/// Which token sequence a rule scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// Tokens as split from the input, punctuation intact.
    #[default]
    Raw,
    /// Tokens with every non-word, non-space char removed.
    Cleaned,
}

/// Number of tokens kept before and after a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub before: usize,
    pub after: usize,
}

impl Window {
    pub const fn new(before: usize, after: usize) -> Self {
        Window { before, after }
    }

    /// Longest context this window can produce.
    pub const fn max_len(&self) -> usize {
        self.before + self.after + 1
    }

    /// Slice the window around `index`, truncated at both sequence ends.
    ///
    /// ```text
    /// tokens: a b c d e      window 2/1 at index 1 -> [a b c]
    ///         0 1 2 3 4      window 2/1 at index 4 -> [c d e]
    /// ```
    ///
    /// `index` must be a valid position in `tokens`.
    pub fn slice<'t>(&self, tokens: &'t [String], index: usize) -> &'t [String] {
        let start = index.saturating_sub(self.before);
        let end = index.saturating_add(self.after).saturating_add(1).min(tokens.len());
        &tokens[start..end]
    }
}

/// How a rule decides whether a token matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Full-token regex match (the pattern is anchored at both ends).
    Regex(String),
    /// Partial-similarity score against a target word, compared to the rule
    /// threshold.
    Fuzzy(String),
    /// The token starts with the word and the word ends on a word boundary
    /// (a trailing combining mark such as tanween still counts as a boundary).
    Keyword(String),
}

/// A declarative rule: plain data, evaluated by one generic matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    /// Unique, human-readable description used in traces.
    pub name: String,
    pub field: Field,
    pub predicate: Predicate,
    /// Fuzzy threshold (0..=100). `None` falls back to the registry default.
    pub threshold: Option<u8>,
    pub window: Window,
    pub source: Source,
    /// Regex searched in the joined context to fill `final_extraction`.
    pub extraction: Option<String>,
}

impl RuleSpec {
    pub fn kind(&self) -> RuleKind {
        match self.predicate {
            Predicate::Regex(_) => RuleKind::REGEX,
            Predicate::Fuzzy(_) | Predicate::Keyword(_) => RuleKind::KEYWORD,
        }
    }
}

// --- Internal types ---------------------------------------------------------

/// One rule hit at one token index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Match {
    pub index: usize,
    pub word: String,
    pub context: Vec<String>,
    pub field: Field,
}

/// Per-index aggregate of every match at that index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    pub index: usize,
    pub word: String,
    pub context: Vec<String>,
    pub fields: FieldSet,
    pub kind: RuleKind,
    /// Rule that wrote `word`/`context` (index into `Registry::rules`).
    pub rule: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn field_names_are_indexed_by_discriminant() {
        for field in Field::ALL {
            assert_eq!(FIELD_NAMES[field as usize].0, field);
            assert_eq!(Field::parse(field.key()), Some(field));
            assert_eq!(Field::parse(field.name()), Some(field));
        }
        assert_eq!(Field::parse("is_nothing"), None);
    }

    #[test]
    fn field_flags_are_distinct() {
        let mut all = FieldSet::empty();
        for field in Field::ALL {
            assert!(!all.intersects(field.flag()));
            all |= field.flag();
        }
        assert_eq!(all, FieldSet::all());
    }

    #[test]
    fn window_truncates_at_both_ends() {
        let tokens = toks("a b c d e");
        assert_eq!(Window::new(2, 1).slice(&tokens, 1), &toks("a b c")[..]);
        assert_eq!(Window::new(2, 1).slice(&tokens, 4), &toks("c d e")[..]);
        assert_eq!(Window::new(0, 0).slice(&tokens, 3), &toks("d")[..]);
        assert_eq!(Window::new(3, 12).slice(&tokens, 2), &tokens[..]);
    }

    #[test]
    fn rule_kind_follows_predicate() {
        let mut spec = RuleSpec {
            name: "t".into(),
            field: Field::Loi,
            predicate: Predicate::Regex("x".into()),
            threshold: None,
            window: Window::default(),
            source: Source::Raw,
            extraction: None,
        };
        assert_eq!(spec.kind(), RuleKind::REGEX);
        spec.predicate = Predicate::Fuzzy("x".into());
        assert_eq!(spec.kind(), RuleKind::KEYWORD);
        spec.predicate = Predicate::Keyword("x".into());
        assert_eq!(spec.kind(), RuleKind::KEYWORD);
    }
}
