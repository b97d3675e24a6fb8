use crate::api::{Context, Options};
use crate::rules::gazette::patterns::{self, FIRST_INTEGER, FIRST_YEAR, LAST_YEAR};
use crate::{Error, Field, Result, RuleSpec, Source};

/// Fuzzy threshold of the gazette title words. Lower it per field through
/// `Options::thresholds` to accept spelling variants such as `الجريده`.
pub const TITLE_THRESHOLD: u8 = 99;

fn rule_loi(options: &Options) -> RuleSpec {
    rule! {
        name: "LOI pattern (e.g., 2.22.645)",
        field: Field::Loi,
        regex: patterns::loi_pattern(options.loi),
        window: (0, 0),
    }
}

fn rule_year(context: &Context) -> Result<RuleSpec> {
    let year = context.current_year;
    let pattern = patterns::year_pattern(year).ok_or(Error::YearOutOfRange { year, first: FIRST_YEAR, last: LAST_YEAR })?;

    Ok(rule! {
        name: format!("Valid years between {FIRST_YEAR} and {year}"),
        field: Field::Year,
        regex: pattern,
        window: (2, 0),
        source: Source::Cleaned,
    })
}

fn rule_gazette() -> RuleSpec {
    rule! {
        name: format!("Arabic word: {}", patterns::GAZETTE),
        field: Field::Gazette,
        fuzzy: patterns::GAZETTE,
        threshold: TITLE_THRESHOLD,
        window: (3, 12),
    }
}

fn rule_issue_number() -> RuleSpec {
    rule! {
        name: format!("Arabic word: {}", patterns::ISSUE_NUMBER),
        field: Field::IssueNumber,
        keyword: patterns::ISSUE_NUMBER,
        window: (3, 3),
        extract: FIRST_INTEGER,
    }
}

fn rule_official() -> RuleSpec {
    rule! {
        name: format!("Arabic word: {}", patterns::OFFICIAL),
        field: Field::Official,
        fuzzy: patterns::OFFICIAL,
        threshold: TITLE_THRESHOLD,
        window: (3, 12),
    }
}

fn rule_dirham() -> RuleSpec {
    rule! {
        name: format!("Arabic word: {}", patterns::DIRHAM),
        field: Field::Amount,
        keyword: patterns::DIRHAM,
        window: (3, 3),
        extract: FIRST_INTEGER,
    }
}

fn rule_metre() -> RuleSpec {
    rule! {
        name: format!("Arabic word: {}", patterns::METRE),
        field: Field::Area,
        keyword: patterns::METRE,
        window: (3, 3),
        extract: FIRST_INTEGER,
    }
}

fn rule_decree() -> RuleSpec {
    rule! {
        name: format!("Arabic word: {}", patterns::DECREE),
        field: Field::Decree,
        keyword: patterns::DECREE,
        window: (3, 3),
    }
}

fn rule_decision() -> RuleSpec {
    rule! {
        name: format!("Arabic word: {}", patterns::DECISION),
        field: Field::Decision,
        keyword: patterns::DECISION,
        window: (3, 3),
    }
}

fn rule_judgment() -> RuleSpec {
    rule! {
        name: format!("Arabic word: {}", patterns::JUDGMENT),
        field: Field::Judgment,
        keyword: patterns::JUDGMENT,
        window: (3, 3),
    }
}

fn rule_dirham_latin() -> RuleSpec {
    rule! {
        name: format!("Keyword: {}", patterns::DIRHAM_LATIN),
        field: Field::Amount,
        keyword: patterns::DIRHAM_LATIN,
        window: (3, 3),
        extract: FIRST_INTEGER,
    }
}

/// Built-in gazette rules in evaluation order.
///
/// Fails only when `context.current_year` leaves the year rule with nothing
/// to match.
pub fn get(context: &Context, options: &Options) -> Result<Vec<RuleSpec>> {
    let mut rules = vec![rule_loi(options), rule_year(context)?, rule_gazette()];
    if options.issue_number {
        rules.push(rule_issue_number());
    }
    rules.extend([
        rule_official(),
        rule_dirham(),
        rule_metre(),
        rule_decree(),
        rule_decision(),
        rule_judgment(),
        rule_dirham_latin(),
    ]);
    Ok(rules)
}
