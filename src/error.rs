//! Error types for jarida.

use thiserror::Error;

/// Errors raised while building a rule registry or moving data in and out.
///
/// Matching itself never fails: once a registry is built every rule is a pure
/// predicate over in-memory tokens.
#[derive(Error, Debug)]
pub enum Error {
    /// A rule's regex (or keyword, once escaped) failed to compile.
    #[error("rule `{rule}` has a malformed pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// A fuzzy threshold outside `0..=100`.
    #[error("rule `{rule}` uses threshold {threshold} for {field}, expected 0..=100")]
    InvalidThreshold { rule: String, field: &'static str, threshold: u8 },

    /// The current year is outside the range a year rule can be built for.
    #[error("current year {year} is outside {first}..={last}")]
    YearOutOfRange { year: i32, first: i32, last: i32 },

    /// I/O error (unreadable input document, unwritable sink).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Table writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for jarida.
pub type Result<T> = std::result::Result<T, Error>;
