//! Tokenization.
//!
//! The engine works on two parallel token sequences:
//!
//! - **raw**: the input split on runs of Unicode whitespace;
//! - **cleaned**: each raw token with every char that is neither a word char
//!   nor whitespace removed. Combining marks (`\p{Mn}`, the Arabic harakat
//!   and tanween) count as punctuation here, so `2019ً` cleans to `2019`.
//!
//! ## Invariants
//!
//! - `raw.len() == cleaned.len()` and `cleaned[i]` is derived from `raw[i]`
//!   alone. A token made only of punctuation stays as `""` at its index, so
//!   an index found in one sequence is valid in the other.
//! - Tokens are never mutated after construction.

use crate::Source;

/// Split `text` on runs of whitespace.
///
/// Empty or whitespace-only input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// Strip punctuation from every token, keeping count and order.
pub fn strip_punctuation(raw: &[String]) -> Vec<String> {
    let punctuation = regex!(r"[^\w\s]|\p{Mn}");
    raw.iter().map(|token| punctuation.replace_all(token, "").into_owned()).collect()
}

/// A tokenized document: raw and cleaned tokens, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    raw: Vec<String>,
    cleaned: Vec<String>,
}

impl Document {
    /// Tokenize `text` and derive the cleaned sequence.
    pub fn new(text: &str) -> Self {
        Self::from_tokens(tokenize(text))
    }

    /// Build a document from tokens that were split elsewhere.
    pub fn from_tokens(raw: Vec<String>) -> Self {
        let cleaned = strip_punctuation(&raw);
        Document { raw, cleaned }
    }

    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    pub fn cleaned(&self) -> &[String] {
        &self.cleaned
    }

    /// The sequence a rule with the given `source` scans.
    pub fn tokens(&self, source: Source) -> &[String] {
        match source {
            Source::Raw => &self.raw,
            Source::Cleaned => &self.cleaned,
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn tokenize_splits_on_whitespace_runs() {
        assert_eq!(tokenize("  قرار  رقم\t2.22.645\nبتاريخ "), vec!["قرار", "رقم", "2.22.645", "بتاريخ"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn strip_punctuation_keeps_empty_tokens_in_place() {
        let raw = tokenize("(2019) ، الجريدة، 2.22.645 DH.");
        assert_eq!(strip_punctuation(&raw), vec!["2019", "", "الجريدة", "222645", "DH"]);
    }

    #[test]
    fn strip_punctuation_drops_combining_marks() {
        let raw = tokenize("2019ً قرارٌ، الرَّسمية");
        assert_eq!(strip_punctuation(&raw), vec!["2019", "قرار", "الرسمية"]);
    }

    #[test]
    fn document_hands_out_the_requested_sequence() {
        let doc = Document::new("سنة 2019.");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.tokens(Source::Raw)[1], "2019.");
        assert_eq!(doc.tokens(Source::Cleaned)[1], "2019");
        assert!(Document::new("   ").is_empty());
    }

    proptest! {
        #[test]
        fn cleaning_preserves_alignment(text in "\\PC{0,80}") {
            let doc = Document::new(&text);
            prop_assert_eq!(doc.raw().len(), doc.cleaned().len());
            for (raw, cleaned) in doc.raw().iter().zip(doc.cleaned()) {
                prop_assert!(cleaned.chars().count() <= raw.chars().count());
            }
        }
    }
}
