//! The rule evaluator.
//!
//! One function, [`run`], evaluates any compiled rule against a token
//! sequence. Rules differ only in data (predicate, window, source), never in
//! code path.
//!
//! ```text
//! tokens: [t0 t1 t2 t3 t4 t5 ...]
//!            │  predicate(t_i) per index, no lookahead
//!            v
//!         hit at i ──> Match { index: i, word: t_i, context: window.slice(tokens, i) }
//! ```
//!
//! Predicates:
//!
//! - **regex**: the whole token matches (`^(?:pattern)$`), never a substring;
//! - **keyword**: the token starts with the keyword and the keyword ends on a
//!   word boundary, so `"درهم،"` and `"درهمٌ"` hit and `"دراهم"`/`"بدرهم"`
//!   don't. Combining marks (`\p{Mn}`) never continue a word;
//! - **fuzzy**: `partial_ratio(token, target) >= threshold`. Scores are cached
//!   per distinct token text for the duration of one rule run.

use super::registry::{CompiledRule, Test};
use crate::Match;
use crate::fuzz::partial_ratio;
use std::collections::HashMap;
use tracing::{debug, info};

/// Every index of `tokens` that satisfies `rule`, in ascending order.
pub(crate) fn run(rule: &CompiledRule, tokens: &[String]) -> Vec<Match> {
    debug!(rule = %rule.name, field = rule.field.name(), tokens = tokens.len(), "matching fields");

    let mut scores: HashMap<&str, f64> = HashMap::new();
    let mut matches = Vec::new();

    for (index, word) in tokens.iter().enumerate() {
        let hit = match &rule.test {
            Test::Regex(re) | Test::Keyword(re) => re.is_match(word),
            Test::Fuzzy { target, threshold } => {
                let score = *scores.entry(word.as_str()).or_insert_with(|| partial_ratio(word, target));
                score >= f64::from(*threshold)
            }
        };
        if !hit {
            continue;
        }

        let context = rule.window.slice(tokens, index).to_vec();
        info!(rule = %rule.name, index, word = %word, context = %context.join(" "), "matched element");
        matches.push(Match { index, word: word.clone(), context, field: rule.field });
    }

    debug!(rule = %rule.name, matches = matches.len(), "rule done");
    matches
}
