//! Fuzzy string similarity.
//!
//! Scores are normalized to `0.0..=100.0` and built on the Indel distance
//! (insertions and deletions only), so `ratio` is `200 * lcs / (len_a + len_b)`.
//!
//! - `ratio`: whole-string similarity
//! - `partial_ratio`: best similarity of the shorter string against any
//!   alignment inside the longer one
//!
//! Both work on `char`s, not bytes, so Arabic text scores per letter.

/// Length of the longest common subsequence of two char slices.
///
/// Two-row dynamic programming, `O(m * n)` time.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb { prev[j] + 1 } else { prev[j + 1].max(cur[j]) };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

fn indel_similarity(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Whole-string similarity.
///
/// # Examples
/// ```
/// use jarida::ratio;
/// assert_eq!(ratio("حكم", "حكم"), 100.0);
/// assert_eq!(ratio("abcd", "abef"), 50.0);
/// ```
#[must_use]
pub fn ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    indel_similarity(&a, &b)
}

/// Best partial match between two strings.
///
/// The shorter string is the needle. It is scored against every window of the
/// same length inside the longer string, and against the shorter prefixes and
/// suffixes that hang off either end, and the best score wins. A needle that
/// occurs verbatim inside the other string scores 100.
///
/// ```text
/// needle: الجريدة        haystack: بالجريدة
///                        windows:  بالجريد | الجريدة  -> 100
/// ```
///
/// # Examples
/// ```
/// use jarida::partial_ratio;
/// assert_eq!(partial_ratio("بالجريدة", "الجريدة"), 100.0);
/// assert_eq!(partial_ratio("xyz", "الجريدة"), 0.0);
/// ```
#[must_use]
pub fn partial_ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.len() == b.len() {
        return best_alignment(&a, &b).max(best_alignment(&b, &a));
    }
    if a.len() < b.len() { best_alignment(&a, &b) } else { best_alignment(&b, &a) }
}

/// Best score of `needle` against `haystack`, with `needle.len() <= haystack.len()`.
fn best_alignment(needle: &[char], haystack: &[char]) -> f64 {
    let m = needle.len();
    let n = haystack.len();

    let mut best = 0.0f64;

    for start in 0..=(n - m) {
        best = best.max(indel_similarity(needle, &haystack[start..start + m]));
        if best == 100.0 {
            return best;
        }
    }

    // Alignments where the needle sticks out past either end.
    for len in 1..m {
        best = best.max(indel_similarity(needle, &haystack[..len]));
        best = best.max(indel_similarity(needle, &haystack[n - len..]));
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lcs_of_known_pairs() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(lcs_len(&chars("abcde"), &chars("ace")), 3);
        assert_eq!(lcs_len(&chars(""), &chars("ace")), 0);
        assert_eq!(lcs_len(&chars("الرسمية"), &chars("الجريدة")), 5);
    }

    #[test]
    fn ratio_scores_whole_strings() {
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("abc", ""), 0.0);
        assert_eq!(ratio("abcd", "abcd"), 100.0);
        assert_eq!(ratio("abcd", "abef"), 50.0);
    }

    #[test]
    fn partial_ratio_finds_embedded_target() {
        assert_eq!(partial_ratio("test", "this is a test!"), 100.0);
        assert_eq!(partial_ratio("الجريدة", "الجريدة"), 100.0);
        assert_eq!(partial_ratio("الجريدة،", "الجريدة"), 100.0);
        assert_eq!(partial_ratio("جريدة", "الجريدة"), 100.0);
    }

    #[test]
    fn partial_ratio_tolerates_trailing_letter_noise() {
        // ه in place of ة: the best alignment drops the last letter.
        let score = partial_ratio("الجريده", "الجريدة");
        assert!((score - 1200.0 / 13.0).abs() < 1e-9, "score {score}");
        assert!(ratio("الجريده", "الجريدة") < score);
    }

    #[test]
    fn partial_ratio_of_empty_inputs() {
        assert_eq!(partial_ratio("", ""), 100.0);
        assert_eq!(partial_ratio("", "الجريدة"), 0.0);
        assert_eq!(partial_ratio("الجريدة", ""), 0.0);
    }

    #[test]
    fn partial_ratio_uses_overhanging_alignments() {
        // "cd" only overlaps the needle "abcd" past the haystack start.
        assert!(partial_ratio("abcd", "cdxyzw") > ratio("abcd", "cdxy"));
    }

    proptest! {
        #[test]
        fn partial_ratio_is_bounded_and_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            let ab = partial_ratio(&a, &b);
            prop_assert!((0.0..=100.0).contains(&ab));
            prop_assert_eq!(ab, partial_ratio(&b, &a));
        }

        #[test]
        fn identical_strings_always_score_100(a in "\\PC{1,12}") {
            prop_assert_eq!(partial_ratio(&a, &a), 100.0);
        }

        #[test]
        fn disjoint_alphabets_score_0(a in "[a-z]{1,10}", b in "[0-9]{1,10}") {
            prop_assert_eq!(partial_ratio(&a, &b), 0.0);
        }
    }
}
