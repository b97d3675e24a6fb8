use crate::api::LoiVariant;

/// First year the year rule accepts.
pub const FIRST_YEAR: i32 = 1980;

/// Largest current year a year rule can be built for.
pub const LAST_YEAR: i32 = 9999;

/// LOI reference with any two-digit middle segment, e.g. `2.22.645`.
pub const LOI_STRICT: &str = r"^2\.\d{2}\.\d{3}$";

/// LOI reference with the middle segment bounded to `00..=39`.
pub const LOI_BOUNDED: &str = r"^2\.(0[0-9]|1[0-9]|2[0-9]|3[0-9])\.\d{3}$";

/// First standalone integer of a context string.
pub const FIRST_INTEGER: &str = r"\b\d+\b";

// Target words.
pub const GAZETTE: &str = "الجريدة";
pub const OFFICIAL: &str = "الرسمية";
pub const ISSUE_NUMBER: &str = "عدد";
pub const DIRHAM: &str = "درهم";
pub const DIRHAM_LATIN: &str = "DH";
pub const METRE: &str = "متر";
pub const DECREE: &str = "قرار";
pub const DECISION: &str = "مقرر";
pub const JUDGMENT: &str = "حكم";

pub fn loi_pattern(variant: LoiVariant) -> &'static str {
    match variant {
        LoiVariant::Strict => LOI_STRICT,
        LoiVariant::Bounded => LOI_BOUNDED,
    }
}

/// Pattern matching every year from [`FIRST_YEAR`] through `current_year`.
///
/// One alternative per decade, the last one capped at the current year:
///
/// ```text
/// 2024 -> ^(?:198[0-9]|199[0-9]|200[0-9]|201[0-9]|202[0-4])$
/// ```
///
/// Returns `None` when `current_year` is outside
/// [`FIRST_YEAR`]`..=`[`LAST_YEAR`]: no year can match, or the pattern would
/// not be a four-digit year.
pub fn year_pattern(current_year: i32) -> Option<String> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&current_year) {
        return None;
    }

    let last_decade = current_year / 10;
    let mut decades: Vec<String> = (FIRST_YEAR / 10..last_decade).map(|d| format!("{d}[0-9]")).collect();
    decades.push(format!("{last_decade}[0-{}]", current_year % 10));

    Some(format!("^(?:{})$", decades.join("|")))
}
