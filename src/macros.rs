#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! predicate {
    (regex: $pat:expr) => {
        $crate::Predicate::Regex(::std::string::String::from($pat))
    };
    (fuzzy: $pat:expr) => {
        $crate::Predicate::Fuzzy(::std::string::String::from($pat))
    };
    (keyword: $pat:expr) => {
        $crate::Predicate::Keyword(::std::string::String::from($pat))
    };
}

#[macro_export]
macro_rules! rule {
    (@source) => {
        $crate::Source::Raw
    };
    (@source $source:expr) => {
        $source
    };
    (
        name: $name:expr,
        field: $field:expr,
        $mode:ident: $pat:expr
        $(, threshold: $threshold:expr)?
        , window: ($before:expr, $after:expr)
        $(, source: $source:expr)?
        $(, extract: $extract:expr)?
        $(,)?
    ) => {{
        $crate::RuleSpec {
            name: ::std::string::String::from($name),
            field: $field,
            predicate: $crate::predicate!($mode: $pat),
            threshold: None $(.or(Some($threshold)))?,
            window: $crate::Window::new($before, $after),
            source: $crate::rule!(@source $($source)?),
            extraction: None $(.or(Some(::std::string::String::from($extract))))?,
        }
    }};
}
