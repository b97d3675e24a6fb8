//! Built-in rule set for Moroccan official-gazette text.

pub(crate) mod patterns;
pub(crate) mod regions;
pub(crate) mod rules;
