//! Value type validation
//!
//! Checks a normalized value batch against the declared kind of the target
//! field. Only integer-kinded fields are actually validated; every other
//! kind passes unchecked. That gap matches the source system this was
//! modeled on and is kept deliberately — tightening it would change which
//! requests produce predicates.

use crate::metadata::ScalarKind;

/// Whether every value in the batch is acceptable for the declared kind.
///
/// A single bad value invalidates the whole batch.
pub fn values_match_kind(values: &[String], kind: ScalarKind) -> bool {
    match kind {
        ScalarKind::Integer => values.iter().all(|v| is_integer_literal(v)),
        ScalarKind::Float
        | ScalarKind::Boolean
        | ScalarKind::String
        | ScalarKind::Datetime
        | ScalarKind::Unknown => true,
    }
}

/// Plain decimal integer literal: optional sign, one or more digits.
fn is_integer_literal(value: &str) -> bool {
    let digits = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
