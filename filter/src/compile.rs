//! Predicate synthesis for scalar fields
//!
//! Each call emits exactly one predicate fragment and binds one fresh
//! named parameter. Case-insensitive matching wraps both sides of every
//! comparison in `LOWER(...)`; wildcard composition happens in SQL via
//! `CONCAT`, so bound values stay raw.

use crate::error::FilterError;
use crate::query::{ParamValue, SqlQuery};
use crate::request::Strategy;

/// Wrap an expression for the requested case sensitivity.
pub fn wrap_case(expr: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        expr.to_string()
    } else {
        format!("LOWER({})", expr)
    }
}

/// Add the single-value predicate for `strategy` on `alias.field`.
pub fn apply_strategy_predicate(
    query: &mut SqlQuery,
    alias: &str,
    field: &str,
    strategy: Strategy,
    case_sensitive: bool,
    value: &str,
) {
    let param = query.fresh_param(field);
    let lhs = wrap_case(&format!("{}.{}", alias, field), case_sensitive);

    let predicate = match strategy {
        Strategy::Exact => {
            let rhs = wrap_case(&format!(":{}", param), case_sensitive);
            format!("{} = {}", lhs, rhs)
        }
        Strategy::Partial => {
            let rhs = wrap_case(&format!("CONCAT('%', :{}, '%')", param), case_sensitive);
            format!("{} LIKE {}", lhs, rhs)
        }
        Strategy::Start => {
            let rhs = wrap_case(&format!("CONCAT(:{}, '%')", param), case_sensitive);
            format!("{} LIKE {}", lhs, rhs)
        }
        Strategy::End => {
            let rhs = wrap_case(&format!("CONCAT('%', :{})", param), case_sensitive);
            format!("{} LIKE {}", lhs, rhs)
        }
        Strategy::WordStart => {
            let head = wrap_case(&format!("CONCAT(:{}, '%')", param), case_sensitive);
            let word = wrap_case(&format!("CONCAT('% ', :{}, '%')", param), case_sensitive);
            // Parenthesized so the OR survives AND composition.
            format!("({0} LIKE {1} OR {0} LIKE {2})", lhs, head, word)
        }
    };

    query.push_predicate(predicate);
    query.bind(param, ParamValue::One(value.to_string()));
}

/// Add a set-membership predicate binding the whole value list.
///
/// Values are pre-lowered for case-insensitive matching, mirroring the
/// `LOWER` wrap on the field expression.
pub fn apply_membership_predicate(
    query: &mut SqlQuery,
    alias: &str,
    field: &str,
    case_sensitive: bool,
    values: &[String],
    property: &str,
) -> Result<(), FilterError> {
    if values.is_empty() {
        return Err(FilterError::EmptyValueBatch {
            property: property.to_string(),
        });
    }

    let param = query.fresh_param(field);
    let lhs = wrap_case(&format!("{}.{}", alias, field), case_sensitive);
    query.push_predicate(format!("{} IN (:{})", lhs, param));

    let bound = if case_sensitive {
        values.to_vec()
    } else {
        values.iter().map(|v| v.to_lowercase()).collect()
    };
    query.bind(param, ParamValue::Many(bound));
    Ok(())
}
