//! Association filtering
//!
//! When the resolved property is a relation rather than a scalar field,
//! filtering is exact-by-identifier: to-many associations are joined and
//! filtered on the joined alias's `id`, to-one associations are filtered
//! directly on the owning alias. No strategy concept applies here.

use crate::error::FilterError;
use crate::query::{ParamValue, SqlQuery};

/// Identifier column used when filtering a joined collection association.
const ID_FIELD: &str = "id";

/// Add an identifier equality/membership predicate for an association.
///
/// `alias` is where the association lives (i.e. the alias of the entity
/// owning it). Values must already be normalized and validated against the
/// association's identifier kind.
pub fn apply_relation_filter(
    query: &mut SqlQuery,
    alias: &str,
    association: &str,
    collection: bool,
    values: &[String],
) -> Result<(), FilterError> {
    if values.is_empty() {
        return Err(FilterError::EmptyValueBatch {
            property: association.to_string(),
        });
    }

    let (target_alias, target_field) = if collection {
        (query.join_once(alias, association), ID_FIELD.to_string())
    } else {
        (alias.to_string(), association.to_string())
    };

    let param = query.fresh_param(association);
    if let [single] = values {
        query.push_predicate(format!("{}.{} = :{}", target_alias, target_field, param));
        query.bind(param, ParamValue::One(single.clone()));
    } else {
        query.push_predicate(format!("{}.{} IN (:{})", target_alias, target_field, param));
        query.bind(param, ParamValue::Many(values.to_vec()));
    }
    Ok(())
}
