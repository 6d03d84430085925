//! Search filter orchestration
//!
//! Walks a [`FilterRequest`] entry by entry and mutates the target
//! [`SqlQuery`] in place. Outcomes are explicit: the first stopping entry
//! ends the whole remaining request (predicates already committed by
//! earlier entries stay; later entries never run). Invalid user input is
//! reported through the diagnostics sink, never raised.

use serde_json::Value;

use crate::compile::{apply_membership_predicate, apply_strategy_predicate};
use crate::diagnostics::{Diagnostics, Notice, NoticeReason};
use crate::error::FilterError;
use crate::metadata::{MetadataProvider, PropertyKind, ScalarKind};
use crate::normalize::normalize_values;
use crate::path::{ResolvedPath, resolve_path};
use crate::query::SqlQuery;
use crate::relation::apply_relation_filter;
use crate::request::{FilterRequest, Strategy};
use crate::validate::values_match_kind;

/// How processing one (property, strategy, value) entry ended.
#[derive(Debug)]
enum EntryOutcome {
    /// Predicate added; keep evaluating remaining sibling strategies.
    Applied,
    /// Predicate added; skip remaining strategies for this property and
    /// continue with the next property.
    PropertyDone,
    /// Stop the entire remaining request without a notice.
    Halted,
    /// Report the notice and stop the entire remaining request.
    Rejected(Notice),
}

/// Compiles filter requests into predicates on a query.
pub struct SearchFilter<'a> {
    metadata: &'a dyn MetadataProvider,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> SearchFilter<'a> {
    pub fn new(metadata: &'a dyn MetadataProvider, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            metadata,
            diagnostics,
        }
    }

    /// Apply `request` against `resource`, mutating `query` in place.
    ///
    /// Outcomes surface only through the diagnostics sink and the query's
    /// final predicate set; `Err` signals an internal fault, never bad
    /// user input.
    pub fn apply(
        &self,
        request: &FilterRequest,
        resource: &str,
        query: &mut SqlQuery,
    ) -> Result<(), FilterError> {
        for filter in &request.properties {
            for (strategy, value) in &filter.entries {
                let outcome = self.apply_entry(
                    &filter.property,
                    strategy.as_deref(),
                    value,
                    resource,
                    query,
                )?;
                match outcome {
                    EntryOutcome::Applied => {}
                    EntryOutcome::PropertyDone => break,
                    EntryOutcome::Halted => return Ok(()),
                    EntryOutcome::Rejected(notice) => {
                        self.diagnostics.notice(&notice);
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    fn apply_entry(
        &self,
        property: &str,
        strategy: Option<&str>,
        value: &Value,
        resource: &str,
        query: &mut SqlQuery,
    ) -> Result<EntryOutcome, FilterError> {
        if value.is_null() {
            return Ok(EntryOutcome::Rejected(Notice::new(
                NoticeReason::NullValue,
                property,
                strategy,
                format!("Null value for property \"{}\"", property),
            )));
        }

        // The root resource must map the first path segment at all for the
        // entry to be considered.
        let first = property.split('.').next().unwrap_or(property);
        if self.metadata.resolve(resource, first).is_none() {
            return Ok(EntryOutcome::Rejected(Notice::new(
                NoticeReason::UnmappedProperty,
                property,
                strategy,
                format!(
                    "Property \"{}\" is not mapped on resource \"{}\"",
                    property, resource
                ),
            )));
        }

        let Some(path) = resolve_path(self.metadata, query, resource, property) else {
            return Ok(EntryOutcome::Rejected(Notice::new(
                NoticeReason::UnmappedProperty,
                property,
                strategy,
                format!(
                    "Property \"{}\" does not resolve to a nested path on resource \"{}\"",
                    property, resource
                ),
            )));
        };

        let values = normalize_values(value);
        if values.is_empty() {
            return Ok(EntryOutcome::Rejected(Notice::new(
                NoticeReason::EmptyValueSet,
                property,
                strategy,
                format!(
                    "At least one string value is required for property \"{}\"",
                    property
                ),
            )));
        }

        match self.metadata.resolve(&path.resource, &path.leaf) {
            Some(PropertyKind::Field { kind }) => {
                self.apply_field_entry(property, strategy, kind, &values, &path, query)
            }
            Some(PropertyKind::Association { collection, id_kind, .. }) => {
                if !values_match_kind(&values, id_kind) {
                    return Ok(EntryOutcome::Rejected(invalid_type_notice(
                        property, strategy, &path.leaf,
                    )));
                }
                apply_relation_filter(query, &path.alias, &path.leaf, collection, &values)?;
                Ok(EntryOutcome::Applied)
            }
            // Resolved to neither a field nor an association on the final
            // type: stop, deliberately without a notice.
            None => Ok(EntryOutcome::Halted),
        }
    }

    fn apply_field_entry(
        &self,
        property: &str,
        strategy_name: Option<&str>,
        kind: ScalarKind,
        values: &[String],
        path: &ResolvedPath,
        query: &mut SqlQuery,
    ) -> Result<EntryOutcome, FilterError> {
        if !values_match_kind(values, kind) {
            return Ok(EntryOutcome::Rejected(invalid_type_notice(
                property,
                strategy_name,
                &path.leaf,
            )));
        }

        let (strategy, case_sensitive) = match strategy_name {
            None => (Strategy::Exact, true),
            Some(name) => match Strategy::parse(name) {
                Some(parsed) => parsed,
                None => {
                    return Ok(EntryOutcome::Rejected(Notice::new(
                        NoticeReason::UnknownStrategy,
                        property,
                        strategy_name,
                        format!("Strategy \"{}\" does not exist", name),
                    )));
                }
            },
        };

        if let [single] = values {
            apply_strategy_predicate(query, &path.alias, &path.leaf, strategy, case_sensitive, single);
            return Ok(EntryOutcome::PropertyDone);
        }

        if strategy != Strategy::Exact {
            return Ok(EntryOutcome::Rejected(Notice::new(
                NoticeReason::UnsupportedMultiValueStrategy,
                property,
                strategy_name,
                format!(
                    "Strategy selected for property \"{}\" does not support multiple values; only \"exact\" does",
                    property
                ),
            )));
        }

        apply_membership_predicate(
            query,
            &path.alias,
            &path.leaf,
            case_sensitive,
            values,
            property,
        )?;
        Ok(EntryOutcome::Applied)
    }
}

fn invalid_type_notice(property: &str, strategy: Option<&str>, field: &str) -> Notice {
    Notice::new(
        NoticeReason::InvalidValueType,
        property,
        strategy,
        format!(
            "Values for field \"{}\" are not valid for its declared type",
            field
        ),
    )
}
