//! Dotted property path resolution
//!
//! Walks a dot-separated property name segment by segment, requesting a
//! join for every traversed association and advancing the current resource
//! type. Resolution failure is a signal to stop processing the entry, not
//! an error — the caller decides how to report it.

use crate::metadata::{MetadataProvider, PropertyKind};
use crate::query::SqlQuery;

/// Resolved form of a request property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Alias the final segment lives on.
    pub alias: String,
    /// Final field or association name.
    pub leaf: String,
    /// Resource type the final segment is resolved against.
    pub resource: String,
    /// Association names traversed to get there, in order.
    pub associations: Vec<String>,
}

/// Resolve `property` against `resource`, adding joins for traversed
/// associations (deduplicated by the query's join registry).
///
/// Every segment but the last must be a navigable association on the
/// current type; otherwise `None`. The leaf itself is not looked up here —
/// the caller resolves it against the returned final type.
pub fn resolve_path(
    metadata: &dyn MetadataProvider,
    query: &mut SqlQuery,
    resource: &str,
    property: &str,
) -> Option<ResolvedPath> {
    let mut alias = query.root_alias().to_string();
    let mut current = resource.to_string();
    let mut associations = Vec::new();

    let mut segments = property.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            return Some(ResolvedPath {
                alias,
                leaf: segment.to_string(),
                resource: current,
                associations,
            });
        }

        match metadata.resolve(&current, segment) {
            Some(PropertyKind::Association {
                target: Some(target),
                ..
            }) => {
                alias = query.join_once(&alias, segment);
                associations.push(segment.to_string());
                current = target;
            }
            // Scalar field, non-navigable association, or unmapped name
            // in a nested position: the path cannot continue.
            _ => return None,
        }
    }

    None
}
