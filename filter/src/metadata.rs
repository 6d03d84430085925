//! Property metadata for filterable resources
//!
//! The filter core never inspects a real database schema. It asks a
//! [`MetadataProvider`] what a property name means on a given resource:
//! a scalar field, an association (to-one or to-many), or nothing at all.
//! A [`SchemaRegistry`] is provided as an in-memory implementation for
//! embedders without a live schema source and for tests.

use std::collections::HashMap;

/// Declared kind of a scalar field.
///
/// Only `Integer` carries validation semantics today; all other kinds are
/// accepted without stricter value checks (see `validate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Float,
    Boolean,
    String,
    Datetime,
    /// Kind could not be determined; validation always passes.
    Unknown,
}

/// What a property name resolves to on a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// A scalar column on the resource itself.
    Field { kind: ScalarKind },
    /// A relation to another resource.
    Association {
        /// Collection-valued (to-many) associations are filtered through a
        /// join; single-valued (to-one) ones directly on the owning alias.
        collection: bool,
        /// Target resource name, or `None` when the association cannot be
        /// traversed by nested property paths.
        target: Option<String>,
        /// Declared kind of the target's identifier. Association filtering
        /// is always exact-by-identifier, so values are validated against
        /// this kind.
        id_kind: ScalarKind,
    },
}

/// Resolves property names against resource metadata.
///
/// `None` means the property is not mapped on the resource at all.
pub trait MetadataProvider {
    fn resolve(&self, resource: &str, name: &str) -> Option<PropertyKind>;
}

/// In-memory metadata source keyed by resource name.
///
/// Registration order does not matter; lookups are exact-match on both
/// resource and property name.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    resources: HashMap<String, HashMap<String, PropertyKind>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scalar field on a resource.
    pub fn field(mut self, resource: &str, name: &str, kind: ScalarKind) -> Self {
        self.insert(resource, name, PropertyKind::Field { kind });
        self
    }

    /// Register a single-valued association.
    pub fn to_one(mut self, resource: &str, name: &str, target: &str, id_kind: ScalarKind) -> Self {
        self.insert(
            resource,
            name,
            PropertyKind::Association {
                collection: false,
                target: Some(target.to_string()),
                id_kind,
            },
        );
        self
    }

    /// Register a collection-valued association.
    pub fn to_many(
        mut self,
        resource: &str,
        name: &str,
        target: &str,
        id_kind: ScalarKind,
    ) -> Self {
        self.insert(
            resource,
            name,
            PropertyKind::Association {
                collection: true,
                target: Some(target.to_string()),
                id_kind,
            },
        );
        self
    }

    /// Register an association that cannot be traversed by dotted paths.
    ///
    /// Filtering on the association itself still works; using it as an
    /// intermediate path segment fails resolution.
    pub fn opaque_association(
        mut self,
        resource: &str,
        name: &str,
        collection: bool,
        id_kind: ScalarKind,
    ) -> Self {
        self.insert(
            resource,
            name,
            PropertyKind::Association {
                collection,
                target: None,
                id_kind,
            },
        );
        self
    }

    fn insert(&mut self, resource: &str, name: &str, kind: PropertyKind) {
        self.resources
            .entry(resource.to_string())
            .or_default()
            .insert(name.to_string(), kind);
    }
}

impl MetadataProvider for SchemaRegistry {
    fn resolve(&self, resource: &str, name: &str) -> Option<PropertyKind> {
        self.resources
            .get(resource)
            .and_then(|props| props.get(name))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_field() {
        let schema = SchemaRegistry::new().field("book", "title", ScalarKind::String);
        assert_eq!(
            schema.resolve("book", "title"),
            Some(PropertyKind::Field {
                kind: ScalarKind::String
            })
        );
    }

    #[test]
    fn resolve_unmapped_property() {
        let schema = SchemaRegistry::new().field("book", "title", ScalarKind::String);
        assert_eq!(schema.resolve("book", "isbn"), None);
        assert_eq!(schema.resolve("author", "title"), None);
    }

    #[test]
    fn resolve_associations() {
        let schema = SchemaRegistry::new()
            .to_one("book", "author", "author", ScalarKind::Integer)
            .to_many("book", "tags", "tag", ScalarKind::Integer);

        assert_eq!(
            schema.resolve("book", "author"),
            Some(PropertyKind::Association {
                collection: false,
                target: Some("author".to_string()),
                id_kind: ScalarKind::Integer,
            })
        );
        assert_eq!(
            schema.resolve("book", "tags"),
            Some(PropertyKind::Association {
                collection: true,
                target: Some("tag".to_string()),
                id_kind: ScalarKind::Integer,
            })
        );
    }

    #[test]
    fn opaque_association_has_no_target() {
        let schema =
            SchemaRegistry::new().opaque_association("book", "publisher", false, ScalarKind::Integer);
        match schema.resolve("book", "publisher") {
            Some(PropertyKind::Association { target, .. }) => assert!(target.is_none()),
            other => panic!("unexpected resolution: {:?}", other),
        }
    }
}
