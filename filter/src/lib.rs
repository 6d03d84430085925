//! # searchfilter
//!
//! Compiles a structured, untrusted search-filter request (property name →
//! matching strategy → value(s)) into a conjunction of SQL predicate
//! fragments, named parameter bindings, and deduplicated joins on an
//! in-progress query.
//!
//! The crate is the translation step only: entity metadata comes from a
//! [`MetadataProvider`], the accumulating query state is a [`SqlQuery`],
//! and ignored-filter reporting goes through a [`Diagnostics`] sink. SQL
//! execution, request transport, and response shaping live elsewhere.
//!
//! ## Example
//!
//! ```
//! use searchfilter::{
//!     FilterRequest, ScalarKind, SchemaRegistry, SearchFilter, SqlQuery,
//!     TracingDiagnostics,
//! };
//! use serde_json::json;
//!
//! let schema = SchemaRegistry::new()
//!     .field("book", "title", ScalarKind::String)
//!     .to_one("book", "author", "author", ScalarKind::Integer)
//!     .field("author", "name", ScalarKind::String);
//!
//! let request = FilterRequest::from_search(&json!({
//!     "title": { "ipartial": "dune" },
//!     "author.name": { "start": "Frank" }
//! }));
//!
//! let diagnostics = TracingDiagnostics;
//! let mut query = SqlQuery::new("book", "o");
//! SearchFilter::new(&schema, &diagnostics)
//!     .apply(&request, "book", &mut query)
//!     .unwrap();
//!
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT o FROM book o LEFT JOIN o.author author_a1 \
//!      WHERE LOWER(o.title) LIKE LOWER(CONCAT('%', :title_p1, '%')) \
//!      AND author_a1.name LIKE CONCAT(:name_p2, '%')"
//! );
//! ```

mod compile;
mod error;
mod normalize;
mod path;
mod relation;
mod search;
mod validate;

pub mod diagnostics;
pub mod metadata;
pub mod query;
pub mod request;

pub use compile::wrap_case;
pub use diagnostics::{Diagnostics, Notice, NoticeReason, RecordingDiagnostics, TracingDiagnostics};
pub use error::FilterError;
pub use metadata::{MetadataProvider, PropertyKind, ScalarKind, SchemaRegistry};
pub use normalize::normalize_values;
pub use path::{ResolvedPath, resolve_path};
pub use query::{Join, ParamValue, SqlQuery};
pub use request::{FilterRequest, PropertyFilter, Strategy};
pub use search::SearchFilter;
pub use validate::values_match_kind;
