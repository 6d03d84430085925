//! Filter diagnostics
//!
//! The core decides *what* to report; transport is behind the
//! [`Diagnostics`] trait. Notices are fire-and-forget: they never fail and
//! never block. [`TracingDiagnostics`] is the production sink,
//! [`RecordingDiagnostics`] collects notices for assertions in tests and
//! embedders that surface them to API clients.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Why a filter entry stopped request processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeReason {
    /// The entry's value was null.
    NullValue,
    /// The property (or a path segment) is not mapped on the resource.
    UnmappedProperty,
    /// Normalization left no usable values.
    EmptyValueSet,
    /// Values do not match the declared kind of the target field.
    InvalidValueType,
    /// Multiple values combined with a strategy other than exact.
    UnsupportedMultiValueStrategy,
    /// The strategy name is not in the known set.
    UnknownStrategy,
}

impl fmt::Display for NoticeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NullValue => "null value",
            Self::UnmappedProperty => "unmapped property",
            Self::EmptyValueSet => "empty value set",
            Self::InvalidValueType => "invalid value type",
            Self::UnsupportedMultiValueStrategy => "unsupported multi-value strategy",
            Self::UnknownStrategy => "unknown strategy",
        };
        f.write_str(label)
    }
}

/// One ignored-filter notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub reason: NoticeReason,
    pub property: String,
    pub strategy: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn new(
        reason: NoticeReason,
        property: &str,
        strategy: Option<&str>,
        message: String,
    ) -> Self {
        Self {
            reason,
            property: property.to_string(),
            strategy: strategy.map(str::to_string),
            message,
        }
    }
}

/// Notice sink. Implementations must not fail or block.
pub trait Diagnostics {
    fn notice(&self, notice: &Notice);
}

/// Production sink: one warning event per notice.
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn notice(&self, notice: &Notice) {
        tracing::warn!(
            property = %notice.property,
            reason = %notice.reason,
            "Invalid filter ignored: {}",
            notice.message
        );
    }
}

/// Collecting sink for tests and notice-surfacing embedders.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    pub fn reasons(&self) -> Vec<NoticeReason> {
        self.notices().iter().map(|n| n.reason).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Notices must stay fire-and-forget, so a poisoned lock is recovered
    // rather than propagated.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn notice(&self, notice: &Notice) {
        self.lock().push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_collects_in_order() {
        let sink = RecordingDiagnostics::new();
        sink.notice(&Notice::new(
            NoticeReason::EmptyValueSet,
            "title",
            Some("exact"),
            "At least one value is required".to_string(),
        ));
        sink.notice(&Notice::new(
            NoticeReason::UnmappedProperty,
            "isbn",
            None,
            "Property is not mapped".to_string(),
        ));

        assert_eq!(
            sink.reasons(),
            vec![NoticeReason::EmptyValueSet, NoticeReason::UnmappedProperty]
        );
        assert_eq!(sink.notices()[0].strategy.as_deref(), Some("exact"));
    }

    #[test]
    fn reason_labels() {
        assert_eq!(NoticeReason::EmptyValueSet.to_string(), "empty value set");
        assert_eq!(
            NoticeReason::UnsupportedMultiValueStrategy.to_string(),
            "unsupported multi-value strategy"
        );
    }
}
