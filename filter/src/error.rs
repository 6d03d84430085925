//! Internal fault type
//!
//! Malformed user input never raises — it is downgraded to a diagnostic
//! notice plus a processing stop. [`FilterError`] covers only internal
//! consistency violations: states the pipeline is supposed to have made
//! unreachable before the failing call.

use thiserror::Error;

/// Internal consistency faults of the filter pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// An empty value batch reached the predicate compiler. Callers must
    /// reject empty sets before compiling.
    #[error("empty value batch for property \"{property}\" reached the predicate compiler")]
    EmptyValueBatch { property: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_batch_display() {
        let err = FilterError::EmptyValueBatch {
            property: "title".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "empty value batch for property \"title\" reached the predicate compiler"
        );
    }
}
