//! Raw value normalization
//!
//! Turns an arbitrary JSON filter value into an ordered list of scalar
//! strings. Anything that is not a string in a list-like position is
//! dropped silently; an all-dropped input yields an empty vec, which
//! callers must treat as invalid.

use serde_json::Value;

/// Normalize a raw filter value into ordered scalar strings.
///
/// - a bare string becomes a one-element list;
/// - array elements are kept when they are strings;
/// - object entries are kept when the key is a plain base-10 index and the
///   value is a string (insertion order preserved);
/// - any other input, element, or entry is dropped.
pub fn normalize_values(raw: &Value) -> Vec<String> {
    match raw {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| is_index_key(key))
            .filter_map(|(_, value)| value.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// A plain sequential index key: canonical base-10, no sign, no leading
/// zeros (except `"0"` itself).
fn is_index_key(key: &str) -> bool {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return false;
    }
    key.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_string_wraps() {
        assert_eq!(normalize_values(&json!("dune")), vec!["dune"]);
    }

    #[test]
    fn scalar_non_string_drops() {
        assert!(normalize_values(&json!(5)).is_empty());
        assert!(normalize_values(&json!(true)).is_empty());
        assert!(normalize_values(&json!(null)).is_empty());
    }

    #[test]
    fn array_keeps_strings_in_order() {
        assert_eq!(
            normalize_values(&json!(["a", "b", "a"])),
            vec!["a", "b", "a"]
        );
    }

    #[test]
    fn array_drops_non_strings() {
        assert_eq!(normalize_values(&json!(["a", 5, "b", null])), vec!["a", "b"]);
    }

    #[test]
    fn object_drops_non_index_keys() {
        assert_eq!(
            normalize_values(&json!({"0": "a", "1": "b", "x": "c"})),
            vec!["a", "b"]
        );
    }

    #[test]
    fn object_drops_non_string_values() {
        assert_eq!(normalize_values(&json!({"0": "a", "1": 5})), vec!["a"]);
    }

    #[test]
    fn object_rejects_padded_and_signed_keys() {
        assert!(normalize_values(&json!({"01": "a"})).is_empty());
        assert!(normalize_values(&json!({"-1": "a"})).is_empty());
        assert_eq!(normalize_values(&json!({"0": "a"})), vec!["a"]);
    }

    #[test]
    fn empty_inputs_yield_empty() {
        assert!(normalize_values(&json!([])).is_empty());
        assert!(normalize_values(&json!({})).is_empty());
    }
}
