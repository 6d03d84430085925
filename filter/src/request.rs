//! Structured filter request
//!
//! The wire shape is a JSON object mapping property names (dotted paths
//! allowed) to either a strategy → value object or a bare value (implicit
//! exact match). Iteration order equals input order — `serde_json` is built
//! with `preserve_order` so object keys keep their wire order.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Matching strategy for scalar string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Exact,
    Partial,
    Start,
    End,
    WordStart,
}

impl Strategy {
    /// Parse a wire strategy name.
    ///
    /// A leading `i` marks the case-insensitive variant and is stripped
    /// before matching the closed name set. Returns the strategy and a
    /// case-sensitivity flag; `None` for unknown names.
    pub fn parse(name: &str) -> Option<(Self, bool)> {
        if let Some(strategy) = Self::from_name(name) {
            return Some((strategy, true));
        }
        name.strip_prefix('i')
            .and_then(Self::from_name)
            .map(|strategy| (strategy, false))
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "exact" => Some(Self::Exact),
            "partial" => Some(Self::Partial),
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            "word_start" => Some(Self::WordStart),
            _ => None,
        }
    }
}

/// All filter entries requested for one property, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFilter {
    pub property: String,
    /// (strategy name, raw value); `None` means exact matching.
    pub entries: Vec<(Option<String>, Value)>,
}

/// Ordered filter request, one element per requested property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRequest {
    pub properties: Vec<PropertyFilter>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one (property, strategy, value) entry, merging into an
    /// existing property block when the property was already requested.
    pub fn push(&mut self, property: &str, strategy: Option<&str>, value: Value) {
        let entry = (strategy.map(str::to_string), value);
        if let Some(existing) = self
            .properties
            .iter_mut()
            .find(|p| p.property == property)
        {
            existing.entries.push(entry);
        } else {
            self.properties.push(PropertyFilter {
                property: property.to_string(),
                entries: vec![entry],
            });
        }
    }

    /// Flatten the wire shape into an ordered request.
    ///
    /// Non-object input yields an empty request (nothing to filter on).
    pub fn from_search(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::new(),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let mut request = Self::new();
        for (property, strategies) in map {
            match strategies {
                Value::Object(by_strategy) => {
                    for (strategy, value) in by_strategy {
                        request.push(property, Some(strategy), value.clone());
                    }
                }
                other => request.push(property, None, other.clone()),
            }
        }
        request
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<'de> Deserialize<'de> for FilterRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(&map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_known_strategies() {
        assert_eq!(Strategy::parse("exact"), Some((Strategy::Exact, true)));
        assert_eq!(Strategy::parse("partial"), Some((Strategy::Partial, true)));
        assert_eq!(Strategy::parse("start"), Some((Strategy::Start, true)));
        assert_eq!(Strategy::parse("end"), Some((Strategy::End, true)));
        assert_eq!(
            Strategy::parse("word_start"),
            Some((Strategy::WordStart, true))
        );
    }

    #[test]
    fn parse_case_insensitive_prefix() {
        assert_eq!(Strategy::parse("iexact"), Some((Strategy::Exact, false)));
        assert_eq!(Strategy::parse("istart"), Some((Strategy::Start, false)));
        assert_eq!(
            Strategy::parse("iword_start"),
            Some((Strategy::WordStart, false))
        );
    }

    #[test]
    fn parse_unknown_strategy() {
        assert_eq!(Strategy::parse("unknown"), None);
        assert_eq!(Strategy::parse("iunknown"), None);
        assert_eq!(Strategy::parse(""), None);
        assert_eq!(Strategy::parse("i"), None);
    }

    #[test]
    fn from_search_preserves_order() {
        let wire = json!({
            "title": { "partial": "dune" },
            "author.name": { "istart": "frank" }
        });
        let request = FilterRequest::from_search(&wire);
        assert_eq!(request.properties.len(), 2);
        assert_eq!(request.properties[0].property, "title");
        assert_eq!(request.properties[1].property, "author.name");
    }

    #[test]
    fn from_search_bare_value_is_exact() {
        let wire = json!({ "title": "dune" });
        let request = FilterRequest::from_search(&wire);
        assert_eq!(
            request.properties[0].entries,
            vec![(None, json!("dune"))]
        );
    }

    #[test]
    fn from_search_non_object_is_empty() {
        assert!(FilterRequest::from_search(&json!("x")).is_empty());
        assert!(FilterRequest::from_search(&json!(null)).is_empty());
    }

    #[test]
    fn deserialize_from_json() {
        let request: FilterRequest =
            serde_json::from_str(r#"{"title": {"exact": ["a", "b"]}}"#).unwrap();
        assert_eq!(request.properties.len(), 1);
        assert_eq!(
            request.properties[0].entries,
            vec![(Some("exact".to_string()), json!(["a", "b"]))]
        );
    }

    #[test]
    fn push_merges_same_property() {
        let mut request = FilterRequest::new();
        request.push("title", Some("start"), json!("a"));
        request.push("title", Some("end"), json!("b"));
        assert_eq!(request.properties.len(), 1);
        assert_eq!(request.properties[0].entries.len(), 2);
    }
}
