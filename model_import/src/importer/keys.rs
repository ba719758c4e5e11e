//! Matching candidate keys against a JSON object.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{KeyMatching, normalize_key};

/// Lookup view over one JSON object.
pub(crate) struct KeyIndex<'a> {
    object: &'a Map<String, Value>,
    normalized: Option<HashMap<String, (&'a str, &'a Value)>>,
}

impl<'a> KeyIndex<'a> {
    pub(crate) fn new(object: &'a Map<String, Value>, matching: KeyMatching) -> Self {
        let normalized = match matching {
            KeyMatching::Exact => None,
            KeyMatching::Normalized => {
                let mut index = HashMap::with_capacity(object.len());
                for (key, value) in object {
                    // First key in map order wins when two keys normalise alike.
                    index
                        .entry(normalize_key(key))
                        .or_insert((key.as_str(), value));
                }
                Some(index)
            }
        };
        Self { object, normalized }
    }

    /// First present candidate: exact matches across all candidates, then
    /// normalised ones.
    pub(crate) fn find<'k, K>(
        &self,
        candidates: &'k [K],
        normalized: &[String],
    ) -> Option<(&'k str, &'a Value)>
    where
        K: AsRef<str>,
        'a: 'k,
    {
        candidates
            .iter()
            .find_map(|candidate| {
                let key = candidate.as_ref();
                self.object.get(key).map(|value| (key, value))
            })
            .or_else(|| {
                let index = self.normalized.as_ref()?;
                normalized.iter().find_map(|key| index.get(key).copied())
            })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for key lookup.

    use rstest::rstest;
    use serde_json::{Map, Value, json};

    use super::KeyIndex;
    use crate::{KeyMatching, normalize_key};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    fn lookup(map: &Map<String, Value>, matching: KeyMatching, candidates: &[&str]) -> Option<String> {
        let normalized: Vec<_> = candidates.iter().map(|key| normalize_key(key)).collect();
        KeyIndex::new(map, matching)
            .find(candidates, &normalized)
            .map(|(key, _)| key.to_owned())
    }

    #[rstest]
    #[case::camel("lastName")]
    #[case::lower("lastname")]
    #[case::snake("last_name")]
    #[case::upper("LAST_NAME")]
    fn normalised_lookup_accepts_spelling_variants(#[case] json_key: &str) {
        let mut map = Map::new();
        map.insert(json_key.to_owned(), json!("Doe"));
        assert_eq!(
            lookup(&map, KeyMatching::Normalized, &["last_name"]).as_deref(),
            Some(json_key)
        );
    }

    #[test]
    fn exact_lookup_ignores_spelling_variants() {
        let map = object(json!({"lastName": "Doe"}));
        assert_eq!(lookup(&map, KeyMatching::Exact, &["last_name"]), None);
        assert_eq!(
            lookup(&map, KeyMatching::Exact, &["lastName"]).as_deref(),
            Some("lastName")
        );
    }

    #[test]
    fn exact_match_beats_earlier_normalised_candidate() {
        let map = object(json!({"FIRST": 1, "second": 2}));
        assert_eq!(
            lookup(&map, KeyMatching::Normalized, &["first", "second"]).as_deref(),
            Some("second")
        );
    }

    #[test]
    fn candidates_are_tried_in_order() {
        let map = object(json!({"alias": 1, "primary": 2}));
        assert_eq!(
            lookup(&map, KeyMatching::Exact, &["primary", "alias"]).as_deref(),
            Some("primary")
        );
    }
}
