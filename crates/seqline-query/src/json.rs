//! Field-oriented helpers for sequences of JSON values.
//!
//! Keys are resolved with dotted paths (`"a.b"`, `"items.0"`); a missing
//! field is `null`. Ordering uses the total JSON order from
//! `seqline_core::value::compare`, and grouping uses the bare-string key form.

use serde_json::Value;

use seqline_core::order::{key_comparer, Direction};
use seqline_core::value::{compare, field, key_string};
use seqline_core::Result;
use seqline_operators::Sequence;

use crate::enumerable::Enumerable;
use crate::keyed::KeyValueEnumerable;
use crate::queryable::Queryable;
use crate::sorted::SortedEnumerable;

impl Enumerable<Value> {
    /// Sequence over a JSON array. Any other JSON type is a `TypeMismatch`.
    pub fn from_json(value: Value) -> Result<Self> {
        Ok(Self::from_sequence(&Sequence::from_json(value)?))
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.to_vec())
    }

    pub fn select_field(&self, path: &str) -> Enumerable<Value> {
        let path = path.to_string();
        self.map(move |item: Value| field(&item, &path))
    }

    pub fn sort_by_field(&self, path: &str, direction: Direction) -> SortedEnumerable<Value> {
        let path = path.to_string();
        self.sort_with(move |item: &Value| field(item, &path), direction, compare)
    }

    pub fn group_by_field(&self, path: &str) -> KeyValueEnumerable<String, Enumerable<Value>> {
        let path = path.to_string();
        self.group(move |item: &Value| key_string(&field(item, &path)))
    }
}

impl SortedEnumerable<Value> {
    pub fn subsort_by_field(&self, path: &str, direction: Direction) -> Self {
        let path = path.to_string();
        self.subsort_using(key_comparer(
            move |item: &Value| field(item, &path),
            direction,
            compare,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqline_core::ErrorKind;
    use serde_json::json;

    fn people() -> Enumerable<Value> {
        Enumerable::from_json(json!([
            {"name": "ann", "team": "red", "age": 31},
            {"name": "bo", "team": "blue", "age": 25},
            {"name": "cy", "team": "red", "age": 25},
            {"name": "di", "team": "blue"}
        ]))
        .unwrap()
    }

    #[test]
    fn rejects_non_arrays() {
        let err = Enumerable::from_json(json!({"a": 1})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn sort_then_subsort_by_field() {
        let sorted = people()
            .sort_by_field("age", Direction::Ascending)
            .subsort_by_field("name", Direction::Descending);
        assert_eq!(
            sorted.to_enumerable().select_field("name").to_json(),
            json!(["di", "cy", "bo", "ann"])
        );
    }

    #[test]
    fn group_by_field_keeps_first_seen_order() {
        let teams = people().group_by_field("team");
        assert_eq!(teams.keys().to_vec(), vec!["red", "blue"]);
        let sizes: Vec<usize> = teams.values().map(|g: Enumerable<Value>| g.count()).to_vec();
        assert_eq!(sizes, vec![2, 2]);
    }

    #[test]
    fn distinct_on_json_values() {
        let ages = people().select_field("age").distinct();
        assert_eq!(ages.to_json(), json!([31, 25, null]));
    }
}
