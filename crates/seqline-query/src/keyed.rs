//! Key/value facade.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use serde_json::{Map, Value};

use seqline_core::Result;
use seqline_operators::keyvalue::object_pairs;
use seqline_operators::source::SourceFactory;
use seqline_operators::{FactoryRef, KeyValuePair, Sequence};

use crate::enumerable::Enumerable;
use crate::queryable::Queryable;

/// A sequence of `KeyValuePair<K, V>`, as produced by grouping or a
/// unique-key projection.
pub struct KeyValueEnumerable<K, V> {
    factory: FactoryRef<KeyValuePair<K, V>>,
}

impl<K, V> Clone for KeyValueEnumerable<K, V> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<K, V> fmt::Debug for KeyValueEnumerable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueEnumerable")
            .field("operator", &self.factory.name())
            .finish()
    }
}

impl<K: Clone + 'static, V: Clone + 'static> KeyValueEnumerable<K, V> {
    pub fn from_factory(factory: FactoryRef<KeyValuePair<K, V>>) -> Self {
        Self { factory }
    }

    pub fn from_pairs(pairs: Vec<KeyValuePair<K, V>>) -> Self {
        Self::from_factory(Rc::new(SourceFactory::new(Sequence::new(pairs))))
    }

    pub fn keys(&self) -> Enumerable<K> {
        self.map(|pair: KeyValuePair<K, V>| pair.key)
    }

    pub fn values(&self) -> Enumerable<V> {
        self.map(|pair: KeyValuePair<K, V>| pair.value)
    }

    /// Object-form export. A repeated key keeps its last value.
    ///
    /// The map has no key order; use `keys()` or `iter()` (or
    /// `to_json_object` for JSON pairs) when first-seen order matters.
    pub fn to_object(&self) -> HashMap<K, V>
    where
        K: Hash + Eq,
    {
        self.iter().map(KeyValuePair::into_tuple).collect()
    }
}

impl KeyValueEnumerable<String, Value> {
    /// Pairs from a JSON object. Anything else is a `TypeMismatch`.
    pub fn from_json_object(value: Value) -> Result<Self> {
        Ok(Self::from_pairs(object_pairs(value)?))
    }

    pub fn to_json_object(&self) -> Value {
        let map: Map<String, Value> = self.iter().map(KeyValuePair::into_tuple).collect();
        Value::Object(map)
    }
}

impl<K: Clone + 'static, V: Clone + 'static> Queryable<KeyValuePair<K, V>>
    for KeyValueEnumerable<K, V>
{
    fn factory(&self) -> FactoryRef<KeyValuePair<K, V>> {
        Rc::clone(&self.factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqline_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn group_accumulates_in_first_seen_order() {
        let groups = Enumerable::new(vec![1, 2, 2, 3, 3, 3]).group(|x: &i32| *x);
        let flat: Vec<(i32, Vec<i32>)> = groups
            .iter()
            .map(|pair| (pair.key, pair.value.to_vec()))
            .collect();
        assert_eq!(
            flat,
            vec![(1, vec![1]), (2, vec![2, 2]), (3, vec![3, 3, 3])]
        );
    }

    #[test]
    fn group_by_string_key() {
        let words = Enumerable::new(vec!["apple", "bob", "avocado", "bean", "cat"]);
        let groups = words.group_with(
            |w: &&str| w[..1].to_string(),
            |w: &&str| w.len(),
        );
        assert_eq!(groups.keys().to_vec(), vec!["a", "b", "c"]);
        let lens: Vec<Vec<usize>> = groups.values().map(|g: Enumerable<usize>| g.to_vec()).to_vec();
        assert_eq!(lens, vec![vec![5, 7], vec![3, 4], vec![3]]);
    }

    #[test]
    fn group_map_flattens_pairs() {
        let summary = Enumerable::new(vec![1, 2, 3, 4, 5]).group_map(
            |x: &i32| if x % 2 == 0 { "even" } else { "odd" },
            |x: &i32| *x,
            |key, group| format!("{}={}", key, group.count()),
        );
        assert_eq!(summary.to_vec(), vec!["odd=3", "even=2"]);
    }

    #[test]
    fn group_is_lazy_until_consumed() {
        let source = Sequence::new(vec![1]);
        let groups = Enumerable::from_sequence(&source).group(|x: &i32| *x % 2);
        source.push(3);
        source.push(2);
        assert_eq!(groups.keys().to_vec(), vec![1, 0]);
    }

    #[test]
    fn to_key_value_rejects_duplicates_but_group_does_not() {
        let items = Enumerable::new(vec!["a", "b", "a"]);
        let err = items
            .to_key_value(|s: &&str| s.to_string(), |s: &&str| s.len())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(items.group(|s: &&str| s.to_string()).count(), 2);
    }

    #[test]
    fn to_object_and_json_round_trip() {
        let kv = Enumerable::new(vec![("a", 1), ("b", 2)])
            .to_key_value(|p: &(&str, i32)| p.0.to_string(), |p: &(&str, i32)| p.1)
            .unwrap();
        let object = kv.to_object();
        assert_eq!(object.get("a"), Some(&1));
        assert_eq!(object.len(), 2);

        let parsed = KeyValueEnumerable::from_json_object(json!({"x": 1, "y": [2]})).unwrap();
        assert_eq!(parsed.keys().to_vec(), vec!["x", "y"]);
        assert_eq!(parsed.to_json_object(), json!({"x": 1, "y": [2]}));
    }

    #[test]
    fn to_object_keeps_last_value_while_keys_keep_order() {
        let kv = KeyValueEnumerable::from_pairs(vec![
            KeyValuePair { key: "b", value: 1 },
            KeyValuePair { key: "a", value: 2 },
            KeyValuePair { key: "b", value: 3 },
        ]);
        let object = kv.to_object();
        assert_eq!(object.len(), 2);
        assert_eq!(object.get("b"), Some(&3));
        assert_eq!(object.get("a"), Some(&2));
        assert_eq!(kv.keys().to_vec(), vec!["b", "a", "b"]);
    }

    #[test]
    fn from_json_object_rejects_arrays() {
        let err = KeyValueEnumerable::from_json_object(json!([1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}
