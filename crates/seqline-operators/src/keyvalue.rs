//! Key/value pairs and unique-key projection.
//!
//! Unlike grouping, a unique-key projection refuses a key it has already
//! seen: the first collision fails the whole projection with `DuplicateKey`.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use seqline_core::value::type_name;
use seqline_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::traits::Cursor;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyValuePair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyValuePair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for KeyValuePair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

/// Drain `cursor` into pairs, failing on the first repeated key.
pub fn unique_pairs<T, K, V>(
    cursor: &mut dyn Cursor<T>,
    key: &dyn Fn(&T) -> K,
    value: &dyn Fn(&T) -> V,
) -> Result<Vec<KeyValuePair<K, V>>>
where
    K: Hash + Eq + Clone + Debug,
{
    let mut seen: HashSet<K> = HashSet::new();
    let mut pairs = Vec::new();

    while cursor.move_next() {
        let Some(item) = cursor.current() else {
            continue;
        };
        let k = key(&item);
        if !seen.insert(k.clone()) {
            tracing::debug!(key = ?k, "duplicate key in unique-key projection");
            return Err(Error::duplicate_key(k));
        }
        pairs.push(KeyValuePair::new(k, value(&item)));
    }

    tracing::trace!(pairs = pairs.len(), "key/value projection materialized");
    Ok(pairs)
}

/// Pairs from a JSON object, in the map's key order.
pub fn object_pairs(value: Value) -> Result<Vec<KeyValuePair<String, Value>>> {
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| KeyValuePair::new(k, v))
            .collect()),
        other => {
            tracing::debug!(found = type_name(&other), "rejected non-object key/value source");
            Err(Error::type_mismatch("object", type_name(&other)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Sequence, SourceFactory};
    use crate::traits::Factory;
    use seqline_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn unique_keys_project() {
        let factory = SourceFactory::new(Sequence::new(vec![1, 2, 3]));
        let pairs = unique_pairs(factory.create().as_mut(), &|v: &i32| v.to_string(), &|v: &i32| v * 10)
            .unwrap();
        assert_eq!(
            pairs,
            vec![
                KeyValuePair::new("1".to_string(), 10),
                KeyValuePair::new("2".to_string(), 20),
                KeyValuePair::new("3".to_string(), 30),
            ]
        );
    }

    #[test]
    fn repeated_key_fails() {
        let factory = SourceFactory::new(Sequence::new(vec![1, 2, 2]));
        let err = unique_pairs(factory.create().as_mut(), &|v: &i32| *v, &|v: &i32| *v).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(err.to_string(), "duplicate key: 2");
    }

    #[test]
    fn object_pairs_require_object() {
        let pairs = object_pairs(json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], KeyValuePair::new("a".to_string(), json!(1)));
        assert_eq!(
            object_pairs(json!([1])).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }
}
