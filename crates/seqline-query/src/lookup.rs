//! Eager key → group lookup returned by `to_lookup`.

use std::collections::HashMap;
use std::hash::Hash;

use seqline_operators::group::LookupTable;
use seqline_operators::KeyValuePair;

use crate::enumerable::Enumerable;
use crate::keyed::KeyValueEnumerable;

#[derive(Debug, Clone)]
pub struct Lookup<K, V> {
    index: HashMap<K, usize>,
    groups: Vec<(K, Enumerable<V>)>,
}

impl<K, V> Lookup<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: Clone + 'static,
{
    pub(crate) fn from_table(table: LookupTable<K, V>) -> Self {
        let groups: Vec<(K, Enumerable<V>)> = table
            .into_groups()
            .into_iter()
            .map(|(key, values)| (key, Enumerable::new(values)))
            .collect();
        let index = groups
            .iter()
            .enumerate()
            .map(|(pos, (key, _))| (key.clone(), pos))
            .collect();
        Self { index, groups }
    }

    pub fn get(&self, key: &K) -> Option<&Enumerable<V>> {
        self.index.get(key).map(|&pos| &self.groups[pos].1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Enumerable<V>)> {
        self.groups.iter().map(|(key, group)| (key, group))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn to_key_value(&self) -> KeyValueEnumerable<K, Enumerable<V>> {
        KeyValueEnumerable::from_pairs(
            self.groups
                .iter()
                .map(|(key, group)| KeyValuePair::new(key.clone(), group.clone()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn keeps_first_seen_key_order() {
        let lookup = Enumerable::new(vec!["cat", "house", "hi", "mouse", "bat"])
            .to_lookup(|w: &&str| w.len());
        assert_eq!(lookup.keys().copied().collect::<Vec<_>>(), vec![3, 5, 2]);
        assert_eq!(
            lookup.get(&3).map(|g| g.to_vec()),
            Some(vec!["cat", "bat"])
        );
        assert!(!lookup.contains_key(&4));
        assert_eq!(lookup.len(), 3);
    }

    #[test]
    fn value_selector_and_export() {
        let lookup = Enumerable::new(vec![1, 2, 3, 4]).to_lookup_with(|x: &i32| x % 2, |x: &i32| x * 10);
        let pairs: Vec<(i32, Vec<i32>)> = lookup
            .to_key_value()
            .iter()
            .map(|pair| (pair.key, pair.value.to_vec()))
            .collect();
        assert_eq!(pairs, vec![(1, vec![10, 30]), (0, vec![20, 40])]);
    }
}
