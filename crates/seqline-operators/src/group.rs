//! Hash grouping.
//!
//! `LookupTable` maps each key to the values that produced it. Keys keep the
//! order they were first seen in; values keep source order within a key.
//! Grouping, `to_lookup`, and join's inner side all build one of these in a
//! single pass.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use crate::keyvalue::KeyValuePair;
use crate::traits::{BoxCursor, BufferCursor, Cursor, Factory, FactoryRef, KeySelector};

#[derive(Debug, Clone)]
pub struct LookupTable<K, V> {
    index: HashMap<K, usize>,
    groups: Vec<(K, Vec<V>)>,
}

impl<K, V> Default for LookupTable<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> LookupTable<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&pos) => self.groups[pos].1.push(value),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![value]));
            }
        }
    }

    /// Position of `key` in first-occurrence order.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.position(key).map(|pos| self.values_at(pos))
    }

    pub fn values_at(&self, pos: usize) -> &[V] {
        &self.groups[pos].1
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> Vec<(K, Vec<V>)> {
        self.groups
    }
}

/// Drain `cursor` into a lookup table.
pub fn build_lookup_table<T, K, V>(
    cursor: &mut dyn Cursor<T>,
    key: &dyn Fn(&T) -> K,
    value: &dyn Fn(&T) -> V,
) -> LookupTable<K, V>
where
    K: Hash + Eq + Clone,
{
    let mut table = LookupTable::new();
    while cursor.move_next() {
        if let Some(item) = cursor.current() {
            table.insert(key(&item), value(&item));
        }
    }
    tracing::trace!(keys = table.len(), "lookup table built");
    table
}

/// One full traversal of `factory` into a lookup table.
pub fn to_lookup_table<T, K, V>(
    factory: &dyn Factory<T>,
    key: &dyn Fn(&T) -> K,
    value: &dyn Fn(&T) -> V,
) -> LookupTable<K, V>
where
    K: Hash + Eq + Clone,
{
    build_lookup_table(factory.create().as_mut(), key, value)
}

/// Grouping as a sequence of `(key, group)` pairs.
///
/// The table is built per cursor on the first `move_next`. `wrap` turns each
/// group's buffered values into the caller's group type.
pub struct GroupFactory<T, K, V, G> {
    upstream: FactoryRef<T>,
    key: KeySelector<T, K>,
    value: KeySelector<T, V>,
    wrap: Rc<dyn Fn(Vec<V>) -> G>,
}

impl<T, K, V, G> GroupFactory<T, K, V, G> {
    pub fn new(
        upstream: FactoryRef<T>,
        key: KeySelector<T, K>,
        value: KeySelector<T, V>,
        wrap: Rc<dyn Fn(Vec<V>) -> G>,
    ) -> Self {
        Self {
            upstream,
            key,
            value,
            wrap,
        }
    }
}

impl<T, K, V, G> Factory<KeyValuePair<K, G>> for GroupFactory<T, K, V, G>
where
    T: 'static,
    K: Hash + Eq + Clone + 'static,
    V: 'static,
    G: Clone + 'static,
{
    fn name(&self) -> &'static str {
        "group"
    }

    fn is_eager(&self) -> bool {
        true
    }

    fn create(&self) -> BoxCursor<KeyValuePair<K, G>> {
        Box::new(GroupCursor {
            upstream: self.upstream.create(),
            key: Rc::clone(&self.key),
            value: Rc::clone(&self.value),
            wrap: Rc::clone(&self.wrap),
            groups: None,
        })
    }
}

struct GroupCursor<T, K, V, G> {
    upstream: BoxCursor<T>,
    key: KeySelector<T, K>,
    value: KeySelector<T, V>,
    wrap: Rc<dyn Fn(Vec<V>) -> G>,
    groups: Option<BufferCursor<KeyValuePair<K, G>>>,
}

impl<T, K, V, G> Cursor<KeyValuePair<K, G>> for GroupCursor<T, K, V, G>
where
    K: Hash + Eq + Clone,
    G: Clone,
{
    fn move_next(&mut self) -> bool {
        let upstream = &mut self.upstream;
        let (key, value, wrap) = (&self.key, &self.value, &self.wrap);
        self.groups
            .get_or_insert_with(|| {
                let table = build_lookup_table(upstream.as_mut(), key.as_ref(), value.as_ref());
                let pairs = table
                    .into_groups()
                    .into_iter()
                    .map(|(k, values)| KeyValuePair::new(k, wrap(values)))
                    .collect();
                BufferCursor::new(pairs)
            })
            .move_next()
    }

    fn current(&self) -> Option<KeyValuePair<K, G>> {
        self.groups.as_ref().and_then(|g| g.current())
    }
}
