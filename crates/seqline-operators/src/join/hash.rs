//! Hash inner join.
//!
//! Each cursor builds a lookup of the inner side keyed by `inner_key` on its
//! first `move_next`, then streams the outer side in source order, probing the
//! lookup with `outer_key`. Every match in bucket order produces one result.
//! Outer elements with no bucket produce nothing.

use std::hash::Hash;
use std::rc::Rc;

use crate::group::{to_lookup_table, LookupTable};
use crate::traits::{BoxCursor, Cursor, Factory, FactoryRef, KeySelector};

pub type ResultSelector<O, I, R> = Rc<dyn Fn(&O, &I) -> R>;

pub struct HashJoinFactory<O, I, K, R> {
    outer: FactoryRef<O>,
    inner: FactoryRef<I>,
    outer_key: KeySelector<O, K>,
    inner_key: KeySelector<I, K>,
    result: ResultSelector<O, I, R>,
}

impl<O, I, K, R> HashJoinFactory<O, I, K, R> {
    pub fn new(
        outer: FactoryRef<O>,
        inner: FactoryRef<I>,
        outer_key: KeySelector<O, K>,
        inner_key: KeySelector<I, K>,
        result: ResultSelector<O, I, R>,
    ) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
        }
    }
}

impl<O, I, K, R> Factory<R> for HashJoinFactory<O, I, K, R>
where
    O: 'static,
    I: Clone + 'static,
    K: Hash + Eq + Clone + 'static,
    R: Clone + 'static,
{
    fn name(&self) -> &'static str {
        "join_hash"
    }

    fn is_eager(&self) -> bool {
        true
    }

    fn create(&self) -> BoxCursor<R> {
        Box::new(HashJoinCursor {
            outer: self.outer.create(),
            inner: Rc::clone(&self.inner),
            outer_key: Rc::clone(&self.outer_key),
            inner_key: Rc::clone(&self.inner_key),
            result: Rc::clone(&self.result),
            lookup: None,
            outer_item: None,
            bucket: None,
            current: None,
        })
    }
}

struct HashJoinCursor<O, I, K, R> {
    outer: BoxCursor<O>,
    inner: FactoryRef<I>,
    outer_key: KeySelector<O, K>,
    inner_key: KeySelector<I, K>,
    result: ResultSelector<O, I, R>,
    lookup: Option<LookupTable<K, I>>,
    outer_item: Option<O>,
    /// (bucket position in the lookup, next index within the bucket)
    bucket: Option<(usize, usize)>,
    current: Option<R>,
}

impl<O, I, K, R> Cursor<R> for HashJoinCursor<O, I, K, R>
where
    I: Clone,
    K: Hash + Eq + Clone,
    R: Clone,
{
    fn move_next(&mut self) -> bool {
        let inner = &self.inner;
        let inner_key = &self.inner_key;
        let lookup = self.lookup.get_or_insert_with(|| {
            let table = to_lookup_table(inner.as_ref(), inner_key.as_ref(), &|item: &I| {
                item.clone()
            });
            tracing::trace!(buckets = table.len(), "join lookup built");
            table
        });

        loop {
            if let (Some((pos, next)), Some(outer_item)) = (self.bucket, self.outer_item.as_ref()) {
                let matches = lookup.values_at(pos);
                if next < matches.len() {
                    self.current = Some((self.result)(outer_item, &matches[next]));
                    self.bucket = Some((pos, next + 1));
                    return true;
                }
                self.bucket = None;
            }

            if !self.outer.move_next() {
                self.outer_item = None;
                self.current = None;
                return false;
            }
            let Some(item) = self.outer.current() else {
                continue;
            };
            self.bucket = lookup.position(&(self.outer_key)(&item)).map(|pos| (pos, 0));
            self.outer_item = Some(item);
        }
    }

    fn current(&self) -> Option<R> {
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Sequence, SourceFactory};
    use crate::traits::drain;

    fn length_join(
        outer: Vec<usize>,
        inner: Vec<&'static str>,
    ) -> HashJoinFactory<usize, &'static str, usize, String> {
        HashJoinFactory::new(
            Rc::new(SourceFactory::new(Sequence::new(outer))) as FactoryRef<usize>,
            Rc::new(SourceFactory::new(Sequence::new(inner))) as FactoryRef<&'static str>,
            Rc::new(|n: &usize| *n) as KeySelector<usize, usize>,
            Rc::new(|s: &&'static str| s.len()) as KeySelector<&'static str, usize>,
            Rc::new(|n: &usize, s: &&'static str| format!("{}:{}", n, s))
                as ResultSelector<usize, &'static str, String>,
        )
    }

    fn join_lengths(outer: Vec<usize>, inner: Vec<&'static str>) -> Vec<String> {
        drain(length_join(outer, inner).create().as_mut())
    }

    #[test]
    fn reports_itself_eager() {
        let join = length_join(vec![3], vec!["cat"]);
        assert_eq!(join.name(), "join_hash");
        assert!(join.is_eager());
    }

    #[test]
    fn outer_major_inner_minor() {
        let out = join_lengths(
            vec![5, 3, 2],
            vec!["house", "cat", "hi", "bat", "rat", "mouse"],
        );
        assert_eq!(
            out,
            vec!["5:house", "5:mouse", "3:cat", "3:bat", "3:rat", "2:hi"]
        );
    }

    #[test]
    fn unmatched_rows_emit_nothing() {
        assert_eq!(join_lengths(vec![9, 3], vec!["cat", "house"]), vec!["3:cat"]);
        assert!(join_lengths(vec![], vec!["cat"]).is_empty());
        assert!(join_lengths(vec![3], vec![]).is_empty());
        assert!(join_lengths(vec![], vec![]).is_empty());
    }
}
