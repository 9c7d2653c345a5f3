//! The operator set shared by every facade flavor.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::ControlFlow;
use std::rc::Rc;

use seqline_core::order::{key_comparer, natural_order, Comparer, Direction};
use seqline_core::Result;
use seqline_operators::append::AppendFactory;
use seqline_operators::distinct;
use seqline_operators::filter::FilterFactory;
use seqline_operators::flatten::{self, SubSelector};
use seqline_operators::group::{to_lookup_table, GroupFactory};
use seqline_operators::join::hash::{HashJoinFactory, ResultSelector};
use seqline_operators::keyvalue::unique_pairs;
use seqline_operators::map::{MapFactory, Selector};
use seqline_operators::reverse::ReverseFactory;
use seqline_operators::skip::SkipFactory;
use seqline_operators::take::TakeFactory;
use seqline_operators::{
    BoxCursor, FactoryRef, KeySelector, KeyValuePair, Predicate, SkipBy, TakeBy,
};

use crate::enumerable::Enumerable;
use crate::iter::Iter;
use crate::keyed::KeyValueEnumerable;
use crate::lookup::Lookup;
use crate::sorted::SortedEnumerable;

/// Operators and terminal consumers over a factory of `T`.
///
/// Implementors only expose their factory; everything else is provided.
/// Operators return a new facade around a new factory and read nothing.
/// Terminal consumers each start one fresh traversal.
pub trait Queryable<T: Clone + 'static> {
    fn factory(&self) -> FactoryRef<T>;

    /// The same sequence as a plain `Enumerable`.
    fn to_enumerable(&self) -> Enumerable<T> {
        Enumerable::from_factory(self.factory())
    }

    // ---- operators ----

    fn filter<P>(&self, predicate: P) -> Enumerable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let predicate: Predicate<T> = Rc::new(predicate);
        Enumerable::from_factory(Rc::new(FilterFactory::new(self.factory(), predicate)))
    }

    /// Projection. The selector runs on every read of an element, not once per
    /// element; pure selectors cannot tell the difference.
    fn map<U, F>(&self, selector: F) -> Enumerable<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + 'static,
    {
        let selector: Selector<T, U> = Rc::new(selector);
        Enumerable::from_factory(Rc::new(MapFactory::new(self.factory(), selector)))
    }

    fn reverse(&self) -> Enumerable<T> {
        Enumerable::from_factory(Rc::new(ReverseFactory::new(self.factory())))
    }

    fn append<Q>(&self, other: &Q) -> Enumerable<T>
    where
        Q: Queryable<T>,
    {
        Enumerable::from_factory(Rc::new(AppendFactory::new(
            self.factory(),
            other.factory(),
        )))
    }

    fn skip_by(&self, rule: SkipBy<T>) -> Enumerable<T> {
        Enumerable::from_factory(Rc::new(SkipFactory::new(self.factory(), rule)))
    }

    /// Drop the first `count` elements of every traversal.
    fn skip(&self, count: usize) -> Enumerable<T> {
        self.skip_by(SkipBy::Count(count))
    }

    /// dropWhile: once `predicate` fails, everything after is kept.
    fn skip_while<P>(&self, predicate: P) -> Enumerable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.skip_by(SkipBy::While(Rc::new(predicate)))
    }

    fn take_by(&self, rule: TakeBy<T>) -> Enumerable<T> {
        Enumerable::from_factory(Rc::new(TakeFactory::new(self.factory(), rule)))
    }

    fn take(&self, count: usize) -> Enumerable<T> {
        self.take_by(TakeBy::Count(count))
    }

    /// takeWhile: the first failing element ends the sequence.
    fn take_while<P>(&self, predicate: P) -> Enumerable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.take_by(TakeBy::While(Rc::new(predicate)))
    }

    /// Sort by the elements themselves.
    fn sort(&self, direction: Direction) -> SortedEnumerable<T>
    where
        T: PartialOrd,
    {
        self.sort_by(|item: &T| item.clone(), direction)
    }

    fn sort_by<K, S>(&self, key: S, direction: Direction) -> SortedEnumerable<T>
    where
        K: PartialOrd + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.sort_with(key, direction, natural_order::<K>)
    }

    /// Sort by key with a caller-supplied key comparer. Descending hands the
    /// comparer its arguments swapped.
    fn sort_with<K, S, C>(&self, key: S, direction: Direction, compare: C) -> SortedEnumerable<T>
    where
        K: 'static,
        S: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> std::cmp::Ordering + 'static,
    {
        self.sort_using(key_comparer(key, direction, compare))
    }

    fn sort_using(&self, comparer: Comparer<T>) -> SortedEnumerable<T> {
        SortedEnumerable::new(self.factory(), comparer)
    }

    /// Group by key. Keys come out in first-occurrence order; each group keeps
    /// source order.
    fn group<K, S>(&self, key: S) -> KeyValueEnumerable<K, Enumerable<T>>
    where
        K: Hash + Eq + Clone + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.group_with(key, |item: &T| item.clone())
    }

    /// Group by key, storing `value(item)` in each group.
    fn group_with<K, V, S, W>(&self, key: S, value: W) -> KeyValueEnumerable<K, Enumerable<V>>
    where
        K: Hash + Eq + Clone + 'static,
        V: Clone + 'static,
        S: Fn(&T) -> K + 'static,
        W: Fn(&T) -> V + 'static,
    {
        let key: KeySelector<T, K> = Rc::new(key);
        let value: KeySelector<T, V> = Rc::new(value);
        let wrap: Rc<dyn Fn(Vec<V>) -> Enumerable<V>> = Rc::new(Enumerable::new);
        let factory: FactoryRef<KeyValuePair<K, Enumerable<V>>> =
            Rc::new(GroupFactory::new(self.factory(), key, value, wrap));
        KeyValueEnumerable::from_factory(factory)
    }

    /// Group, then flatten every `(key, group)` into one result.
    fn group_map<K, V, R, S, W, F>(&self, key: S, value: W, result: F) -> Enumerable<R>
    where
        K: Hash + Eq + Clone + 'static,
        V: Clone + 'static,
        R: Clone + 'static,
        S: Fn(&T) -> K + 'static,
        W: Fn(&T) -> V + 'static,
        F: Fn(K, Enumerable<V>) -> R + 'static,
    {
        self.group_with(key, value)
            .map(move |pair: KeyValuePair<K, Enumerable<V>>| result(pair.key, pair.value))
    }

    /// Inner join. Emits `result(outer, inner)` for every matching pair,
    /// outer-major and inner-minor.
    fn join<I, K, Q, OK, IK, R, F>(
        &self,
        inner: &Q,
        outer_key: OK,
        inner_key: IK,
        result: F,
    ) -> Enumerable<R>
    where
        I: Clone + 'static,
        K: Hash + Eq + Clone + 'static,
        R: Clone + 'static,
        Q: Queryable<I>,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        F: Fn(&T, &I) -> R + 'static,
    {
        let outer_key: KeySelector<T, K> = Rc::new(outer_key);
        let inner_key: KeySelector<I, K> = Rc::new(inner_key);
        let result: ResultSelector<T, I, R> = Rc::new(result);
        Enumerable::from_factory(Rc::new(HashJoinFactory::new(
            self.factory(),
            inner.factory(),
            outer_key,
            inner_key,
            result,
        )))
    }

    /// First occurrence of each element, where two elements are the same when
    /// they render to the same string.
    fn distinct(&self) -> Enumerable<T>
    where
        T: Display,
    {
        Enumerable::from_factory(Rc::new(distinct::distinct(self.factory())))
    }

    fn flatten<U, Q, F>(&self, selector: F) -> Enumerable<U>
    where
        U: Clone + 'static,
        Q: Queryable<U>,
        F: Fn(T) -> Q + 'static,
    {
        let selector: SubSelector<T, U> = Rc::new(move |item: T| selector(item).factory());
        Enumerable::from_factory(Rc::new(flatten::flatten(self.factory(), selector)))
    }

    // ---- terminal consumers ----

    fn cursor(&self) -> BoxCursor<T> {
        self.factory().create()
    }

    fn iter(&self) -> Iter<T> {
        Iter::new(self.cursor())
    }

    /// Visit elements with their index. Returning `ControlFlow::Break`
    /// abandons the rest of the traversal.
    fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(T, usize) -> ControlFlow<()>,
    {
        for (index, item) in self.iter().enumerate() {
            if visit(item, index).is_break() {
                tracing::trace!(index, "for_each stopped early");
                return;
            }
        }
    }

    fn count(&self) -> usize {
        self.iter().count()
    }

    fn fold<A, F>(&self, initial: A, step: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.iter().fold(initial, step)
    }

    fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    fn first(&self) -> Option<T> {
        self.iter().next()
    }

    fn first_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.iter().find(|item| predicate(item))
    }

    fn last(&self) -> Option<T> {
        self.iter().last()
    }

    fn last_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.iter().filter(|item| predicate(item)).last()
    }

    fn is_empty(&self) -> bool {
        !self.cursor().move_next()
    }

    fn any_match<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.iter().any(|item| predicate(&item))
    }

    fn all_match<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.iter().all(|item| predicate(&item))
    }

    fn contains(&self, needle: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| &item == needle)
    }

    fn contains_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.any_match(predicate)
    }

    /// Eager grouping into a keyed lookup of the elements themselves.
    fn to_lookup<K, S>(&self, key: S) -> Lookup<K, T>
    where
        K: Hash + Eq + Clone + 'static,
        S: Fn(&T) -> K,
    {
        self.to_lookup_with(key, |item: &T| item.clone())
    }

    fn to_lookup_with<K, V, S, W>(&self, key: S, value: W) -> Lookup<K, V>
    where
        K: Hash + Eq + Clone + 'static,
        V: Clone + 'static,
        S: Fn(&T) -> K,
        W: Fn(&T) -> V,
    {
        Lookup::from_table(to_lookup_table(self.factory().as_ref(), &key, &value))
    }

    /// Unique-key projection. Fails with `DuplicateKey` on the first key seen
    /// twice; nothing is returned in that case.
    fn to_key_value<K, V, S, W>(&self, key: S, value: W) -> Result<KeyValueEnumerable<K, V>>
    where
        K: Hash + Eq + Clone + Debug + 'static,
        V: Clone + 'static,
        S: Fn(&T) -> K,
        W: Fn(&T) -> V,
    {
        let pairs = unique_pairs(self.cursor().as_mut(), &key, &value)?;
        Ok(KeyValueEnumerable::from_pairs(pairs))
    }
}
