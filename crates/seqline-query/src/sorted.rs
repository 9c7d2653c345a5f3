//! Sorted facade.
//!
//! Keeps the unsorted upstream and the comparer that ordered it. `subsort`
//! composes a tie-break onto that comparer and sorts the upstream again in a
//! single stable pass, so the result is exactly the multi-key order.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use seqline_core::order::{key_comparer, natural_order, then_by, Comparer, Direction};
use seqline_operators::sort::SortFactory;
use seqline_operators::FactoryRef;

use crate::queryable::Queryable;

pub struct SortedEnumerable<T> {
    upstream: FactoryRef<T>,
    comparer: Comparer<T>,
    sorted: FactoryRef<T>,
}

impl<T> Clone for SortedEnumerable<T> {
    fn clone(&self) -> Self {
        Self {
            upstream: Rc::clone(&self.upstream),
            comparer: Rc::clone(&self.comparer),
            sorted: Rc::clone(&self.sorted),
        }
    }
}

impl<T> fmt::Debug for SortedEnumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedEnumerable")
            .field("upstream", &self.upstream.name())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> SortedEnumerable<T> {
    pub(crate) fn new(upstream: FactoryRef<T>, comparer: Comparer<T>) -> Self {
        let sorted: FactoryRef<T> = Rc::new(SortFactory::new(
            Rc::clone(&upstream),
            Rc::clone(&comparer),
        ));
        Self {
            upstream,
            comparer,
            sorted,
        }
    }

    /// The comparer that produced the current order.
    pub fn comparer(&self) -> Comparer<T> {
        Rc::clone(&self.comparer)
    }

    /// Break ties of the current order by `key`.
    pub fn subsort<K, S>(&self, key: S, direction: Direction) -> Self
    where
        K: PartialOrd + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.subsort_with(key, direction, natural_order::<K>)
    }

    pub fn subsort_with<K, S, C>(&self, key: S, direction: Direction, compare: C) -> Self
    where
        K: 'static,
        S: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        self.subsort_using(key_comparer(key, direction, compare))
    }

    pub fn subsort_using(&self, tie_break: Comparer<T>) -> Self {
        Self::new(
            Rc::clone(&self.upstream),
            then_by(Rc::clone(&self.comparer), tie_break),
        )
    }
}

impl<T: Clone + 'static> Queryable<T> for SortedEnumerable<T> {
    fn factory(&self) -> FactoryRef<T> {
        Rc::clone(&self.sorted)
    }
}
