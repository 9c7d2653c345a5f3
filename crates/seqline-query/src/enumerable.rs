//! The base facade.

use std::fmt;
use std::rc::Rc;

use seqline_operators::source::SourceFactory;
use seqline_operators::synthetic;
use seqline_operators::{FactoryRef, Sequence};

use crate::iter::Iter;
use crate::queryable::Queryable;

/// Chainable handle around one factory. Cloning shares the factory.
pub struct Enumerable<T> {
    factory: FactoryRef<T>,
}

impl<T> Clone for Enumerable<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Enumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerable")
            .field("operator", &self.factory.name())
            .field("eager", &self.factory.is_eager())
            .finish()
    }
}

impl<T: Clone + 'static> Enumerable<T> {
    /// Owns `items` in a fresh `Sequence`. Use [`Enumerable::from_sequence`] to
    /// keep a handle for later mutation.
    pub fn new(items: Vec<T>) -> Self {
        Self::from_sequence(&Sequence::new(items))
    }

    /// Reads `source` live: elements pushed before a traversal starts are part
    /// of that traversal.
    pub fn from_sequence(source: &Sequence<T>) -> Self {
        Self::from_factory(Rc::new(SourceFactory::new(source.clone())))
    }

    pub fn from_factory(factory: FactoryRef<T>) -> Self {
        Self { factory }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn repeat(value: T, count: usize) -> Self {
        Self::from_factory(Rc::new(synthetic::repeat(value, count)))
    }

    /// Name of the outermost operator.
    pub fn operator_name(&self) -> &'static str {
        self.factory.name()
    }
}

impl Enumerable<i64> {
    pub fn range(start: i64, count: usize) -> Self {
        Self::from_factory(Rc::new(synthetic::range(start, count)))
    }
}

impl<L: Clone + 'static, R: Clone + 'static> Enumerable<(L, R)> {
    /// Positional pairs; as long as the shorter side.
    pub fn zip<A, B>(left: &A, right: &B) -> Self
    where
        A: Queryable<L>,
        B: Queryable<R>,
    {
        Self::from_factory(Rc::new(synthetic::zip(left.factory(), right.factory())))
    }
}

impl<T: Clone + 'static> Queryable<T> for Enumerable<T> {
    fn factory(&self) -> FactoryRef<T> {
        Rc::clone(&self.factory)
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Enumerable<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Clone + 'static> From<&Sequence<T>> for Enumerable<T> {
    fn from(source: &Sequence<T>) -> Self {
        Self::from_sequence(source)
    }
}

impl<T: Clone + 'static> FromIterator<T> for Enumerable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Clone + 'static> IntoIterator for &Enumerable<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}
