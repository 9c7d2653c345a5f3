//! Sort: eager per cursor, stable.
//!
//! On the first `move_next` a cursor buffers every upstream element and
//! insertion-sorts the buffer with the factory's comparer. Stability is what
//! makes subsort correct: a composite comparer applied in one stable pass
//! yields exactly the multi-key order.

mod insertion;

use std::rc::Rc;

use seqline_core::order::Comparer;

use crate::traits::{drain, BoxCursor, BufferCursor, Cursor, Factory, FactoryRef};

pub use insertion::insertion_sort;

pub struct SortFactory<T> {
    upstream: FactoryRef<T>,
    comparer: Comparer<T>,
}

impl<T> SortFactory<T> {
    pub fn new(upstream: FactoryRef<T>, comparer: Comparer<T>) -> Self {
        Self { upstream, comparer }
    }

    pub fn comparer(&self) -> Comparer<T> {
        Rc::clone(&self.comparer)
    }
}

impl<T: Clone + 'static> Factory<T> for SortFactory<T> {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn is_eager(&self) -> bool {
        true
    }

    fn create(&self) -> BoxCursor<T> {
        Box::new(SortCursor {
            upstream: self.upstream.create(),
            comparer: Rc::clone(&self.comparer),
            sorted: None,
        })
    }
}

struct SortCursor<T> {
    upstream: BoxCursor<T>,
    comparer: Comparer<T>,
    sorted: Option<BufferCursor<T>>,
}

impl<T: Clone> Cursor<T> for SortCursor<T> {
    fn move_next(&mut self) -> bool {
        let upstream = &mut self.upstream;
        let comparer = &self.comparer;
        self.sorted
            .get_or_insert_with(|| {
                let mut items = drain(upstream.as_mut());
                insertion_sort(&mut items, comparer.as_ref());
                tracing::trace!(buffered = items.len(), "sort materialized");
                BufferCursor::new(items)
            })
            .move_next()
    }

    fn current(&self) -> Option<T> {
        self.sorted.as_ref().and_then(|s| s.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Sequence, SourceFactory};
    use seqline_core::order::{key_comparer, natural_order, then_by, Direction};

    #[test]
    fn ascending_and_descending() {
        let seq = Sequence::new(vec![3, 1, 2]);
        let source: FactoryRef<i32> = Rc::new(SourceFactory::new(seq));

        let asc = SortFactory::new(
            Rc::clone(&source),
            key_comparer(|v: &i32| *v, Direction::Ascending, natural_order),
        );
        let desc = SortFactory::new(
            source,
            key_comparer(|v: &i32| *v, Direction::Descending, natural_order),
        );
        assert_eq!(drain(asc.create().as_mut()), vec![1, 2, 3]);
        assert_eq!(drain(desc.create().as_mut()), vec![3, 2, 1]);
    }

    #[test]
    fn composite_comparer_single_pass() {
        let points = vec![(5, 3), (5, 2), (3, 2), (3, 1), (5, 1)];
        let source: FactoryRef<(i32, i32)> = Rc::new(SourceFactory::new(Sequence::new(points)));
        let by_x = key_comparer(|p: &(i32, i32)| p.0, Direction::Ascending, natural_order);
        let by_y = key_comparer(|p: &(i32, i32)| p.1, Direction::Ascending, natural_order);
        let sorted = SortFactory::new(source, then_by(by_x, by_y));

        assert_eq!(
            drain(sorted.create().as_mut()),
            vec![(3, 1), (3, 2), (5, 1), (5, 2), (5, 3)]
        );
    }

    #[test]
    fn buffers_only_when_driven() {
        let seq = Sequence::new(vec![2, 1]);
        let sorted = SortFactory::new(
            Rc::new(SourceFactory::new(seq.clone())),
            key_comparer(|v: &i32| *v, Direction::Ascending, natural_order),
        );
        let mut cursor = sorted.create();
        seq.push(0);
        assert_eq!(cursor.current(), None);
        // Length snapshot was taken at create(), before the push.
        assert_eq!(drain(cursor.as_mut()), vec![1, 2]);
        assert_eq!(drain(sorted.create().as_mut()), vec![0, 1, 2]);
    }
}
