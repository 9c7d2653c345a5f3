//! Synthetic sources built on the callback factory: range, repeat, zip.

use crate::callback::{CallbackFactory, Pull};
use crate::traits::FactoryRef;

/// `count` consecutive integers starting at `start`, cut short at `i64::MAX`.
pub fn range(start: i64, count: usize) -> CallbackFactory<i64> {
    CallbackFactory::new("range", move || {
        let mut emitted = 0usize;
        let mut next = Some(start);
        let pull: Pull<i64> = Box::new(move || {
            if emitted >= count {
                return None;
            }
            // Ends early at i64::MAX rather than wrapping.
            let value = next?;
            emitted += 1;
            next = value.checked_add(1);
            Some(value)
        });
        pull
    })
}

/// `value`, `count` times.
pub fn repeat<T: Clone + 'static>(value: T, count: usize) -> CallbackFactory<T> {
    CallbackFactory::new("repeat", move || {
        let value = value.clone();
        let mut emitted = 0usize;
        let pull: Pull<T> = Box::new(move || {
            if emitted >= count {
                return None;
            }
            emitted += 1;
            Some(value.clone())
        });
        pull
    })
}

/// Pairs elements positionally; stops as soon as either side is exhausted.
pub fn zip<L, R>(left: FactoryRef<L>, right: FactoryRef<R>) -> CallbackFactory<(L, R)>
where
    L: Clone + 'static,
    R: Clone + 'static,
{
    CallbackFactory::new("zip", move || {
        let mut left = left.create();
        let mut right = right.create();
        let pull: Pull<(L, R)> = Box::new(move || {
            if left.move_next() && right.move_next() {
                Some((left.current()?, right.current()?))
            } else {
                None
            }
        });
        pull
    })
}
