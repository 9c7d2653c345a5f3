//! Take: takeWhile semantics.
//!
//! Elements are yielded while the rule holds. The first rejection ends the
//! traversal for good; the rule is never consulted again.

use std::rc::Rc;

use crate::traits::{BoxCursor, Cursor, Factory, FactoryRef, Predicate};

/// How many leading elements to keep.
pub enum TakeBy<T> {
    /// Keep the first `n` elements; counted per cursor.
    Count(usize),
    /// Keep while the predicate holds.
    While(Predicate<T>),
}

impl<T> Clone for TakeBy<T> {
    fn clone(&self) -> Self {
        match self {
            TakeBy::Count(n) => TakeBy::Count(*n),
            TakeBy::While(p) => TakeBy::While(Rc::clone(p)),
        }
    }
}

pub struct TakeFactory<T> {
    upstream: FactoryRef<T>,
    rule: TakeBy<T>,
}

impl<T> TakeFactory<T> {
    pub fn new(upstream: FactoryRef<T>, rule: TakeBy<T>) -> Self {
        Self { upstream, rule }
    }
}

impl<T: 'static> Factory<T> for TakeFactory<T> {
    fn name(&self) -> &'static str {
        "take"
    }

    fn create(&self) -> BoxCursor<T> {
        Box::new(TakeCursor {
            upstream: self.upstream.create(),
            rule: self.rule.clone(),
            done: false,
        })
    }
}

struct TakeCursor<T> {
    upstream: BoxCursor<T>,
    rule: TakeBy<T>,
    done: bool,
}

impl<T> Cursor<T> for TakeCursor<T> {
    fn move_next(&mut self) -> bool {
        if self.done {
            return false;
        }

        // A spent count stops before pulling, so unbounded upstreams are not over-read.
        if let TakeBy::Count(0) = self.rule {
            self.done = true;
            return false;
        }

        if self.upstream.move_next() {
            let keep = match &mut self.rule {
                TakeBy::Count(remaining) => {
                    *remaining -= 1;
                    true
                }
                TakeBy::While(predicate) => self
                    .upstream
                    .current()
                    .is_some_and(|item| predicate(&item)),
            };
            if keep {
                return true;
            }
        }

        self.done = true;
        false
    }

    fn current(&self) -> Option<T> {
        if self.done {
            None
        } else {
            self.upstream.current()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Sequence, SourceFactory};
    use crate::traits::drain;

    fn source(items: Vec<i32>) -> FactoryRef<i32> {
        Rc::new(SourceFactory::new(Sequence::new(items)))
    }

    #[test]
    fn take_while_not_filter() {
        let taken = TakeFactory::new(
            source(vec![2, 2, 3, 4, 2, 2]),
            TakeBy::While(Rc::new(|v: &i32| *v == 2)),
        );
        assert_eq!(drain(taken.create().as_mut()), vec![2, 2]);
    }

    #[test]
    fn count_edges() {
        let run = |n| {
            drain(
                TakeFactory::new(source(vec![1, 2, 3, 4, 5]), TakeBy::Count(n))
                    .create()
                    .as_mut(),
            )
        };
        assert_eq!(run(2), vec![1, 2]);
        assert!(run(0).is_empty());
        assert_eq!(run(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(run(9), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn predicate_not_consulted_after_first_false() {
        let calls = Rc::new(std::cell::Cell::new(0));
        let counter = Rc::clone(&calls);
        let taken = TakeFactory::new(
            source(vec![1, 5, 1, 1]),
            TakeBy::While(Rc::new(move |v: &i32| {
                counter.set(counter.get() + 1);
                *v < 3
            })),
        );
        let mut cursor = taken.create();
        assert!(cursor.move_next());
        assert!(!cursor.move_next());
        assert!(!cursor.move_next());
        assert_eq!(calls.get(), 2);
        assert_eq!(cursor.current(), None);
    }
}
