//! Skip: dropWhile semantics.
//!
//! While the rule holds, upstream elements are pulled and discarded. The first
//! element the rule rejects is yielded, and every element after it is yielded
//! unconditionally, even if the rule would hold again.

use std::rc::Rc;

use crate::traits::{BoxCursor, Cursor, Factory, FactoryRef, Predicate};

/// How many leading elements to drop.
pub enum SkipBy<T> {
    /// Drop exactly the first `n` elements. The counter lives in the cursor,
    /// so every traversal starts from zero.
    Count(usize),
    /// Drop while the predicate holds.
    While(Predicate<T>),
}

impl<T> Clone for SkipBy<T> {
    fn clone(&self) -> Self {
        match self {
            SkipBy::Count(n) => SkipBy::Count(*n),
            SkipBy::While(p) => SkipBy::While(Rc::clone(p)),
        }
    }
}

pub struct SkipFactory<T> {
    upstream: FactoryRef<T>,
    rule: SkipBy<T>,
}

impl<T> SkipFactory<T> {
    pub fn new(upstream: FactoryRef<T>, rule: SkipBy<T>) -> Self {
        Self { upstream, rule }
    }
}

impl<T: 'static> Factory<T> for SkipFactory<T> {
    fn name(&self) -> &'static str {
        "skip"
    }

    fn create(&self) -> BoxCursor<T> {
        Box::new(SkipCursor {
            upstream: self.upstream.create(),
            rule: self.rule.clone(),
            dropping: true,
        })
    }
}

struct SkipCursor<T> {
    upstream: BoxCursor<T>,
    rule: SkipBy<T>,
    dropping: bool,
}

impl<T> SkipCursor<T> {
    fn should_drop(&mut self) -> bool {
        match &mut self.rule {
            SkipBy::Count(remaining) => {
                if *remaining > 0 {
                    *remaining -= 1;
                    true
                } else {
                    false
                }
            }
            SkipBy::While(predicate) => self
                .upstream
                .current()
                .is_some_and(|item| predicate(&item)),
        }
    }
}

impl<T> Cursor<T> for SkipCursor<T> {
    fn move_next(&mut self) -> bool {
        if self.dropping {
            self.dropping = false;
            while self.upstream.move_next() {
                if !self.should_drop() {
                    return true;
                }
            }
            return false;
        }
        self.upstream.move_next()
    }

    fn current(&self) -> Option<T> {
        self.upstream.current()
    }
}
