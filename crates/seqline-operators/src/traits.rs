//! Cursor protocol + factory trait.
//!
//! A consumer drives a cursor with `move_next()` and reads the element with
//! `current()`. Only terminal consumers in `seqline-query` create cursors;
//! operator calls only stack factories.

use std::rc::Rc;

/// One in-progress traversal.
///
/// Invariants:
/// - Once `move_next` returns false it returns false on every later call.
/// - `current` returns `Some` only right after a `move_next` that returned
///   true. Before the first move, or once exhausted, it returns `None`; it never
///   panics.
pub trait Cursor<T> {
    fn move_next(&mut self) -> bool;

    fn current(&self) -> Option<T>;
}

pub type BoxCursor<T> = Box<dyn Cursor<T>>;

/// Cold, restartable recipe for cursors.
pub trait Factory<T> {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// True when a cursor buffers its whole upstream before yielding.
    fn is_eager(&self) -> bool {
        false
    }

    /// Start an independent traversal.
    fn create(&self) -> BoxCursor<T>;
}

pub type FactoryRef<T> = Rc<dyn Factory<T>>;

pub type Predicate<T> = Rc<dyn Fn(&T) -> bool>;

pub type KeySelector<T, K> = Rc<dyn Fn(&T) -> K>;

/// Cursor over an owned buffer. Eager operators hand their materialized
/// output to one of these.
pub struct BufferCursor<T> {
    items: std::vec::IntoIter<T>,
    current: Option<T>,
    done: bool,
}

impl<T> BufferCursor<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
            current: None,
            done: false,
        }
    }
}

impl<T: Clone> Cursor<T> for BufferCursor<T> {
    fn move_next(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.current = self.items.next();
        if self.current.is_none() {
            self.done = true;
        }
        !self.done
    }

    fn current(&self) -> Option<T> {
        self.current.clone()
    }
}

/// Drain a cursor into a vector.
pub fn drain<T>(cursor: &mut dyn Cursor<T>) -> Vec<T> {
    let mut out = Vec::new();
    while cursor.move_next() {
        if let Some(item) = cursor.current() {
            out.push(item);
        }
    }
    out
}
