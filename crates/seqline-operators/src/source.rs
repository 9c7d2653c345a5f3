//! Base factory over a caller-owned ordered collection.
//!
//! `Sequence<T>` is a shared handle: the caller keeps one clone and may keep
//! pushing into it after building a pipeline. Each cursor fixes its traversal
//! length when it is created, so mutations made before a traversal starts are
//! visible to it.

use std::cell::RefCell;
use std::rc::Rc;

use seqline_core::value::type_name;
use seqline_core::{Error, Result};
use serde_json::Value;

use crate::traits::{BoxCursor, Cursor, Factory};

/// Shared, mutable backing collection.
pub struct Sequence<T> {
    items: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.borrow().iter()).finish()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> Sequence<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn push(&self, item: T) {
        self.items.borrow_mut().push(item);
    }

    pub fn extend(&self, items: impl IntoIterator<Item = T>) {
        self.items.borrow_mut().extend(items);
    }

    /// Run `f` with mutable access to the backing vector.
    ///
    /// Must not be called from inside a cursor read of the same sequence.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        f(&mut self.items.borrow_mut())
    }
}

impl<T: Clone> Sequence<T> {
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().get(index).cloned()
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items.borrow().clone()
    }
}

impl Sequence<Value> {
    /// Build from a JSON document, which must be an array.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::new(items)),
            other => {
                tracing::debug!(found = type_name(&other), "rejected non-array source");
                Err(Error::type_mismatch("array", type_name(&other)))
            }
        }
    }
}

pub struct SourceFactory<T> {
    source: Sequence<T>,
}

impl<T> SourceFactory<T> {
    pub fn new(source: Sequence<T>) -> Self {
        Self { source }
    }

    pub fn sequence(&self) -> &Sequence<T> {
        &self.source
    }
}

impl<T: Clone + 'static> Factory<T> for SourceFactory<T> {
    fn name(&self) -> &'static str {
        "source"
    }

    fn create(&self) -> BoxCursor<T> {
        Box::new(SourceCursor {
            source: self.source.clone(),
            len: self.source.len(),
            next: 0,
            position: None,
        })
    }
}

struct SourceCursor<T> {
    source: Sequence<T>,
    /// Snapshot of the length at `create()`.
    len: usize,
    next: usize,
    position: Option<usize>,
}

impl<T: Clone> Cursor<T> for SourceCursor<T> {
    fn move_next(&mut self) -> bool {
        if self.next < self.len {
            self.position = Some(self.next);
            self.next += 1;
            true
        } else {
            self.next = self.len;
            self.position = None;
            false
        }
    }

    fn current(&self) -> Option<T> {
        // A caller may shrink the sequence mid-traversal; reads past the end are None.
        self.position.and_then(|i| self.source.get(i))
    }
}
