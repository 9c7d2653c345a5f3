//! Filter: yields only the upstream elements the predicate accepts.

use std::rc::Rc;

use crate::traits::{BoxCursor, Cursor, Factory, FactoryRef, Predicate};

pub struct FilterFactory<T> {
    upstream: FactoryRef<T>,
    predicate: Predicate<T>,
}

impl<T> FilterFactory<T> {
    pub fn new(upstream: FactoryRef<T>, predicate: Predicate<T>) -> Self {
        Self {
            upstream,
            predicate,
        }
    }
}

impl<T: 'static> Factory<T> for FilterFactory<T> {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn create(&self) -> BoxCursor<T> {
        Box::new(FilterCursor {
            upstream: self.upstream.create(),
            predicate: Rc::clone(&self.predicate),
        })
    }
}

struct FilterCursor<T> {
    upstream: BoxCursor<T>,
    predicate: Predicate<T>,
}

impl<T> Cursor<T> for FilterCursor<T> {
    fn move_next(&mut self) -> bool {
        while self.upstream.move_next() {
            if let Some(item) = self.upstream.current() {
                if (self.predicate)(&item) {
                    return true;
                }
            }
        }
        false
    }

    fn current(&self) -> Option<T> {
        self.upstream.current()
    }
}
