//! Map: 1:1 projection.
//!
//! `current()` applies the selector to the upstream element on every call.
//! Results are not memoized, so a selector with side effects runs once per
//! read, not once per element.

use std::marker::PhantomData;
use std::rc::Rc;

use crate::traits::{BoxCursor, Cursor, Factory, FactoryRef};

pub type Selector<T, U> = Rc<dyn Fn(T) -> U>;

pub struct MapFactory<T, U> {
    upstream: FactoryRef<T>,
    selector: Selector<T, U>,
}

impl<T, U> MapFactory<T, U> {
    pub fn new(upstream: FactoryRef<T>, selector: Selector<T, U>) -> Self {
        Self { upstream, selector }
    }
}

impl<T: 'static, U: 'static> Factory<U> for MapFactory<T, U> {
    fn name(&self) -> &'static str {
        "map"
    }

    fn create(&self) -> BoxCursor<U> {
        Box::new(MapCursor {
            upstream: self.upstream.create(),
            selector: Rc::clone(&self.selector),
            _out: PhantomData,
        })
    }
}

struct MapCursor<T, U> {
    upstream: BoxCursor<T>,
    selector: Selector<T, U>,
    _out: PhantomData<U>,
}

impl<T, U> Cursor<U> for MapCursor<T, U> {
    fn move_next(&mut self) -> bool {
        self.upstream.move_next()
    }

    fn current(&self) -> Option<U> {
        self.upstream.current().map(|item| (self.selector)(item))
    }
}
