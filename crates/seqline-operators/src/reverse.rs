//! Reverse: eager per cursor. The first `move_next` drains upstream into a
//! buffer; elements are then served last-to-first.

use crate::traits::{drain, BoxCursor, Cursor, Factory, FactoryRef};

pub struct ReverseFactory<T> {
    upstream: FactoryRef<T>,
}

impl<T> ReverseFactory<T> {
    pub fn new(upstream: FactoryRef<T>) -> Self {
        Self { upstream }
    }
}

impl<T: Clone + 'static> Factory<T> for ReverseFactory<T> {
    fn name(&self) -> &'static str {
        "reverse"
    }

    fn is_eager(&self) -> bool {
        true
    }

    fn create(&self) -> BoxCursor<T> {
        Box::new(ReverseCursor {
            upstream: self.upstream.create(),
            stack: None,
            current: None,
        })
    }
}

struct ReverseCursor<T> {
    upstream: BoxCursor<T>,
    stack: Option<Vec<T>>,
    current: Option<T>,
}

impl<T: Clone> Cursor<T> for ReverseCursor<T> {
    fn move_next(&mut self) -> bool {
        let upstream = &mut self.upstream;
        let stack = self.stack.get_or_insert_with(|| {
            let items = drain(upstream.as_mut());
            tracing::trace!(buffered = items.len(), "reverse materialized");
            items
        });
        self.current = stack.pop();
        self.current.is_some()
    }

    fn current(&self) -> Option<T> {
        self.current.clone()
    }
}
