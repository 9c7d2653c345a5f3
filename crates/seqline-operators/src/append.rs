//! Append: exhausts the left factory, then the right one.

use crate::traits::{BoxCursor, Cursor, Factory, FactoryRef};

pub struct AppendFactory<T> {
    left: FactoryRef<T>,
    right: FactoryRef<T>,
}

impl<T> AppendFactory<T> {
    pub fn new(left: FactoryRef<T>, right: FactoryRef<T>) -> Self {
        Self { left, right }
    }
}

impl<T: 'static> Factory<T> for AppendFactory<T> {
    fn name(&self) -> &'static str {
        "append"
    }

    fn create(&self) -> BoxCursor<T> {
        Box::new(AppendCursor {
            left: self.left.create(),
            right: self.right.create(),
            on_left: true,
        })
    }
}

struct AppendCursor<T> {
    left: BoxCursor<T>,
    right: BoxCursor<T>,
    on_left: bool,
}

impl<T> Cursor<T> for AppendCursor<T> {
    fn move_next(&mut self) -> bool {
        if self.on_left {
            if self.left.move_next() {
                return true;
            }
            self.on_left = false;
        }
        self.right.move_next()
    }

    fn current(&self) -> Option<T> {
        if self.on_left {
            self.left.current()
        } else {
            self.right.current()
        }
    }
}
