//! Callback factory: cursors driven by a pull function.
//!
//! `init` runs once per `create()` and returns a fresh pull closure, so all
//! per-traversal state lives in that closure. A pull returns `Some(next)` or
//! `None` for done; the cursor never calls it again after the first `None`.

use std::rc::Rc;

use crate::traits::{BoxCursor, Cursor, Factory};

pub type Pull<T> = Box<dyn FnMut() -> Option<T>>;

pub struct CallbackFactory<T> {
    name: &'static str,
    init: Rc<dyn Fn() -> Pull<T>>,
}

impl<T> CallbackFactory<T> {
    pub fn new(name: &'static str, init: impl Fn() -> Pull<T> + 'static) -> Self {
        Self {
            name,
            init: Rc::new(init),
        }
    }
}

impl<T: Clone + 'static> Factory<T> for CallbackFactory<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn create(&self) -> BoxCursor<T> {
        Box::new(CallbackCursor {
            pull: (self.init)(),
            current: None,
            done: false,
        })
    }
}

struct CallbackCursor<T> {
    pull: Pull<T>,
    current: Option<T>,
    done: bool,
}

impl<T: Clone> Cursor<T> for CallbackCursor<T> {
    fn move_next(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.current = (self.pull)();
        self.done = self.current.is_none();
        !self.done
    }

    fn current(&self) -> Option<T> {
        self.current.clone()
    }
}
