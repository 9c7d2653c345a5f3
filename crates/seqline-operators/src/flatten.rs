//! Flatten: concatenates the sub-sequences selected from each outer element,
//! outer-major, inner in order.

use std::rc::Rc;

use crate::callback::{CallbackFactory, Pull};
use crate::traits::{BoxCursor, FactoryRef};

pub type SubSelector<T, U> = Rc<dyn Fn(T) -> FactoryRef<U>>;

pub fn flatten<T, U>(upstream: FactoryRef<T>, selector: SubSelector<T, U>) -> CallbackFactory<U>
where
    T: 'static,
    U: Clone + 'static,
{
    CallbackFactory::new("flatten", move || {
        let mut outer = upstream.create();
        let selector = Rc::clone(&selector);
        let mut inner: Option<BoxCursor<U>> = None;
        let pull: Pull<U> = Box::new(move || loop {
            if let Some(cursor) = inner.as_mut() {
                if cursor.move_next() {
                    return cursor.current();
                }
                inner = None;
            }
            if !outer.move_next() {
                return None;
            }
            let item = outer.current()?;
            inner = Some(selector(item).create());
        });
        pull
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Sequence, SourceFactory};
    use crate::traits::{drain, Factory};

    #[test]
    fn concatenates_in_order() {
        let outer: FactoryRef<Vec<i32>> = Rc::new(SourceFactory::new(Sequence::new(vec![
            vec![1, 2],
            vec![],
            vec![3, 4],
            vec![5],
        ])));
        let flat = flatten(
            outer,
            Rc::new(|v: Vec<i32>| -> FactoryRef<i32> {
                Rc::new(SourceFactory::new(Sequence::new(v)))
            }),
        );
        assert_eq!(drain(flat.create().as_mut()), vec![1, 2, 3, 4, 5]);
    }
}
