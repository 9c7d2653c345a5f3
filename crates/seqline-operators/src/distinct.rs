//! Distinct: first occurrence wins, emitted in first-occurrence order.
//!
//! Equality policy: two elements are the same when their `Display` renderings
//! are equal. Values that differ structurally but render identically collapse
//! into one; this matches string-keyed lookups elsewhere in the engine.

use std::collections::HashSet;
use std::fmt::Display;

use crate::callback::{CallbackFactory, Pull};
use crate::traits::FactoryRef;

pub fn distinct<T>(upstream: FactoryRef<T>) -> CallbackFactory<T>
where
    T: Display + Clone + 'static,
{
    CallbackFactory::new("distinct", move || {
        let mut cursor = upstream.create();
        let mut seen: HashSet<String> = HashSet::new();
        let pull: Pull<T> = Box::new(move || {
            while cursor.move_next() {
                if let Some(item) = cursor.current() {
                    if seen.insert(item.to_string()) {
                        return Some(item);
                    }
                }
            }
            None
        });
        pull
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Sequence, SourceFactory};
    use crate::traits::{drain, Factory};
    use serde_json::{json, Value};
    use std::rc::Rc;

    #[test]
    fn keeps_first_occurrence_order() {
        let source: FactoryRef<i32> =
            Rc::new(SourceFactory::new(Sequence::new(vec![3, 1, 3, 2, 1, 4])));
        assert_eq!(drain(distinct(source).create().as_mut()), vec![3, 1, 2, 4]);
    }

    #[test]
    fn equality_is_by_rendering() {
        // 1.0 and 1 render differently as JSON, so both survive; equal objects collapse.
        let source: FactoryRef<Value> = Rc::new(SourceFactory::new(Sequence::new(vec![
            json!({"a": 1}),
            json!({"a": 1}),
            json!(1),
            json!(1.0),
        ])));
        assert_eq!(
            drain(distinct(source).create().as_mut()),
            vec![json!({"a": 1}), json!(1), json!(1.0)]
        );
    }
}
