#![forbid(unsafe_code)]
//! seqline-query: the chainable facades.
//!
//! `Enumerable<T>` is the base handle. `SortedEnumerable<T>` additionally
//! carries the comparer that produced its order so `subsort` can extend it,
//! and `KeyValueEnumerable<K, V>` is a sequence of `KeyValuePair`s with
//! object-style export. All three implement [`Queryable`], which supplies the
//! operators and terminal consumers.
//!
//! Operator calls only stack factories. Terminal consumers create a cursor
//! and drive it; nothing is read from a source before that.

pub mod enumerable;
pub mod iter;
pub mod json;
pub mod keyed;
pub mod lookup;
pub mod prelude;
pub mod queryable;
pub mod sorted;

pub use enumerable::Enumerable;
pub use iter::Iter;
pub use keyed::KeyValueEnumerable;
pub use lookup::Lookup;
pub use queryable::Queryable;
pub use sorted::SortedEnumerable;
