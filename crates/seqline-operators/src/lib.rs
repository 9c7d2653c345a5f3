#![forbid(unsafe_code)]
//! seqline-operators: the cursor protocol and restartable cursor factories
//! (filter/map/reverse/append/skip/take/sort/group/join/distinct/flatten).
//!
//! Design intent:
//! - A factory is an immutable recipe. `create()` returns a fresh cursor and
//!   factories never hold traversal state, so any number of cursors over the
//!   same factory can be advanced in any interleaving, nested included.
//! - Pure and synchronous; `Rc` rather than `Arc`.
//! - Eager operators (reverse, sort, group, join's lookup) buffer per cursor,
//!   on the first `move_next`, never at construction.

pub mod traits;

pub mod append;
pub mod callback;
pub mod distinct;
pub mod filter;
pub mod flatten;
pub mod group;
pub mod join;
pub mod keyvalue;
pub mod map;
pub mod reverse;
pub mod skip;
pub mod sort;
pub mod source;
pub mod synthetic;
pub mod take;

pub use keyvalue::KeyValuePair;
pub use skip::SkipBy;
pub use source::Sequence;
pub use take::TakeBy;
pub use traits::{BoxCursor, Cursor, Factory, FactoryRef, KeySelector, Predicate};
