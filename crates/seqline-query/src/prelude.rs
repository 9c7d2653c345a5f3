//! Convenient re-exports for facade users.

pub use crate::{Enumerable, KeyValueEnumerable, Lookup, Queryable, SortedEnumerable};
pub use seqline_core::order::Direction;
pub use seqline_core::{Error, ErrorKind, Result};
pub use seqline_operators::{KeyValuePair, Sequence, SkipBy, TakeBy};
pub use std::ops::ControlFlow;
