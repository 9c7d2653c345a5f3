#![forbid(unsafe_code)]
//! seqline-core: error taxonomy, ordering primitives, JSON value helpers, and
//! engine configuration shared by every seqline crate.
//!
//! Design intent:
//! - No cursors or factories live here; `seqline-operators` owns the protocol.
//! - Everything is single-threaded and synchronous. Comparers are `Rc`-backed.

pub mod config;
pub mod error;
pub mod order;
pub mod prelude;
pub mod value;

pub use error::{Error, ErrorKind, Result};
