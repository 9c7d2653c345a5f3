//! Convenient re-exports for downstream crates.

pub use crate::config::EngineConfig;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::order::{key_comparer, natural_order, then_by, Comparer, Direction};
