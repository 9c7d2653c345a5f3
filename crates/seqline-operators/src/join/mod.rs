//! Join operators.

pub mod hash;

pub use hash::HashJoinFactory;
