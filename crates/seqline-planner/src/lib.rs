#![forbid(unsafe_code)]
//! seqline-planner: YAML pipelines over JSON values.
//!
//! A pipeline document is parsed (`dsl::yaml`), validated and lowered into a
//! list of `Stage`s (`lower`), then applied to an `Enumerable<Value>`. Lowering
//! resolves everything that can fail (predicate syntax, skip/take shape), so
//! applying a `ParsedPipeline` cannot fail.

pub mod dsl;
pub mod error;
pub mod expr;
pub mod lower;

pub use dsl::yaml::{parse_yaml_pipeline, Pipeline, PipelineConfig, SortKey, Step};
pub use error::PlanError;
pub use expr::{CmpOp, Comparison};
pub use lower::{ParsedPipeline, Stage};
