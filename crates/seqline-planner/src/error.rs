use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("pipeline has no steps")]
    Empty,

    #[error("step {index} ({op}): {reason}")]
    InvalidStep {
        index: usize,
        op: &'static str,
        reason: String,
    },

    #[error("unparseable predicate: {0}")]
    Expr(String),

    #[error(transparent)]
    Core(#[from] seqline_core::Error),
}
