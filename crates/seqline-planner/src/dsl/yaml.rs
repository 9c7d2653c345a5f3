//! YAML → pipeline parser for *linear* pipelines over JSON elements.
//!
//! Example:
//! ```yaml
//! config: { direction: asc }
//! steps:
//!   - op: filter
//!     expr: "age >= 18"
//!   - op: sort
//!     by: team
//!     then_by: [ { by: age, direction: desc }, name ]
//!   - op: take
//!     count: 10
//!   - op: map
//!     field: name
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use seqline_core::order::Direction;

use crate::error::PlanError;
use crate::lower::{lower, ParsedPipeline};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub config: Option<PipelineConfig>,
    pub steps: Vec<Step>,
}

/// Per-pipeline overrides of `EngineConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Direction for sort keys that do not name one.
    pub direction: Option<Direction>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Step {
    /// Keep elements matching `field OP literal`.
    Filter { expr: String },

    /// Project one field (dotted path).
    Map { field: String },

    Sort {
        by: String,
        #[serde(default)]
        direction: Option<Direction>,
        #[serde(default)]
        then_by: Vec<SortKey>,
    },

    /// Exactly one of `count` / `while`.
    Skip {
        #[serde(default)]
        count: Option<usize>,
        #[serde(default, rename = "while")]
        while_expr: Option<String>,
    },

    Take {
        #[serde(default)]
        count: Option<usize>,
        #[serde(default, rename = "while")]
        while_expr: Option<String>,
    },

    Reverse,

    Distinct,

    /// Splice the array at `field` (or the element itself) into the output.
    Flatten {
        #[serde(default)]
        field: Option<String>,
    },

    /// Yields `{"key": k, "values": [...]}` per group.
    Group { by: String },

    /// Inner join against inline values; yields `{"outer": o, "inner": i}`.
    Join {
        with: Vec<Value>,
        outer_key: String,
        inner_key: String,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Filter { .. } => "filter",
            Step::Map { .. } => "map",
            Step::Sort { .. } => "sort",
            Step::Skip { .. } => "skip",
            Step::Take { .. } => "take",
            Step::Reverse => "reverse",
            Step::Distinct => "distinct",
            Step::Flatten { .. } => "flatten",
            Step::Group { .. } => "group",
            Step::Join { .. } => "join",
        }
    }
}

/// A subsort key: either a bare field name or `{ by, direction }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortKey {
    Field(String),
    Keyed {
        by: String,
        #[serde(default)]
        direction: Option<Direction>,
    },
}

impl SortKey {
    pub fn field(&self) -> &str {
        match self {
            SortKey::Field(by) | SortKey::Keyed { by, .. } => by,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            SortKey::Field(_) => None,
            SortKey::Keyed { direction, .. } => *direction,
        }
    }
}

/// Parse and validate a YAML pipeline.
pub fn parse_yaml_pipeline(yaml_src: &str) -> Result<ParsedPipeline, PlanError> {
    let doc: Pipeline = serde_yaml::from_str(yaml_src)?;
    lower(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_tagged_by_op() {
        let doc: Pipeline = serde_yaml::from_str(
            r#"
steps:
  - op: filter
    expr: "age > 18"
  - op: sort
    by: x
    direction: desc
    then_by: [y, { by: z, direction: asc }]
  - op: skip
    while: "x < 3"
  - op: reverse
  - op: join
    with: [{ id: 1 }]
    outer_key: id
    inner_key: id
"#,
        )
        .unwrap();

        let names: Vec<&str> = doc.steps.iter().map(Step::name).collect();
        assert_eq!(names, vec!["filter", "sort", "skip", "reverse", "join"]);
        match &doc.steps[1] {
            Step::Sort {
                by,
                direction,
                then_by,
            } => {
                assert_eq!(by, "x");
                assert_eq!(*direction, Some(Direction::Descending));
                assert_eq!(then_by[0], SortKey::Field("y".into()));
                assert_eq!(then_by[1].field(), "z");
                assert_eq!(then_by[1].direction(), Some(Direction::Ascending));
            }
            other => panic!("expected sort, got {:?}", other),
        }
        match &doc.steps[2] {
            Step::Skip { count, while_expr } => {
                assert_eq!(*count, None);
                assert_eq!(while_expr.as_deref(), Some("x < 3"));
            }
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[test]
    fn config_block_is_optional() {
        let doc: Pipeline = serde_yaml::from_str("steps: [ { op: distinct } ]").unwrap();
        assert!(doc.config.is_none());

        let doc: Pipeline =
            serde_yaml::from_str("config: { direction: desc }\nsteps: [ { op: distinct } ]").unwrap();
        assert_eq!(
            doc.config.unwrap().direction,
            Some(Direction::Descending)
        );
    }

    #[test]
    fn unknown_op_is_a_yaml_error() {
        let err = parse_yaml_pipeline("steps: [ { op: explode } ]").unwrap_err();
        assert!(matches!(err, PlanError::Yaml(_)));
    }
}
