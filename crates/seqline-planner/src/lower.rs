//! Validate a `Pipeline` into `Stage`s and apply them to JSON sequences.

use serde_json::{Map, Value};

use seqline_core::order::Direction;
use seqline_core::value::{field, key_string};
use seqline_query::{Enumerable, Queryable};

use crate::dsl::yaml::{Pipeline, PipelineConfig, Step};
use crate::error::PlanError;
use crate::expr::Comparison;

/// How many leading elements a skip/take stage covers.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Count(usize),
    While(Comparison),
}

/// One validated step.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Filter(Comparison),
    Map {
        field: String,
    },
    /// Primary key first; later keys break ties. `None` directions resolve to
    /// the pipeline default when applied.
    Sort {
        keys: Vec<(String, Option<Direction>)>,
    },
    Skip(Bound),
    Take(Bound),
    Reverse,
    Distinct,
    Flatten {
        field: Option<String>,
    },
    Group {
        by: String,
    },
    Join {
        with: Vec<Value>,
        outer_key: String,
        inner_key: String,
    },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Filter(_) => "filter",
            Stage::Map { .. } => "map",
            Stage::Sort { .. } => "sort",
            Stage::Skip(_) => "skip",
            Stage::Take(_) => "take",
            Stage::Reverse => "reverse",
            Stage::Distinct => "distinct",
            Stage::Flatten { .. } => "flatten",
            Stage::Group { .. } => "group",
            Stage::Join { .. } => "join",
        }
    }

    /// True when a traversal buffers the whole upstream before its first
    /// element.
    pub fn is_eager(&self) -> bool {
        matches!(
            self,
            Stage::Sort { .. } | Stage::Reverse | Stage::Group { .. } | Stage::Join { .. }
        )
    }

    /// One-line human description, used by `seqline explain`.
    pub fn describe(&self) -> String {
        match self {
            Stage::Filter(cmp) => format!("filter {}", cmp),
            Stage::Map { field } => format!("map {}", field),
            Stage::Sort { keys } => {
                let keys: Vec<String> = keys
                    .iter()
                    .map(|(by, dir)| match dir {
                        Some(d) => format!("{} {}", by, d),
                        None => by.clone(),
                    })
                    .collect();
                format!("sort {}", keys.join(", "))
            }
            Stage::Skip(bound) | Stage::Take(bound) => match bound {
                Bound::Count(n) => format!("{} {}", self.name(), n),
                Bound::While(cmp) => format!("{} while {}", self.name(), cmp),
            },
            Stage::Reverse | Stage::Distinct => self.name().to_string(),
            Stage::Flatten { field } => match field {
                Some(f) => format!("flatten {}", f),
                None => "flatten".to_string(),
            },
            Stage::Group { by } => format!("group by {}", by),
            Stage::Join {
                with,
                outer_key,
                inner_key,
            } => format!(
                "join {} inline rows on {} = {}",
                with.len(),
                outer_key,
                inner_key
            ),
        }
    }

    fn apply(&self, input: Enumerable<Value>, default_direction: Direction) -> Enumerable<Value> {
        match self {
            Stage::Filter(cmp) => {
                let cmp = cmp.clone();
                input.filter(move |item| cmp.eval(item))
            }
            Stage::Map { field } => input.select_field(field),
            Stage::Sort { keys } => {
                let mut keys = keys.iter();
                let Some((by, dir)) = keys.next() else {
                    return input;
                };
                let mut sorted = input.sort_by_field(by, dir.unwrap_or(default_direction));
                for (by, dir) in keys {
                    sorted = sorted.subsort_by_field(by, dir.unwrap_or(default_direction));
                }
                sorted.to_enumerable()
            }
            Stage::Skip(Bound::Count(n)) => input.skip(*n),
            Stage::Skip(Bound::While(cmp)) => {
                let cmp = cmp.clone();
                input.skip_while(move |item| cmp.eval(item))
            }
            Stage::Take(Bound::Count(n)) => input.take(*n),
            Stage::Take(Bound::While(cmp)) => {
                let cmp = cmp.clone();
                input.take_while(move |item| cmp.eval(item))
            }
            Stage::Reverse => input.reverse(),
            Stage::Distinct => input.distinct(),
            Stage::Flatten { field: path } => {
                let path = path.clone();
                input.flatten(move |item: Value| {
                    let inner = match &path {
                        Some(p) => field(&item, p),
                        None => item,
                    };
                    match inner {
                        Value::Array(items) => Enumerable::new(items),
                        Value::Null => Enumerable::empty(),
                        other => Enumerable::new(vec![other]),
                    }
                })
            }
            Stage::Group { by } => {
                let by = by.clone();
                input
                    .group_by_field(&by)
                    .map(move |pair| group_row(pair.value.to_vec(), &by))
            }
            Stage::Join {
                with,
                outer_key,
                inner_key,
            } => {
                let inner = Enumerable::new(with.clone());
                let (outer_key, inner_key) = (outer_key.clone(), inner_key.clone());
                input.join(
                    &inner,
                    move |o: &Value| key_string(&field(o, &outer_key)),
                    move |i: &Value| key_string(&field(i, &inner_key)),
                    |o: &Value, i: &Value| {
                        let mut row = Map::new();
                        row.insert("outer".to_string(), o.clone());
                        row.insert("inner".to_string(), i.clone());
                        Value::Object(row)
                    },
                )
            }
        }
    }
}

/// `{"key": <field of the first member>, "values": [...]}`
fn group_row(values: Vec<Value>, by: &str) -> Value {
    let key = values.first().map(|v| field(v, by)).unwrap_or(Value::Null);
    let mut row = Map::new();
    row.insert("key".to_string(), key);
    row.insert("values".to_string(), Value::Array(values));
    Value::Object(row)
}

#[derive(Debug, Clone)]
pub struct ParsedPipeline {
    pub stages: Vec<Stage>,
    pub config: PipelineConfig,
}

impl ParsedPipeline {
    /// The pipeline's own `config.direction`, else `fallback`.
    pub fn direction_or(&self, fallback: Direction) -> Direction {
        self.config.direction.unwrap_or(fallback)
    }

    /// Stack every stage onto `input`. Nothing is read until the result is
    /// consumed. Sort keys that name no direction use `direction`.
    pub fn apply(&self, input: Enumerable<Value>, direction: Direction) -> Enumerable<Value> {
        self.stages
            .iter()
            .fold(input, |acc, stage| stage.apply(acc, direction))
    }

    /// Apply to a JSON array and collect the output as a JSON array.
    pub fn run_json(&self, input: Value, direction: Direction) -> Result<Value, PlanError> {
        let source = Enumerable::from_json(input)?;
        let output = self.apply(source, direction).to_json();
        tracing::debug!(stages = self.stages.len(), "pipeline applied");
        Ok(output)
    }
}

/// Validate every step; the first invalid one fails the whole pipeline.
pub fn lower(doc: Pipeline) -> Result<ParsedPipeline, PlanError> {
    if doc.steps.is_empty() {
        return Err(PlanError::Empty);
    }

    let mut stages = Vec::with_capacity(doc.steps.len());
    for (index, step) in doc.steps.into_iter().enumerate() {
        let op = step.name();
        let stage = match step {
            Step::Filter { expr } => Stage::Filter(Comparison::parse(&expr)?),
            Step::Map { field } => Stage::Map { field },
            Step::Sort {
                by,
                direction,
                then_by,
            } => {
                let mut keys = vec![(by, direction)];
                keys.extend(
                    then_by
                        .iter()
                        .map(|key| (key.field().to_string(), key.direction())),
                );
                Stage::Sort { keys }
            }
            Step::Skip { count, while_expr } => Stage::Skip(bound(index, op, count, while_expr)?),
            Step::Take { count, while_expr } => Stage::Take(bound(index, op, count, while_expr)?),
            Step::Reverse => Stage::Reverse,
            Step::Distinct => Stage::Distinct,
            Step::Flatten { field } => Stage::Flatten { field },
            Step::Group { by } => Stage::Group { by },
            Step::Join {
                with,
                outer_key,
                inner_key,
            } => Stage::Join {
                with,
                outer_key,
                inner_key,
            },
        };
        tracing::trace!(index, op, "step lowered");
        stages.push(stage);
    }

    Ok(ParsedPipeline {
        stages,
        config: doc.config.unwrap_or_default(),
    })
}

fn bound(
    index: usize,
    op: &'static str,
    count: Option<usize>,
    while_expr: Option<String>,
) -> Result<Bound, PlanError> {
    match (count, while_expr) {
        (Some(n), None) => Ok(Bound::Count(n)),
        (None, Some(expr)) => Ok(Bound::While(Comparison::parse(&expr)?)),
        (Some(_), Some(_)) => Err(PlanError::InvalidStep {
            index,
            op,
            reason: "`count` and `while` are mutually exclusive".into(),
        }),
        (None, None) => Err(PlanError::InvalidStep {
            index,
            op,
            reason: "needs `count` or `while`".into(),
        }),
    }
}
