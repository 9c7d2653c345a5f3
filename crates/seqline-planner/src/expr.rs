//! Simple field predicates: `field OP literal` where OP ∈ {==, !=, <, <=, >, >=}.
//!
//! The literal is read as JSON when it parses (`18`, `true`, `null`,
//! `"quoted"`); otherwise it is a bare string, with surrounding single quotes
//! stripped.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use seqline_core::value::{compare, field, type_name};

use crate::error::PlanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Every symbol `parse` recognizes.
    const ALL: [(&'static str, CmpOp); 6] = [
        ("==", CmpOp::Eq),
        ("!=", CmpOp::Ne),
        ("<=", CmpOp::Le),
        (">=", CmpOp::Ge),
        ("<", CmpOp::Lt),
        (">", CmpOp::Gt),
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }

    fn holds(self, ord: Ordering) -> bool {
        match self {
            CmpOp::Eq => ord == Ordering::Equal,
            CmpOp::Ne => ord != Ordering::Equal,
            CmpOp::Lt => ord == Ordering::Less,
            CmpOp::Le => ord != Ordering::Greater,
            CmpOp::Gt => ord == Ordering::Greater,
            CmpOp::Ge => ord != Ordering::Less,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub field: String,
    pub op: CmpOp,
    pub literal: Value,
}

impl Comparison {
    pub fn parse(expr: &str) -> Result<Self, PlanError> {
        // Leftmost operator wins; at the same position the longer one does.
        let (pos, symbol, op) = CmpOp::ALL
            .iter()
            .filter_map(|&(symbol, op)| expr.find(symbol).map(|pos| (pos, symbol, op)))
            .min_by_key(|&(pos, symbol, _)| (pos, std::cmp::Reverse(symbol.len())))
            .ok_or_else(|| PlanError::Expr(expr.to_string()))?;
        let field = expr[..pos].trim();
        if field.is_empty() {
            return Err(PlanError::Expr(expr.to_string()));
        }
        Ok(Self {
            field: field.to_string(),
            op,
            literal: parse_literal(expr[pos + symbol.len()..].trim()),
        })
    }

    /// Values of different JSON types only satisfy `!=`.
    pub fn eval(&self, item: &Value) -> bool {
        let left = field(item, &self.field);
        if type_name(&left) != type_name(&self.literal) {
            return self.op == CmpOp::Ne;
        }
        self.op.holds(compare(&left, &self.literal))
    }
}

impl FromStr for Comparison {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op.symbol(), self.literal)
    }
}

fn parse_literal(raw: &str) -> Value {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        return v;
    }
    let unquoted = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(raw);
    Value::String(unquoted.to_string())
}
