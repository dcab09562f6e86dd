//! Comparison handlers

use super::{eval_input, require_str_field};
use crate::interpreter::engine::Interpreter;
use crate::interpreter::registry::HandlerFuture;
use crate::interpreter::types::{Block, ErrorKind, Outcome, Value};

/// `logic_compare`: evaluate inputs `A` and `B` and apply the operator in
/// field `OP`. Equality is structural; ordering requires numeric operands.
pub fn logic_compare<'a>(block: &'a Block, interp: &'a Interpreter) -> HandlerFuture<'a> {
    Box::pin(async move {
        let op = match require_str_field(block, "OP") {
            Ok(op) => op,
            Err(outcome) => return outcome,
        };
        let a = match eval_input(interp, block, "A").await {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        let b = match eval_input(interp, block, "B").await {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };

        let result = match op {
            "EQ" => a == b,
            "NEQ" => a != b,
            "LT" | "LTE" | "GT" | "GTE" => {
                let (Some(lhs), Some(rhs)) = (a.as_num(), b.as_num()) else {
                    return Outcome::fault(
                        ErrorKind::TypeMismatch,
                        Some(block.id.as_str()),
                        format!("operator `{op}` requires numeric operands"),
                    );
                };
                match op {
                    "LT" => lhs < rhs,
                    "LTE" => lhs <= rhs,
                    "GT" => lhs > rhs,
                    _ => lhs >= rhs,
                }
            }
            other => {
                return Outcome::fault(
                    ErrorKind::UnsupportedOperator,
                    Some(block.id.as_str()),
                    format!("unknown comparison operator `{other}`"),
                )
            }
        };
        Outcome::Normal(Value::Bool(result))
    })
}
