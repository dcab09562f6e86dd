//! Arithmetic handlers

use super::{eval_num_input, require_str_field};
use crate::interpreter::engine::Interpreter;
use crate::interpreter::registry::HandlerFuture;
use crate::interpreter::types::{Block, ErrorKind, Outcome, Value};

/// `math_number`: the literal numeric value of field `NUM`.
pub fn math_number<'a>(block: &'a Block, _interp: &'a Interpreter) -> HandlerFuture<'a> {
    Box::pin(async move {
        let Some(value) = block.field("NUM") else {
            return Outcome::fault(
                ErrorKind::MissingField,
                Some(block.id.as_str()),
                "missing field `NUM`",
            );
        };
        match value.as_num() {
            Some(n) => Outcome::Normal(Value::Num(n)),
            None => Outcome::fault(
                ErrorKind::TypeMismatch,
                Some(block.id.as_str()),
                "field `NUM` is not a number",
            ),
        }
    })
}

/// `math_arithmetic`: evaluate inputs `A` and `B` and apply the operator in
/// field `OP`. A zero divisor is a defined fault, not an undefined numeric
/// result.
pub fn math_arithmetic<'a>(block: &'a Block, interp: &'a Interpreter) -> HandlerFuture<'a> {
    Box::pin(async move {
        let op = match require_str_field(block, "OP") {
            Ok(op) => op,
            Err(outcome) => return outcome,
        };
        let a = match eval_num_input(interp, block, "A").await {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        let b = match eval_num_input(interp, block, "B").await {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };

        let result = match op {
            "ADD" => a + b,
            "MINUS" => a - b,
            "MULTIPLY" => a * b,
            "DIVIDE" => {
                if b == 0.0 {
                    return Outcome::fault(
                        ErrorKind::DivisionByZero,
                        Some(block.id.as_str()),
                        "division by zero",
                    );
                }
                a / b
            }
            "POWER" => a.powf(b),
            other => {
                return Outcome::fault(
                    ErrorKind::UnsupportedOperator,
                    Some(block.id.as_str()),
                    format!("unknown arithmetic operator `{other}`"),
                )
            }
        };
        Outcome::Normal(Value::Num(result))
    })
}
