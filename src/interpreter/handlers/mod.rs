//! Default handler library
//!
//! The standard vocabulary of control-flow, comparison and arithmetic
//! handlers. Every entry is a pure consumer of the engine's public contract:
//! it sees its own block, calls back into `exec`/`eval` for blocks found in
//! its inputs, and reports through `Outcome`. Nothing here touches engine
//! internals.

pub mod control;
pub mod logic;
pub mod math;

use super::engine::Interpreter;
use super::types::{Block, ErrorKind, Outcome, Value};

/// Register the default vocabulary on an interpreter. Typically called once
/// at boot, before any entrance is triggered.
pub fn register_default_handlers(interp: &Interpreter) {
    interp.register_handler("controls_if", control::controls_if);
    interp.register_handler("controls_whileUntil", control::controls_while_until);
    interp.register_handler("controls_repeat_ext", control::controls_repeat_ext);
    interp.register_handler("controls_flow_statements", control::controls_flow_statements);
    interp.register_handler("logic_compare", logic::logic_compare);
    interp.register_handler("math_number", math::math_number);
    interp.register_handler("math_arithmetic", math::math_arithmetic);
}

/* ===================== Shared helpers ===================== */

/// Evaluate a required input slot to a value.
pub(crate) async fn eval_input(
    interp: &Interpreter,
    block: &Block,
    name: &str,
) -> Result<Value, Outcome> {
    let Some(node) = block.input(name) else {
        return Err(Outcome::fault(
            ErrorKind::MissingInput,
            Some(block.id.as_str()),
            format!("missing input `{name}`"),
        ));
    };
    match interp.eval(node).await {
        Outcome::Normal(value) => Ok(value),
        other => Err(other),
    }
}

/// Evaluate a required input slot to a number.
pub(crate) async fn eval_num_input(
    interp: &Interpreter,
    block: &Block,
    name: &str,
) -> Result<f64, Outcome> {
    let value = eval_input(interp, block, name).await?;
    value.as_num().ok_or_else(|| {
        Outcome::fault(
            ErrorKind::TypeMismatch,
            Some(block.id.as_str()),
            format!("input `{name}` is not a number"),
        )
    })
}

/// Read a required string-valued field.
pub(crate) fn require_str_field<'a>(block: &'a Block, name: &str) -> Result<&'a str, Outcome> {
    block.str_field(name).ok_or_else(|| {
        Outcome::fault(
            ErrorKind::MissingField,
            Some(block.id.as_str()),
            format!("missing or non-string field `{name}`"),
        )
    })
}
