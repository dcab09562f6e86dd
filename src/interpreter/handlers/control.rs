//! Control-flow handlers

use super::{eval_input, eval_num_input, require_str_field};
use crate::interpreter::engine::Interpreter;
use crate::interpreter::registry::HandlerFuture;
use crate::interpreter::types::{Block, ErrorKind, Outcome, Value};

/// `controls_if`: test condition inputs `IF0, IF1, ..` in order, stopping at
/// the first index that does not exist. The first truthy condition runs its
/// paired `DO<i>` chain and that outcome is returned; later conditions are
/// never evaluated. With no truthy condition the `ELSE` chain runs if
/// present, otherwise the block is a no-op.
pub fn controls_if<'a>(block: &'a Block, interp: &'a Interpreter) -> HandlerFuture<'a> {
    Box::pin(async move {
        let mut index = 0;
        while let Some(condition) = block.input(&format!("IF{index}")) {
            match interp.eval(condition).await {
                Outcome::Normal(value) => {
                    if value.is_truthy() {
                        return match block.input(&format!("DO{index}")) {
                            Some(body) => interp.exec(body).await,
                            None => Outcome::Normal(Value::Null),
                        };
                    }
                }
                other => return other,
            }
            index += 1;
        }
        match block.input("ELSE") {
            Some(body) => interp.exec(body).await,
            None => Outcome::Normal(Value::Null),
        }
    })
}

/// `controls_whileUntil`: field `MODE` picks the flavor. WHILE re-checks
/// `BOOL` before each iteration; UNTIL runs the body first and repeats while
/// `BOOL` is false. The nearest loop consumes a `Break` from its body and
/// succeeds; any other non-normal body outcome ends the enclosing chain, not
/// just the loop. Every condition check goes through `eval`, which is a
/// cooperative yield point.
pub fn controls_while_until<'a>(block: &'a Block, interp: &'a Interpreter) -> HandlerFuture<'a> {
    Box::pin(async move {
        let mode = match require_str_field(block, "MODE") {
            Ok(mode) => mode,
            Err(outcome) => return outcome,
        };
        match mode {
            "WHILE" => loop {
                match eval_input(interp, block, "BOOL").await {
                    Ok(condition) => {
                        if !condition.is_truthy() {
                            break;
                        }
                    }
                    Err(outcome) => return outcome,
                }
                if let Some(body) = block.input("DO") {
                    match interp.exec(body).await {
                        Outcome::Normal(_) => {}
                        Outcome::Break => break,
                        other => return other,
                    }
                }
            },
            "UNTIL" => loop {
                if let Some(body) = block.input("DO") {
                    match interp.exec(body).await {
                        Outcome::Normal(_) => {}
                        Outcome::Break => break,
                        other => return other,
                    }
                }
                match eval_input(interp, block, "BOOL").await {
                    Ok(condition) => {
                        if condition.is_truthy() {
                            break;
                        }
                    }
                    Err(outcome) => return outcome,
                }
            },
            other => {
                return Outcome::fault(
                    ErrorKind::UnsupportedOperator,
                    Some(block.id.as_str()),
                    format!("unknown loop mode `{other}`"),
                )
            }
        }
        Outcome::Normal(Value::Null)
    })
}

/// `controls_repeat_ext`: evaluate `TIMES` once, then run `DO` that many
/// times unless the body breaks out early.
pub fn controls_repeat_ext<'a>(block: &'a Block, interp: &'a Interpreter) -> HandlerFuture<'a> {
    Box::pin(async move {
        let times = match eval_num_input(interp, block, "TIMES").await {
            Ok(times) => times,
            Err(outcome) => return outcome,
        };
        let count = times.max(0.0) as u64;
        let Some(body) = block.input("DO") else {
            return Outcome::Normal(Value::Null);
        };
        for _ in 0..count {
            match interp.exec(body).await {
                Outcome::Normal(_) => {}
                Outcome::Break => break,
                other => return other,
            }
        }
        Outcome::Normal(Value::Null)
    })
}

/// `controls_flow_statements`: field `FLOW`. BREAK produces the loop-control
/// signal consumed by the nearest enclosing loop. The inherited vocabulary
/// has no CONTINUE; any other value behaves as BREAK and is flagged instead
/// of silently reproduced.
pub fn controls_flow_statements<'a>(block: &'a Block, _interp: &'a Interpreter) -> HandlerFuture<'a> {
    Box::pin(async move {
        let flow = match require_str_field(block, "FLOW") {
            Ok(flow) => flow,
            Err(outcome) => return outcome,
        };
        if flow != "BREAK" {
            tracing::warn!(block = %block.id, flow = %flow, "unsupported FLOW value, treating as BREAK");
        }
        Outcome::Break
    })
}
