//! Execution outcomes
//!
//! The single return channel of `exec`, `eval` and every handler. The
//! inherited engine overloaded one integer for "keep going", "the computed
//! value" and "an error happened", so a computed `0`/`false` was
//! indistinguishable from an abort. Here each meaning is its own variant and
//! the carried value rides inside `Normal`.

use super::errors::{ErrorKind, RuntimeError};
use super::values::Value;

/// Result of executing a statement chain, evaluating an expression, or
/// invoking a single handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Completed; carries the evaluated value (`Null` for statements)
    Normal(Value),
    /// Handler-requested early termination of the enclosing chain
    Abort,
    /// Loop-control signal, consumed by the nearest enclosing loop handler.
    /// Lives only in return values on the current call stack, never in
    /// shared state, so concurrent entrances cannot observe each other's
    /// breaks.
    Break,
    /// A cooperative stop was observed at a check point
    Cancelled,
    /// Runtime failure at a block; stops the current entrance only
    Fault(RuntimeError),
}

impl Outcome {
    /// Fault constructor; logs the failing block the way the inherited
    /// engine's `error()` did.
    pub fn fault(kind: ErrorKind, block_id: Option<&str>, message: impl Into<String>) -> Self {
        let err = RuntimeError::new(kind, block_id, message);
        tracing::error!(error = %err, "block execution fault");
        Outcome::Fault(err)
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Outcome::Normal(_))
    }

    /// The carried value, if the outcome is `Normal`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Normal(v) => Some(v),
            _ => None,
        }
    }
}
