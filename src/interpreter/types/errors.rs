//! Runtime error taxonomy
//!
//! Every fault is reported with the offending block's id and a message and
//! travels up the call chain inside an [`Outcome`](super::Outcome); there is
//! no exception-based control flow anywhere in the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ErrorKind {
    /// Malformed or unrecognized node shape
    #[error("invalid block")]
    InvalidBlock,
    /// No handler registered for the block's type
    #[error("unknown block type")]
    UnknownBlockType,
    /// A required input slot is absent
    #[error("missing input")]
    MissingInput,
    /// A required field is absent
    #[error("missing field")]
    MissingField,
    /// Unrecognized value in an operator field
    #[error("unsupported operator")]
    UnsupportedOperator,
    /// Zero divisor in `math_arithmetic`
    #[error("division by zero")]
    DivisionByZero,
    /// Triggered entrance name is not registered
    #[error("entrance not found")]
    EntranceNotFound,
    /// Operand has the wrong type for the operation
    #[error("type mismatch")]
    TypeMismatch,
}

/// A fault at a specific block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{kind} at block {}: {message}", .block_id.as_deref().unwrap_or("<none>"))]
pub struct RuntimeError {
    pub kind: ErrorKind,
    /// Id of the offending block, when one exists
    pub block_id: Option<String>,
    pub message: String,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind, block_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            block_id: block_id.map(str::to_owned),
            message: message.into(),
        }
    }
}
