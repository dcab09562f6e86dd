//! Type definitions for the engine
//!
//! This module contains all the core types used by the interpreter:
//! - Document model (Node, Block, BlockSet)
//! - Runtime values (Value)
//! - Outcomes (Outcome)
//! - Error taxonomy (ErrorKind, RuntimeError)

pub mod errors;
pub mod model;
pub mod outcome;
pub mod values;

// Re-export all types for convenient access
pub use errors::{ErrorKind, RuntimeError};
pub use model::{Block, BlockSet, Node};
pub use outcome::Outcome;
pub use values::Value;
