//! # Block-program interpreter
//!
//! Runs visual, block-based programs exported as JSON from a graphical block
//! editor. A firmware embedding registers native handlers keyed by block
//! `type`; the engine walks the document and dispatches each block to its
//! handler.
//!
//! ## Core principles
//!
//! 1. **One return channel**: every execution reports through [`Outcome`],
//!    a tagged result, so a computed `0`/`false` can never read as an abort
//! 2. **Scoped loop control**: `Break` travels up the call chain and is
//!    consumed by the nearest enclosing loop, never stored in shared state
//! 3. **Reentrant entrances**: any number of entrances run concurrently over
//!    one read-only document, tracked only by a running counter
//! 4. **Cooperative cancellation**: `kill_all` stops everything at the next
//!    check points and waits for full drain

pub mod engine;
pub mod handlers;
pub mod loader;
pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use engine::Interpreter;
pub use handlers::register_default_handlers;
pub use registry::{Handler, HandlerFuture, HandlerRegistry};
pub use types::{Block, BlockSet, ErrorKind, Node, Outcome, RuntimeError, Value};
