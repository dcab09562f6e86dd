pub mod config;
pub mod interpreter;

// Re-export main types
pub use interpreter::{
    register_default_handlers, Block, BlockSet, ErrorKind, Handler, HandlerFuture,
    HandlerRegistry, Interpreter, Node, Outcome, RuntimeError, Value,
};

// Re-export runner configuration for convenience
pub use config::RunnerConfig;
