//! Handler registry: block-type to native-handler dispatch table
//!
//! Populated at boot, read on every block visited. The table is keyed by the
//! full type string, so two types can never collide into the same handler no
//! matter how the map hashes them; the hashed fast path is the map's own
//! concern. Registration follows single-writer-before-many-readers
//! discipline: mutating the table while entrances run is a programmer error,
//! surfaced by the engine as a warning rather than synchronized away.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::engine::Interpreter;
use super::types::{Block, Outcome};

/// Boxed future returned by a handler invocation.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Outcome> + Send + 'a>>;

/// A native block handler.
///
/// Receives the block being executed and a handle back into the engine so it
/// can `exec`/`eval` blocks found in its own inputs.
pub type Handler = Arc<
    dyn for<'a> Fn(&'a Block, &'a Interpreter) -> HandlerFuture<'a> + Send + Sync,
>;

/// Mapping from block-type identifier to handler function.
#[derive(Default)]
pub struct HandlerRegistry {
    table: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the mapping for `block_type`. Last write wins,
    /// matching entrance semantics.
    pub fn register<F>(&mut self, block_type: impl Into<String>, handler: F)
    where
        F: for<'a> Fn(&'a Block, &'a Interpreter) -> HandlerFuture<'a> + Send + Sync + 'static,
    {
        let block_type = block_type.into();
        if self.table.insert(block_type.clone(), Arc::new(handler)).is_some() {
            tracing::debug!(block_type = %block_type, "handler replaced");
        }
    }

    pub fn lookup(&self, block_type: &str) -> Option<Handler> {
        self.table.get(block_type).cloned()
    }

    /// Remove all registrations. Only safe while no entrance is running.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
