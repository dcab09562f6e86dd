//! Interpreter core
//!
//! Orchestrates statement-chain execution (`exec`), expression evaluation
//! (`eval`), entrance registration and triggering, and cooperative
//! cancellation (`kill_all`). Any number of entrances may run concurrently;
//! the only shared mutable state is the stop token and the running-entrance
//! counter. Handler and entrance tables are written during setup/loading and
//! read-only while entrances run, so lock guards are scoped and never held
//! across an await.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::registry::{HandlerFuture, HandlerRegistry};
use super::types::{Block, BlockSet, ErrorKind, Node, Outcome, Value};

/* ===================== Engine state ===================== */

struct EngineState {
    handlers: RwLock<HandlerRegistry>,
    entrances: RwLock<HashMap<String, Arc<Block>>>,
    /// Cooperative stop flag. `kill_all` cancels the current token and
    /// installs a fresh one after the drain, so later triggers start clean.
    stop: RwLock<CancellationToken>,
    /// Count of currently running entrances. A watch channel so `kill_all`
    /// can block on it reaching zero instead of spinning.
    running: watch::Sender<usize>,
}

/// Decrements the running-entrance counter on every exit path.
struct RunGuard<'a> {
    counter: &'a watch::Sender<usize>,
}

impl<'a> RunGuard<'a> {
    fn enter(counter: &'a watch::Sender<usize>) -> Self {
        counter.send_modify(|n| *n += 1);
        Self { counter }
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.counter.send_modify(|n| *n -= 1);
    }
}

/* ===================== Interpreter ===================== */

/// Handle to the block-program engine.
///
/// Cheap to clone; clones share one registry, entrance table and execution
/// state, so firmware can trigger entrances from independent tasks.
#[derive(Clone)]
pub struct Interpreter {
    state: Arc<EngineState>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let (running, _) = watch::channel(0);
        Self {
            state: Arc::new(EngineState {
                handlers: RwLock::new(HandlerRegistry::new()),
                entrances: RwLock::new(HashMap::new()),
                stop: RwLock::new(CancellationToken::new()),
                running,
            }),
        }
    }

    /* ===================== Execution contract ===================== */

    /// Execute a node.
    ///
    /// A block node starts a statement chain: each block in the chain is
    /// dispatched through the handler registry, `Normal` advances to `next`,
    /// anything else stops the chain and propagates to the caller. A program
    /// node is a load: every top-level root becomes an entrance and nothing
    /// executes. Checks the stop flag and yields to the scheduler before
    /// touching any block; this check re-runs on every recursive invocation.
    pub async fn exec(&self, node: &Node) -> Outcome {
        if self.checkpoint().await {
            return Outcome::Cancelled;
        }
        match node {
            Node::Program { blocks } => self.register_entrances(blocks),
            node => match node.block() {
                Some(block) => self.run_chain(block).await,
                None => Outcome::fault(
                    ErrorKind::InvalidBlock,
                    None,
                    "exec hit a node that is neither a block nor a program",
                ),
            },
        }
    }

    /// Evaluate a single expression block and return its produced value.
    ///
    /// Never traverses `next`: a block attached below an expression block is
    /// unreachable by design. A program node is not an expression.
    pub async fn eval(&self, node: &Node) -> Outcome {
        if self.checkpoint().await {
            return Outcome::Cancelled;
        }
        let Some(block) = node.block() else {
            return Outcome::fault(
                ErrorKind::InvalidBlock,
                None,
                "eval accepts only a single block",
            );
        };
        match self.handler(&block.block_type) {
            Some(handler) => (*handler)(block, self).await,
            None => Outcome::fault(
                ErrorKind::UnknownBlockType,
                Some(block.id.as_str()),
                format!("eval hit an undefined block type `{}`", block.block_type),
            ),
        }
    }

    /// Trigger a named entrance and run it to completion.
    ///
    /// The running-entrance counter is incremented for the duration and
    /// decremented on every exit path. Concurrent triggers of the same or
    /// different entrances each get their own independent execution; the
    /// counter only ever answers "is anything still running".
    pub async fn trigger_entrance(&self, name: &str) -> Outcome {
        let root = {
            let table = self.state.entrances.read().expect("entrance table lock");
            table.get(name).cloned()
        };
        let Some(root) = root else {
            return Outcome::fault(
                ErrorKind::EntranceNotFound,
                None,
                format!("entrance not found: {name}"),
            );
        };

        let _running = RunGuard::enter(&self.state.running);
        tracing::info!(
            entrance = name,
            running = *self.state.running.borrow(),
            "entrance triggered"
        );
        let outcome = self.exec_block(&root).await;
        tracing::info!(entrance = name, outcome = ?outcome, "entrance ended");
        outcome
    }

    /// True iff at least one triggered entrance has not yet returned.
    pub fn is_busy(&self) -> bool {
        *self.state.running.borrow() > 0
    }

    /// Stop everything and wait for full drain.
    ///
    /// Sets the stop flag, then blocks until the running-entrance counter
    /// reaches zero: every active `exec`/`eval` observes the flag at its
    /// next check point and unwinds. The flag is cleared afterwards so
    /// future triggers are not pre-cancelled. This cannot single out one
    /// entrance.
    pub async fn kill_all(&self) {
        tracing::info!("kill_all: stop flag set, draining running entrances");
        self.state.stop.read().expect("stop token lock").cancel();

        let mut running = self.state.running.subscribe();
        let _ = running.wait_for(|count| *count == 0).await;

        *self.state.stop.write().expect("stop token lock") = CancellationToken::new();
        tracing::info!("kill_all: all entrances stopped");
    }

    /* ===================== Registration ===================== */

    /// Register or replace the handler for a block type.
    ///
    /// Must not be called while `is_busy()`; the table is not synchronized
    /// against running entrances.
    pub fn register_handler<F>(&self, block_type: impl Into<String>, handler: F)
    where
        F: for<'a> Fn(&'a Block, &'a Interpreter) -> HandlerFuture<'a> + Send + Sync + 'static,
    {
        if self.is_busy() {
            tracing::warn!("handler registered while entrances are running");
        }
        self.state
            .handlers
            .write()
            .expect("handler table lock")
            .register(block_type, handler);
    }

    /// Remove all handler registrations. Only safe while no entrance runs.
    pub fn clear_handlers(&self) {
        if self.is_busy() {
            tracing::warn!("handler table cleared while entrances are running");
        }
        self.state.handlers.write().expect("handler table lock").clear();
    }

    /// Registered entrance names, sorted for deterministic iteration.
    pub fn entrance_names(&self) -> Vec<String> {
        let table = self.state.entrances.read().expect("entrance table lock");
        let mut names: Vec<String> = table.keys().cloned().collect();
        names.sort();
        names
    }

    /* ===================== Internals ===================== */

    /// Cooperative check point: yield to other runnable work, then observe
    /// the stop flag. Returns true when a stop is in progress.
    async fn checkpoint(&self) -> bool {
        tokio::task::yield_now().await;
        self.state.stop.read().expect("stop token lock").is_cancelled()
    }

    fn handler(&self, block_type: &str) -> Option<super::registry::Handler> {
        self.state
            .handlers
            .read()
            .expect("handler table lock")
            .lookup(block_type)
    }

    /// Entrance-rooted execution: same contract as `exec` on a block node.
    async fn exec_block(&self, block: &Block) -> Outcome {
        if self.checkpoint().await {
            return Outcome::Cancelled;
        }
        self.run_chain(block).await
    }

    /// Walk a statement chain: current block, then `next`, while one exists.
    async fn run_chain(&self, first: &Block) -> Outcome {
        let mut current = first;
        loop {
            let Some(handler) = self.handler(&current.block_type) else {
                return Outcome::fault(
                    ErrorKind::UnknownBlockType,
                    Some(current.id.as_str()),
                    format!("exec hit an undefined block type `{}`", current.block_type),
                );
            };
            match (*handler)(current, self).await {
                // A statement's value is discarded; the chain advances.
                Outcome::Normal(_) => {}
                // Abort, Break, Cancelled and Fault all stop the chain here;
                // blocks after this one are never visited.
                other => return other,
            }
            match current.next.as_deref().and_then(Node::block) {
                Some(next) => current = next,
                None => return Outcome::Normal(Value::Null),
            }
        }
    }

    /// Load operation: every top-level root block becomes an entrance keyed
    /// by its `type`. Two roots sharing a type collide; the later
    /// registration wins and the collision is logged rather than silently
    /// swallowed.
    fn register_entrances(&self, blocks: &BlockSet) -> Outcome {
        let mut table = self.state.entrances.write().expect("entrance table lock");
        for block in &blocks.blocks {
            tracing::info!(entrance = %block.block_type, id = %block.id, "registered entrance");
            if let Some(previous) =
                table.insert(block.block_type.clone(), Arc::new(block.clone()))
            {
                tracing::warn!(
                    entrance = %block.block_type,
                    replaced = %previous.id,
                    by = %block.id,
                    "duplicate entrance type, last registration wins"
                );
            }
        }
        Outcome::Normal(Value::Null)
    }
}
