//! Test helpers for engine tests
//!
//! Instrumented handlers (counting probes, shared-counter expressions,
//! gates) used to observe exactly which blocks the engine visits.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::interpreter::engine::Interpreter;
use crate::interpreter::handlers::register_default_handlers;
use crate::interpreter::registry::HandlerFuture;
use crate::interpreter::types::{Block, Node, Outcome, Value};

/// Interpreter with the default vocabulary registered.
pub fn engine_with_defaults() -> Interpreter {
    let interp = Interpreter::new();
    register_default_handlers(&interp);
    interp
}

/// Parse a JSON literal into a node, panicking on shape errors.
pub fn node(json: serde_json::Value) -> Node {
    serde_json::from_value(json).expect("block json should parse")
}

/// Wrapped `math_number` input slot.
pub fn num_input(n: f64) -> serde_json::Value {
    serde_json::json!({"shadow": {"type": "math_number", "fields": {"NUM": n}}})
}

/// Statement handler that counts invocations and returns a fixed outcome.
pub fn counting_handler(
    counter: Arc<AtomicUsize>,
    outcome: Outcome,
) -> impl for<'a> Fn(&'a Block, &'a Interpreter) -> HandlerFuture<'a> + Send + Sync + 'static {
    move |_block, _interp| {
        let counter = counter.clone();
        let outcome = outcome.clone();
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            outcome
        })
    }
}

/// Expression handler producing the shared counter's current value.
pub fn counter_value(
    counter: Arc<AtomicUsize>,
) -> impl for<'a> Fn(&'a Block, &'a Interpreter) -> HandlerFuture<'a> + Send + Sync + 'static {
    move |_block, _interp| {
        let counter = counter.clone();
        Box::pin(async move { Outcome::Normal(Value::Num(counter.load(Ordering::SeqCst) as f64)) })
    }
}

/// Expression handler: true while the shared counter is below the block's
/// `LIMIT` field.
pub fn counter_below(
    counter: Arc<AtomicUsize>,
) -> impl for<'a> Fn(&'a Block, &'a Interpreter) -> HandlerFuture<'a> + Send + Sync + 'static {
    move |block, _interp| {
        let counter = counter.clone();
        Box::pin(async move {
            let limit = block.num_field("LIMIT").unwrap_or(0.0) as usize;
            Outcome::Normal(Value::Bool(counter.load(Ordering::SeqCst) < limit))
        })
    }
}

/// Expression handler mirroring an atomic gate flag.
pub fn bool_flag(
    flag: Arc<AtomicBool>,
) -> impl for<'a> Fn(&'a Block, &'a Interpreter) -> HandlerFuture<'a> + Send + Sync + 'static {
    move |_block, _interp| {
        let flag = flag.clone();
        Box::pin(async move { Outcome::Normal(Value::Bool(flag.load(Ordering::SeqCst))) })
    }
}

/// Statement handler that signals a notifier each time it runs.
pub fn signal_handler(
    notify: Arc<Notify>,
) -> impl for<'a> Fn(&'a Block, &'a Interpreter) -> HandlerFuture<'a> + Send + Sync + 'static {
    move |_block, _interp| {
        let notify = notify.clone();
        Box::pin(async move {
            notify.notify_one();
            Outcome::Normal(Value::Null)
        })
    }
}

/// Statement handler that parks until released, then completes normally.
pub fn wait_handler(
    release: Arc<Notify>,
) -> impl for<'a> Fn(&'a Block, &'a Interpreter) -> HandlerFuture<'a> + Send + Sync + 'static {
    move |_block, _interp| {
        let release = release.clone();
        Box::pin(async move {
            release.notified().await;
            Outcome::Normal(Value::Null)
        })
    }
}
