//! Document loading
//!
//! Accepts a parsed JSON document (whole program or single fragment), or the
//! raw source text/file it came from. Sources are fingerprinted with SHA-256
//! so the log records which program version started running; the document
//! itself is sourced externally and arrives here already read.

use std::path::Path;

use anyhow::Context;
use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};

use super::engine::Interpreter;
use super::types::{ErrorKind, Node, Outcome};

impl Interpreter {
    /// Load a parsed JSON document.
    ///
    /// A program document registers its roots as entrances; a fragment
    /// executes immediately. A value that matches neither shape is an
    /// `InvalidBlock` fault, not a crash.
    pub async fn load_document(&self, document: JsonValue) -> Outcome {
        match serde_json::from_value::<Node>(document) {
            Ok(node) => self.exec(&node).await,
            Err(err) => Outcome::fault(
                ErrorKind::InvalidBlock,
                None,
                format!("malformed block document: {err}"),
            ),
        }
    }

    /// Load a document from its JSON source text.
    pub async fn load_str(&self, source: &str) -> Outcome {
        let version = fingerprint(source);
        tracing::info!(version = %&version[..8], bytes = source.len(), "loading program");
        match serde_json::from_str::<Node>(source) {
            Ok(node) => self.exec(&node).await,
            Err(err) => Outcome::fault(
                ErrorKind::InvalidBlock,
                None,
                format!("malformed block document: {err}"),
            ),
        }
    }

    /// Load a document from a file on disk.
    ///
    /// I/O failure is an outer-edge error for the embedding to handle;
    /// document faults still come back inside the `Outcome`.
    pub async fn load_file(&self, path: impl AsRef<Path>) -> anyhow::Result<Outcome> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read program file {}", path.display()))?;
        Ok(self.load_str(&source).await)
    }
}

/// Hash program source using SHA256
fn fingerprint(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}
