//! Parsed block-document model
//!
//! A block document is either a whole program (`{"blocks": {"blocks": [..]}}`,
//! one root block per entry) or a single block fragment. Fragments come in
//! three spellings: wrapped as `{"block": ..}`, wrapped as `{"shadow": ..}`
//! (the editor's default-value placeholder, identical at runtime), or a bare
//! `{"type": ..}` object. [`Node::block`] collapses the wrapper so handler
//! code never sees the distinction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::values::Value;

/// Any parsed payload the engine can be handed.
///
/// Variant order matters: serde tries them top to bottom, and a wrapper
/// object carrying both `shadow` and `block` keys must resolve to the real
/// block, as the editor expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Block { block: Block },
    Shadow { shadow: Block },
    Program { blocks: BlockSet },
    Inline(Block),
}

impl Node {
    /// Resolve the editor's block/shadow wrapper into the canonical block.
    ///
    /// A program document has no single block and resolves to `None`.
    pub fn block(&self) -> Option<&Block> {
        match self {
            Node::Block { block } | Node::Shadow { shadow: block } => Some(block),
            Node::Inline(block) => Some(block),
            Node::Program { .. } => None,
        }
    }
}

/// Top-level collection of root blocks in a program document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSet {
    pub blocks: Vec<Block>,
}

/// One node of the visual program.
///
/// Immutable once parsed; the document owns the whole tree. `next` chains
/// the following statement, `inputs` hold named child slots ("A", "DO0", ..)
/// and `fields` hold literals embedded in the block. Editor-only keys
/// (coordinates, collapsed state) are ignored on parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    #[serde(default)]
    pub inputs: HashMap<String, Node>,
    #[serde(default)]
    pub next: Option<Box<Node>>,
}

impl Block {
    pub fn input(&self, name: &str) -> Option<&Node> {
        self.inputs.get(name)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn num_field(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(Value::as_num)
    }
}
