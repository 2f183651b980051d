//! Hierarchical binary node-container document
//!
//! The exporter's output: a tree of named entries, each holding either raw
//! little-endian bytes or further named entries. Entry lookup by name is
//! case-insensitive, matching the runtime loader.

use serde::{Deserialize, Serialize};

/// One named entry of the node-container document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerNode {
    pub name: String,
    pub payload: Payload,
}

/// Entry payload: raw bytes or ordered child entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Data(Vec<u8>),
    Branch(Vec<ContainerNode>),
}

impl ContainerNode {
    /// Interior entry holding ordered children
    pub fn branch(name: impl Into<String>, children: Vec<ContainerNode>) -> Self {
        Self {
            name: name.into(),
            payload: Payload::Branch(children),
        }
    }

    /// Leaf entry holding raw bytes
    pub fn leaf(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            payload: Payload::Data(data),
        }
    }

    /// Leaf entry holding a plain-text string
    pub fn leaf_str(name: impl Into<String>, value: &str) -> Self {
        Self::leaf(name, value.as_bytes().to_vec())
    }

    /// Child entries, empty for leaves
    pub fn children(&self) -> &[ContainerNode] {
        match &self.payload {
            Payload::Branch(children) => children,
            Payload::Data(_) => &[],
        }
    }

    /// Raw bytes, None for interior entries
    pub fn data(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Data(data) => Some(data),
            Payload::Branch(_) => None,
        }
    }

    /// Leaf bytes decoded as UTF-8 text
    pub fn string_data(&self) -> Option<&str> {
        self.data().and_then(|d| std::str::from_utf8(d).ok())
    }

    /// First child with the given name, compared case-insensitively
    pub fn child(&self, name: &str) -> Option<&ContainerNode> {
        self.children()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}
