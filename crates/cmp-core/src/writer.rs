//! Flat binary serialization of a node-container document
//!
//! On-disk form consumed by the runtime loader: a fixed header followed by a
//! recursive length-prefixed node stream. Serialization is deterministic;
//! identical documents produce identical bytes.

use crate::{ContainerNode, Payload};

/// File magic at offset 0
pub const CONTAINER_MAGIC: &[u8; 4] = b"CMPN";
/// Current container format version
pub const CONTAINER_VERSION: u32 = 1;

/// Errors raised while serializing a container document
#[derive(Debug, Clone, thiserror::Error)]
pub enum WriteError {
    #[error("Entry name too long ({len} bytes): {name}")]
    NameTooLong { name: String, len: usize },
}

/// Serialize a document into its on-disk byte form
pub fn write_container(root: &ContainerNode) -> Result<Vec<u8>, WriteError> {
    let mut buf = Vec::new();
    buf.extend_from_slice(CONTAINER_MAGIC);
    buf.extend_from_slice(&CONTAINER_VERSION.to_le_bytes());
    write_node(&mut buf, root)?;
    Ok(buf)
}

fn write_node(buf: &mut Vec<u8>, node: &ContainerNode) -> Result<(), WriteError> {
    let name = node.name.as_bytes();
    if name.len() > u16::MAX as usize {
        return Err(WriteError::NameTooLong {
            name: node.name.clone(),
            len: name.len(),
        });
    }
    buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
    buf.extend_from_slice(name);
    match &node.payload {
        Payload::Data(data) => {
            buf.push(0);
            buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
            buf.extend_from_slice(data);
        }
        Payload::Branch(children) => {
            buf.push(1);
            buf.extend_from_slice(&(children.len() as u32).to_le_bytes());
            for child in children {
                write_node(buf, child)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_layout() {
        let doc = ContainerNode::leaf_str("Dc", "x");
        let bytes = write_container(&doc).unwrap();
        // magic + version + name len + "Dc" + tag + data len + data
        let mut expected = Vec::new();
        expected.extend_from_slice(b"CMPN");
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&2u16.to_le_bytes());
        expected.extend_from_slice(b"Dc");
        expected.push(0);
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.push(b'x');
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let doc = ContainerNode::branch(
            "Root",
            vec![
                ContainerNode::leaf_str("Exporter Version", "test"),
                ContainerNode::branch(
                    "Cmpnd",
                    vec![ContainerNode::leaf("Index", 0u32.to_le_bytes().to_vec())],
                ),
            ],
        );
        let a = write_container(&doc).unwrap();
        let b = write_container(&doc).unwrap();
        assert_eq!(a, b);
    }
}
