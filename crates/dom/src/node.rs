use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Index handle for an element owned by a [`Document`](crate::Document).
///
/// Handles are only minted by a document and stay valid for its whole
/// lifetime: removal detaches a node from its parent but never frees the
/// slot, so every operation taking a `NodeId` is total.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: u32) -> Self {
        NodeId(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Backing storage for one element.
///
/// Classes keep insertion order (class strings render in the order they were
/// added); attributes sort by name so snapshots are deterministic.
#[derive(Debug, Default)]
pub(crate) struct NodeData {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl NodeData {
    pub fn new(tag: &str) -> Self {
        NodeData {
            tag: tag.to_string(),
            ..NodeData::default()
        }
    }
}

/// Serializable structural snapshot of a subtree.
///
/// Used by tests to assert the exact markup contract and by the demo tool to
/// print the tree as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}
