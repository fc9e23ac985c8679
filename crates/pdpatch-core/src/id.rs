//! Index newtypes for patch entities.
//!
//! A [`NodeId`] is the zero-based append position of a node inside the patch
//! that owns it. Ports are plain `u32` numbers; outlets are sources, inlets
//! are sinks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a node within its owning patch.
///
/// Ids are only meaningful inside the patch that issued them. A subpatch has
/// its own index space starting again at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Returns the id as a `usize` suitable for slice indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(idx: u32) -> Self {
        NodeId(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display() {
        assert_eq!(format!("{}", NodeId(7)), "7");
    }

    #[test]
    fn node_id_index() {
        assert_eq!(NodeId(42).index(), 42);
        assert_eq!(NodeId::from(3), NodeId(3));
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&NodeId(5)).unwrap();
        assert_eq!(json, "5");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeId(5));
    }
}
