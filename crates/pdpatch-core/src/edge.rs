//! Connections between boxes on one canvas.
//!
//! A [`Connection`] wires an outlet of a source node to an inlet of a sink
//! node. Endpoints are plain indices into the owning patch's node list and
//! are never checked against it; a dangling endpoint only produces a patch
//! the interpreter will complain about.

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// A directed cord: `(source, outlet) -> (sink, inlet)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Node emitting the value.
    pub source: NodeId,
    /// Outlet number on the source node.
    #[serde(default)]
    pub outlet: u32,
    /// Node receiving the value.
    pub sink: NodeId,
    /// Inlet number on the sink node.
    #[serde(default)]
    pub inlet: u32,
}

impl Connection {
    pub fn new(source: NodeId, outlet: u32, sink: NodeId, inlet: u32) -> Self {
        Connection {
            source,
            outlet,
            sink,
            inlet,
        }
    }

    /// Returns `true` if either endpoint is at or past `node_count`.
    pub fn is_dangling(&self, node_count: usize) -> bool {
        self.source.index() >= node_count || self.sink.index() >= node_count
    }
}
