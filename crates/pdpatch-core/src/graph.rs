//! Patch: the canvas container and its builder API.
//!
//! [`Patch`] is the only way to construct a canvas. Nodes are append-only:
//! the n-th node added gets [`NodeId`]`(n)` and keeps it forever, because
//! every [`Connection`] refers to nodes by that position. Nothing is ever
//! removed, reordered or renumbered.
//!
//! # Subpatches
//!
//! A subpatch node owns a complete inner [`Patch`] with its own index space.
//! Connections never cross nesting levels. The name lookup
//! ([`Patch::subpatch_named`]) is derived from the node list on demand, so
//! there is no side table to keep in sync.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::edge::Connection;
use crate::error::PatchError;
use crate::id::NodeId;
use crate::node::Node;
use crate::render;

/// Default canvas width of a top-level patch.
pub const DEFAULT_WIDTH: u32 = 900;
/// Default canvas height of a top-level patch.
pub const DEFAULT_HEIGHT: u32 = 800;

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

/// Id of the node appended after `len` existing ones.
///
/// Panics once a canvas holds more nodes than a `u32` index can address.
fn next_id(len: usize) -> NodeId {
    match u32::try_from(len) {
        Ok(idx) => NodeId(idx),
        Err(_) => panic!("canvas node count {} exceeds the u32 index range", len),
    }
}

/// A canvas of nodes plus the connections between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    connections: Vec<Connection>,
}

impl Default for Patch {
    fn default() -> Self {
        Patch::new()
    }
}

impl Patch {
    /// Creates an empty 900x800 patch.
    pub fn new() -> Self {
        Patch::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Creates an empty patch with the given canvas size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Patch {
            width,
            height,
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of nodes on this canvas (not counting nested ones).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in append order; position `i` holds `NodeId(i)`.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node with the given id, if it exists.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Connections in append order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Looks up a subpatch by name.
    ///
    /// When the same name was used more than once, the most recently added
    /// subpatch wins.
    pub fn subpatch_named(&self, name: &str) -> Option<&Patch> {
        self.nodes.iter().rev().find_map(|node| match node {
            Node::Subpatch {
                name: n, inner, ..
            } if n == name => Some(inner),
            _ => None,
        })
    }

    /// All subpatches of this canvas keyed by name, in order of first use.
    /// A reused name maps to the latest subpatch registered under it.
    pub fn subpatches(&self) -> IndexMap<&str, &Patch> {
        let mut map = IndexMap::new();
        for node in &self.nodes {
            if let Node::Subpatch { name, inner, .. } = node {
                map.insert(name.as_str(), inner);
            }
        }
        map
    }

    /// Connections of this canvas with an endpoint past the end of its node
    /// list. Nested canvases are not inspected; see
    /// [`Patch::dangling_connections_nested`].
    ///
    /// This is a report only; such connections are still rendered as given.
    pub fn dangling_connections(&self) -> Vec<Connection> {
        let count = self.nodes.len();
        self.connections
            .iter()
            .filter(|c| c.is_dangling(count))
            .copied()
            .collect()
    }

    /// Dangling connections of this canvas and every subpatch below it.
    ///
    /// Each entry carries the `/`-joined subpatch names leading to the canvas
    /// that owns the connection; the top-level canvas has an empty path.
    pub fn dangling_connections_nested(&self) -> Vec<(String, Connection)> {
        let mut out = Vec::new();
        self.collect_dangling("", &mut out);
        out
    }

    fn collect_dangling(&self, path: &str, out: &mut Vec<(String, Connection)>) {
        out.extend(
            self.dangling_connections()
                .into_iter()
                .map(|c| (path.to_string(), c)),
        );
        for node in &self.nodes {
            if let Node::Subpatch { name, inner, .. } = node {
                let child = if path.is_empty() {
                    name.clone()
                } else {
                    format!("{}/{}", path, name)
                };
                inner.collect_dangling(&child, out);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Builder methods
    // -----------------------------------------------------------------------

    /// Appends a node and returns its index.
    pub(crate) fn add_node(&mut self, node: Node) -> NodeId {
        let id = next_id(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Adds an object box. Tokens are converted to text and joined with
    /// single spaces in the order given.
    pub fn obj<I, T>(&mut self, x: i32, y: i32, tokens: I) -> NodeId
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        self.add_node(Node::object(x, y, tokens))
    }

    /// Adds a message box. `;` and `,` in `content` are escaped so the
    /// interpreter reads them as part of the message.
    pub fn msg(&mut self, x: i32, y: i32, content: &str) -> NodeId {
        self.add_node(Node::message(x, y, content))
    }

    /// Adds a comment, stored verbatim.
    pub fn text(&mut self, x: i32, y: i32, content: impl Into<String>) -> NodeId {
        self.add_node(Node::comment(x, y, content))
    }

    /// Adds a subpatch node that owns `inner`.
    pub fn subpatch(&mut self, x: i32, y: i32, name: impl Into<String>, inner: Patch) -> NodeId {
        self.add_node(Node::subpatch(x, y, name, inner))
    }

    /// Connects `outlet` of `source` to `inlet` of `sink`.
    ///
    /// Endpoints are not validated; see [`Patch::dangling_connections`].
    pub fn connect(&mut self, source: NodeId, outlet: u32, sink: NodeId, inlet: u32) {
        self.connections
            .push(Connection::new(source, outlet, sink, inlet));
    }

    /// Connects the left outlet of `source` to the left inlet of `sink`.
    pub fn connect_first(&mut self, source: NodeId, sink: NodeId) {
        self.connect(source, 0, sink, 0);
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Renders the patch to its textual form. See [`render::render`].
    pub fn render(&self) -> String {
        render::render(self)
    }

    /// Renders the patch and writes it to `path`. See [`render::save`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PatchError> {
        render::save(self, path)
    }

    /// Decodes a patch model from JSON.
    pub fn from_json(json: &str) -> Result<Self, PatchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the patch model as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, PatchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
