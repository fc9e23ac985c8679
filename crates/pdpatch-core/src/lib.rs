//! Programmatic builder and serializer for Pure Data patches.
//!
//! Build a [`Patch`] with append-only calls that hand back stable
//! [`NodeId`]s, wire the ids together, then [`render`](render::render) or
//! [`save`](render::save) the result.

pub mod brain;
pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod node;
pub mod render;

// Re-export commonly used types
pub use edge::Connection;
pub use error::PatchError;
pub use graph::Patch;
pub use id::NodeId;
pub use node::{escape_message, Atom, Node, NodeKind};
pub use render::{render, save};
