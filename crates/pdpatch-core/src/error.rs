//! Error types for pdpatch-core.
//!
//! Building a patch never fails. Errors only come from the edges of the
//! crate: writing a rendered document to disk and moving the model in and
//! out of JSON.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the pdpatch-core crate.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Writing a rendered patch failed.
    #[error("failed to write patch to '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON patch model could not be encoded or decoded.
    #[error("patch model json error: {0}")]
    Json(#[from] serde_json::Error),
}
