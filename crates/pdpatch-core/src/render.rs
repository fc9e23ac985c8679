//! Serialization of a [`Patch`] into the Pd text format.
//!
//! Layout of a rendered document:
//!
//! ```text
//! #N canvas 100 100 <width> <height> 12;
//! #X obj <x> <y> <tokens>;        one line per node, in append order
//! #N canvas 0 0 600 400 <name> 0; subpatch block, rendered recursively
//! ...                             the subpatch's own nodes and connections
//! #X restore <x> <y> pd <name>;
//! #X connect <src> <outlet> <dst> <inlet>;
//! ```
//!
//! Rendering is pure: the same patch always yields the same bytes and the
//! patch is never modified. Indices inside a subpatch block are local to the
//! subpatch and are emitted unchanged.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::PatchError;
use crate::graph::Patch;
use crate::node::{escape_message, Node};

/// Screen position of a top-level canvas window.
const CANVAS_ORIGIN: (i32, i32) = (100, 100);
/// Font size field of a top-level canvas header.
const CANVAS_FONT_SIZE: u32 = 12;
/// Window size given to every subpatch canvas.
const SUBPATCH_SIZE: (u32, u32) = (600, 400);

fn canvas_header(width: u32, height: u32) -> String {
    format!(
        "#N canvas {} {} {} {} {};",
        CANVAS_ORIGIN.0, CANVAS_ORIGIN.1, width, height, CANVAS_FONT_SIZE
    )
}

fn subpatch_header(name: &str) -> String {
    format!(
        "#N canvas 0 0 {} {} {} 0;",
        SUBPATCH_SIZE.0, SUBPATCH_SIZE.1, name
    )
}

/// Renders a patch to text. Lines are joined with `\n` and the result has no
/// trailing newline.
pub fn render(patch: &Patch) -> String {
    let mut lines = Vec::new();
    render_canvas(patch, canvas_header(patch.width(), patch.height()), &mut lines);
    lines.join("\n")
}

/// Emits `header`, then every node, then every connection of `patch`.
///
/// Subpatches recurse with their own header in place of the canvas one, so
/// each nesting level reframes only its own first line.
fn render_canvas(patch: &Patch, header: String, lines: &mut Vec<String>) {
    lines.push(header);

    for node in patch.nodes() {
        match node {
            Node::Object { x, y, tokens } => {
                lines.push(format!("#X obj {} {} {};", x, y, tokens.join(" ")));
            }
            Node::Message { x, y, text } => {
                lines.push(format!("#X msg {} {} {};", x, y, escape_message(text)));
            }
            Node::Comment { x, y, text } => {
                lines.push(format!("#X text {} {} {};", x, y, text));
            }
            Node::Subpatch { x, y, name, inner } => {
                render_canvas(inner, subpatch_header(name), lines);
                lines.push(format!("#X restore {} {} pd {};", x, y, name));
            }
        }
    }

    for c in patch.connections() {
        lines.push(format!(
            "#X connect {} {} {} {};",
            c.source, c.outlet, c.sink, c.inlet
        ));
    }
}

/// Renders `patch` and writes it, plus one trailing newline, to `path`.
///
/// The file is created or truncated. Write failures are returned as
/// [`PatchError::Io`] and not retried.
pub fn save(patch: &Patch, path: impl AsRef<Path>) -> Result<(), PatchError> {
    let path = path.as_ref();
    let mut text = render(patch);
    text.push('\n');

    fs::write(path, &text).map_err(|source| PatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        bytes = text.len(),
        nodes = patch.len(),
        "saved patch"
    );
    Ok(())
}
