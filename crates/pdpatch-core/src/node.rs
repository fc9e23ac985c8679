//! Node variants of a patch canvas.
//!
//! A canvas holds four kinds of boxes: objects, message boxes, comments and
//! subpatches. [`Node`] is a closed enum so that the renderer matches every
//! variant exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::graph::Patch;

/// Token list of an object box. Most objects carry a name and up to three
/// creation arguments.
pub type Tokens = SmallVec<[String; 4]>;

// ---------------------------------------------------------------------------
// Atoms
// ---------------------------------------------------------------------------

/// A single literal creation argument.
///
/// Object boxes accept any `Display` token, so plain `&str` slices work for
/// the common case. `Atom` exists for call sites that mix symbols and numbers
/// in one token list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Atom {
    Int(i64),
    Float(f64),
    Symbol(String),
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Int(v) => write!(f, "{}", v),
            Atom::Float(v) => write!(f, "{}", v),
            Atom::Symbol(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Atom::Symbol(s.to_string())
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Atom::Symbol(s)
    }
}

impl From<i32> for Atom {
    fn from(v: i32) -> Self {
        Atom::Int(v.into())
    }
}

impl From<i64> for Atom {
    fn from(v: i64) -> Self {
        Atom::Int(v)
    }
}

impl From<f64> for Atom {
    fn from(v: f64) -> Self {
        Atom::Float(v)
    }
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Escapes the statement separators of the patch format so that message text
/// is read back as content: `;` becomes `\;` and `,` becomes `\,`.
///
/// Backslashes already present in `text` are left alone.
pub fn escape_message(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == ';' || ch == ',' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Discriminant of a [`Node`], handy for summaries and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Object,
    Message,
    Comment,
    Subpatch,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Object => "object",
            NodeKind::Message => "message",
            NodeKind::Comment => "comment",
            NodeKind::Subpatch => "subpatch",
        };
        f.write_str(s)
    }
}

/// One box on a canvas.
///
/// Message text is stored as given and escaped when rendered; see
/// [`escape_message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// An object box: class name followed by creation arguments.
    Object { x: i32, y: i32, tokens: Tokens },
    /// A message box. `text` holds the raw payload.
    Message { x: i32, y: i32, text: String },
    /// A comment, emitted verbatim.
    Comment { x: i32, y: i32, text: String },
    /// A nested canvas with its own node and connection index space.
    Subpatch {
        x: i32,
        y: i32,
        name: String,
        inner: Patch,
    },
}

impl Node {
    /// Builds an object node, turning every token into its literal text.
    pub fn object<I, T>(x: i32, y: i32, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        Node::Object {
            x,
            y,
            tokens: tokens.into_iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Builds a message node. `;` and `,` in `text` are escaped on output.
    pub fn message(x: i32, y: i32, text: impl Into<String>) -> Self {
        Node::Message {
            x,
            y,
            text: text.into(),
        }
    }

    /// Builds a comment node.
    pub fn comment(x: i32, y: i32, text: impl Into<String>) -> Self {
        Node::Comment {
            x,
            y,
            text: text.into(),
        }
    }

    /// Builds a subpatch node wrapping a finished inner patch.
    pub fn subpatch(x: i32, y: i32, name: impl Into<String>, inner: Patch) -> Self {
        Node::Subpatch {
            x,
            y,
            name: name.into(),
            inner,
        }
    }

    /// Returns the variant of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Object { .. } => NodeKind::Object,
            Node::Message { .. } => NodeKind::Message,
            Node::Comment { .. } => NodeKind::Comment,
            Node::Subpatch { .. } => NodeKind::Subpatch,
        }
    }

    /// Returns the `(x, y)` placement of this node on its canvas.
    pub fn position(&self) -> (i32, i32) {
        match self {
            Node::Object { x, y, .. }
            | Node::Message { x, y, .. }
            | Node::Comment { x, y, .. }
            | Node::Subpatch { x, y, .. } => (*x, *y),
        }
    }

    /// Returns the message payload as it appears in the patch file, with `;`
    /// and `,` escaped, or `None` for other variants.
    pub fn message_text(&self) -> Option<String> {
        match self {
            Node::Message { text, .. } => Some(escape_message(text)),
            _ => None,
        }
    }

    /// Returns the object tokens joined by single spaces, or `None` for other
    /// variants.
    pub fn object_text(&self) -> Option<String> {
        match self {
            Node::Object { tokens, .. } => Some(tokens.join(" ")),
            _ => None,
        }
    }
}
