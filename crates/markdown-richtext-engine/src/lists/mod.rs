//! List structure: flat list items with explicit depths, plus the nested view
//! derived from them.
//!
//! Depth invariant: an item is at most one level deeper than the list item
//! right before it, and an item not preceded by a list item is at depth 0.

mod depth;
mod indent_style;
mod runs;

pub use depth::normalize_depths;
pub(crate) use depth::{indent_in, outdent_in};
pub use indent_style::{IndentStyle, detect_indent_style};
pub use runs::{ListNode, ListRun, runs};

use crate::editing::{Cmd, EditError};
use crate::models::{BlockPath, Document};

/// Nests the list item at `path` under the item before it.
///
/// A no-op when there is no preceding list item at the same depth or deeper.
pub fn indent(mut document: Document, path: &BlockPath) -> Result<Document, EditError> {
    document.apply(Cmd::Indent { at: path.clone() })?;
    Ok(document)
}

/// Moves the list item at `path` one level up; at the root it becomes a
/// paragraph.
pub fn outdent(mut document: Document, path: &BlockPath) -> Result<Document, EditError> {
    document.apply(Cmd::Outdent { at: path.clone() })?;
    Ok(document)
}
