/*!
 * # Editing chokepoint
 *
 * Every structural change to a [`Document`] is a [`Cmd`] applied through
 * [`Document::apply`]. The command runs on a working copy; on success the
 * copy is normalized (leaf runs, element flanking, list depths), checked
 * against the invariants in debug builds, and swapped in.
 *
 * ```rust
 * use markdown_richtext_engine::editing::Cmd;
 * use markdown_richtext_engine::models::BlockPath;
 * use markdown_richtext_engine::parse_markdown;
 *
 * let mut doc = parse_markdown("- one\n- two\n");
 * let patch = doc.apply(Cmd::Indent { at: BlockPath::from(1) }).unwrap();
 * assert_eq!(patch.version, 1);
 * ```
 */

mod commands;
mod error;
mod marks;
mod patch;

pub use commands::Cmd;
pub use error::EditError;
pub use patch::Patch;

use crate::models::Document;

/// Applies `cmd` and hands back the normalized document.
pub fn on_structural_edit(mut document: Document, cmd: Cmd) -> Result<Document, EditError> {
    document.apply(cmd)?;
    Ok(document)
}
