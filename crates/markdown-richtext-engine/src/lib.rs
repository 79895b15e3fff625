//! # markdown-richtext-engine
//!
//! Converts between markdown text and a rich-document tree of blocks whose
//! text is held in runs of marked leaves, and keeps that tree normalized
//! while it is edited.
//!
//! ```rust
//! use markdown_richtext_engine::{parse_markdown, serialize_markdown};
//!
//! let doc = parse_markdown("**[alpha _bravo_](url)**");
//! assert_eq!(serialize_markdown(&doc), "**[alpha _bravo_](url)**\n");
//! ```
//!
//! ## Modules
//!
//! - **`models`**: `Document`, `Block`, `Inline`, `Leaf`, `Mark`, `BlockPath`
//! - **`normalize`**: leaf-run and element-flanking normalization, invariant checks
//! - **`lists`**: list depth clamp, indent/outdent, nested run view
//! - **`parsing`**: markdown to tree
//! - **`serialize`**: tree to markdown
//! - **`editing`**: `Cmd` structural edits applied through `Document::apply`
//! - **`io`**: markdown files and JSON trees on disk

pub mod editing;
pub mod io;
pub mod lists;
pub mod models;
pub mod normalize;
pub mod parsing;
pub mod serialize;

pub use editing::{Cmd, EditError, Patch, on_structural_edit};
pub use lists::{indent, outdent};
pub use models::{
    Block, BlockPath, BlockTag, Document, Inline, InlineElement, InlineKind, KindTable, Leaf,
    ListKind, Mark, Marks,
};
pub use normalize::{normalize_inlines, normalize_leaves};
pub use parsing::parse_markdown;
pub use serialize::{SerializeOptions, serialize_markdown, serialize_with};
