//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK = b'\`'`, a raw zone that suppresses other parsing
//! - **`Delim`** / **`Emphasis`**: `**`, `__`, `*`, `_`, `~~`
//! - **`Link`**: `[`, `]`, `![`, `(`, `)` and title quoting
//!
//! The parser and serializer call these constants; neither hardcodes `[` or `` ` ``.

pub mod code_span;
pub mod emphasis;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::{Delim, Emphasis};
pub use link::Link;
