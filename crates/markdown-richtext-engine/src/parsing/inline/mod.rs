//! # Inline Parsing
//!
//! Cursor-based recursive descent with explicit raw zones.
//!
//! ## Architecture
//!
//! Inline parsing is separate from block parsing and runs over the joined
//! text of inline-eligible blocks (paragraphs, headings, list item text).
//! Each emphasis run is parsed by a recursive call that receives the set of
//! marks already active; leaves are emitted with that set.
//!
//! - Code spans suppress all other inline parsing inside them
//! - Link text is a run that ends at `]`; nothing opened inside it may
//!   close outside it
//! - A delimiter whose run never closes is rolled back and kept as text
//!
//! ## Modules
//!
//! - **`kinds`**: Inline-specific types with owned delimiters (CodeSpan, Delim, Link)
//! - **`cursor`**: `Cursor` for byte-level scanning with position tracking
//! - **`parser`**: `parse_inline()` main entry point with `try_parse_*` helpers

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::parse_inline;
