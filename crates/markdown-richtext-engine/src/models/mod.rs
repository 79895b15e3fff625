pub mod block;
pub mod document;
pub mod inline;
pub mod kinds;
pub mod leaf;

pub use block::{Block, ListKind};
pub use document::{BlockPath, Document};
pub use inline::{Inline, InlineElement, InlineKind};
pub use kinds::{BlockTag, KindTable};
pub use leaf::{Leaf, Mark, Marks};
