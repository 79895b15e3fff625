use crate::models::BlockPath;

/// Why a structural edit was rejected. A rejected edit leaves the document
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("No block at path {0}")]
    PathNotFound(BlockPath),
    #[error("Empty block path")]
    EmptyPath,
    #[error("Inline index {index} out of range for block {block} ({len} inlines)")]
    IndexOutOfRange {
        block: BlockPath,
        index: usize,
        len: usize,
    },
    #[error("Block {0} does not hold inline text")]
    NotATextBlock(BlockPath),
    #[error("Heading level {level} in block {block} is outside 1..=6")]
    InvalidHeadingLevel { block: BlockPath, level: u8 },
    #[error("Block {0} is not a list item")]
    NotAListItem(BlockPath),
    #[error("Range {start}..{end} out of bounds for block {block} ({len} chars)")]
    RangeOutOfBounds {
        block: BlockPath,
        start: usize,
        end: usize,
        len: usize,
    },
}
