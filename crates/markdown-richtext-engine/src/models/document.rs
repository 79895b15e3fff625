use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::block::Block;

/// Address of a block: one index per nesting level.
///
/// `[2]` is the third top-level block, `[2, 0]` the first child of that block
/// when it is a block quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPath(pub Vec<usize>);

impl BlockPath {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits into the container path and the index within that container.
    pub fn split_last(&self) -> Option<(&[usize], usize)> {
        let (last, parent) = self.0.split_last()?;
        Some((parent, *last))
    }
}

impl From<usize> for BlockPath {
    fn from(index: usize) -> Self {
        Self(vec![index])
    }
}

impl From<Vec<usize>> for BlockPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(usize::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

impl FromStr for BlockPath {
    type Err = std::num::ParseIntError;

    /// Parses the dotted form produced by `Display`, e.g. `"2.0"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.')
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(BlockPath)
    }
}

/// The document tree: an ordered list of top-level blocks.
///
/// The document exclusively owns its blocks. Readers get shared borrows via
/// [`Document::blocks`]; all mutation goes through [`Document::apply`]
/// (see [`crate::editing`]), which re-normalizes before returning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
    /// Incremented on every successful edit
    #[serde(skip)]
    pub(crate) version: u64,
}

impl Document {
    /// Builds a document from host-supplied blocks, normalizing them.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut doc = Self { blocks, version: 0 };
        crate::normalize::normalize_document(&mut doc.blocks);
        doc
    }

    /// Builds a document without normalizing. Used by the parser, which
    /// normalizes as it builds.
    pub(crate) fn from_normalized(blocks: Vec<Block>) -> Self {
        Self { blocks, version: 0 }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Looks a block up by path.
    pub fn get(&self, path: &BlockPath) -> Option<&Block> {
        let (first, rest) = path.0.split_first()?;
        let mut block = self.blocks.get(*first)?;
        for &i in rest {
            block = block.blocks()?.get(i)?;
        }
        Some(block)
    }
}

impl PartialEq for Document {
    /// Structural equality: the edit counter is not part of the content.
    fn eq(&self, other: &Self) -> bool {
        self.blocks == other.blocks
    }
}

impl Eq for Document {}

/// Resolves the sibling list that contains `path` and the index within it.
///
/// Returns `None` if any container along the way is missing or is not a
/// container block. The final index itself is not bounds-checked.
pub(crate) fn siblings_mut<'a>(
    blocks: &'a mut Vec<Block>,
    path: &BlockPath,
) -> Option<(&'a mut Vec<Block>, usize)> {
    let (parent, index) = path.split_last()?;
    let mut siblings = blocks;
    for &i in parent {
        siblings = siblings.get_mut(i)?.blocks_mut()?;
    }
    Some((siblings, index))
}
