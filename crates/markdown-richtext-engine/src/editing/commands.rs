use std::ops::Range;

use crate::editing::{EditError, Patch, marks};
use crate::lists;
use crate::models::{Block, BlockPath, Document, Inline, Mark, document::siblings_mut};
use crate::normalize::normalize_document;

/// A structural edit. Every mutation of a [`Document`] is one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertBlock {
        at: BlockPath,
        block: Block,
    },
    RemoveBlock {
        at: BlockPath,
    },
    /// `to` addresses the position after `from` has been removed.
    MoveBlock {
        from: BlockPath,
        to: BlockPath,
    },
    InsertInline {
        block: BlockPath,
        index: usize,
        inline: Inline,
    },
    RemoveInline {
        block: BlockPath,
        index: usize,
    },
    /// Range is in chars over the block's text; link text counts, images
    /// do not.
    SetMark {
        block: BlockPath,
        range: Range<usize>,
        mark: Mark,
        active: bool,
    },
    Indent {
        at: BlockPath,
    },
    Outdent {
        at: BlockPath,
    },
}

impl Document {
    /// Applies a command, then re-normalizes.
    ///
    /// The command runs against a working copy that only replaces the
    /// document's blocks on success. The version counter moves only when the
    /// content actually changed.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        log::debug!("apply {:?}", cmd);
        let mut working = self.blocks.clone();
        let changed = apply_to(&mut working, cmd)?;
        normalize_document(&mut working);

        if working != self.blocks {
            self.blocks = working;
            self.version += 1;
        }
        Ok(Patch {
            changed,
            version: self.version,
        })
    }
}

fn apply_to(blocks: &mut Vec<Block>, cmd: Cmd) -> Result<BlockPath, EditError> {
    match cmd {
        Cmd::InsertBlock { at, block } => {
            if let Some(level) = block.invalid_heading_level() {
                return Err(EditError::InvalidHeadingLevel { block: at, level });
            }
            insert_block(blocks, &at, block)?;
            Ok(at)
        }
        Cmd::RemoveBlock { at } => {
            remove_block(blocks, &at)?;
            Ok(at)
        }
        Cmd::MoveBlock { from, to } => {
            let block = remove_block(blocks, &from)?;
            insert_block(blocks, &to, block)?;
            Ok(to)
        }
        Cmd::InsertInline {
            block,
            index,
            inline,
        } => {
            let inlines = text_block_mut(blocks, &block)?;
            if index > inlines.len() {
                return Err(EditError::IndexOutOfRange {
                    block,
                    index,
                    len: inlines.len(),
                });
            }
            inlines.insert(index, inline);
            Ok(block)
        }
        Cmd::RemoveInline { block, index } => {
            let inlines = text_block_mut(blocks, &block)?;
            if index >= inlines.len() {
                return Err(EditError::IndexOutOfRange {
                    block,
                    index,
                    len: inlines.len(),
                });
            }
            inlines.remove(index);
            Ok(block)
        }
        Cmd::SetMark {
            block,
            range,
            mark,
            active,
        } => {
            let inlines = text_block_mut(blocks, &block)?;
            let len = marks::text_len(inlines);
            if range.start > range.end || range.end > len {
                return Err(EditError::RangeOutOfBounds {
                    block,
                    start: range.start,
                    end: range.end,
                    len,
                });
            }
            *inlines = marks::set_mark(std::mem::take(inlines), &range, mark, active);
            Ok(block)
        }
        Cmd::Indent { at } => {
            lists::indent_in(blocks, &at)?;
            Ok(at)
        }
        Cmd::Outdent { at } => {
            lists::outdent_in(blocks, &at)?;
            Ok(at)
        }
    }
}

fn resolve<'a>(blocks: &'a mut Vec<Block>, path: &BlockPath) -> Result<(&'a mut Vec<Block>, usize), EditError> {
    if path.is_empty() {
        return Err(EditError::EmptyPath);
    }
    siblings_mut(blocks, path).ok_or_else(|| EditError::PathNotFound(path.clone()))
}

fn insert_block(blocks: &mut Vec<Block>, at: &BlockPath, block: Block) -> Result<(), EditError> {
    let (siblings, index) = resolve(blocks, at)?;
    if index > siblings.len() {
        return Err(EditError::PathNotFound(at.clone()));
    }
    siblings.insert(index, block);
    Ok(())
}

fn remove_block(blocks: &mut Vec<Block>, at: &BlockPath) -> Result<Block, EditError> {
    let (siblings, index) = resolve(blocks, at)?;
    if index >= siblings.len() {
        return Err(EditError::PathNotFound(at.clone()));
    }
    Ok(siblings.remove(index))
}

fn text_block_mut<'a>(blocks: &'a mut Vec<Block>, path: &BlockPath) -> Result<&'a mut Vec<Inline>, EditError> {
    let (siblings, index) = resolve(blocks, path)?;
    siblings
        .get_mut(index)
        .ok_or_else(|| EditError::PathNotFound(path.clone()))?
        .inlines_mut()
        .ok_or_else(|| EditError::NotATextBlock(path.clone()))
}
