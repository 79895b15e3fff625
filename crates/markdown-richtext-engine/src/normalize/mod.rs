//! Structural normalization of the document tree.
//!
//! Every path that produces a tree (parser, host import, edits) finishes by
//! calling [`normalize_document`], so downstream code can rely on the shapes
//! checked by [`invariants`].

pub mod inlines;
pub mod invariants;
pub mod leaves;

pub use inlines::normalize_inlines;
pub use leaves::normalize_leaves;

use crate::models::Block;
use crate::models::block::HEADING_LEVELS;

/// Normalizes inline runs in every text block, recursing into containers,
/// then clamps heading levels and list depths.
///
/// Edits and tree imports reject bad heading levels before they get here;
/// clamping covers blocks handed straight to [`crate::models::Document::from_blocks`].
pub fn normalize_document(blocks: &mut Vec<Block>) {
    normalize_block_inlines(blocks);
    clamp_heading_levels(blocks);
    crate::lists::normalize_depths(blocks);
    if cfg!(debug_assertions) {
        invariants::check(blocks);
    }
}

fn normalize_block_inlines(blocks: &mut [Block]) {
    for block in blocks {
        if let Some(children) = block.inlines_mut() {
            *children = normalize_inlines(std::mem::take(children));
        } else if let Some(nested) = block.blocks_mut() {
            normalize_block_inlines(nested);
        }
    }
}

fn clamp_heading_levels(blocks: &mut [Block]) {
    for block in blocks {
        match block {
            Block::Heading { level, .. } if !HEADING_LEVELS.contains(&*level) => {
                log::warn!("clamping heading level {level}");
                *level = (*level).clamp(*HEADING_LEVELS.start(), *HEADING_LEVELS.end());
            }
            Block::BlockQuote { children } => clamp_heading_levels(children),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Leaf, ListKind, Mark};
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_inside_quotes() {
        let mut blocks = vec![Block::BlockQuote {
            children: vec![Block::paragraph(vec![
                Leaf::new("a").with(Mark::Bold).into(),
                Leaf::new("b").with(Mark::Bold).into(),
            ])],
        }];
        normalize_document(&mut blocks);
        let inner = blocks[0].blocks().unwrap();
        assert_eq!(
            inner[0].inlines().unwrap(),
            &[Leaf::new("ab").with(Mark::Bold).into()]
        );
    }

    #[test]
    fn clamps_heading_levels() {
        let heading = |level| Block::Heading {
            level,
            children: vec![Leaf::new("h").into()],
        };
        let mut blocks = vec![
            heading(0),
            Block::BlockQuote {
                children: vec![heading(9)],
            },
        ];
        normalize_document(&mut blocks);
        assert_eq!(blocks[0], heading(1));
        assert_eq!(blocks[1].blocks().unwrap(), &[heading(6)]);
    }

    #[test]
    fn clamps_list_depths() {
        let mut blocks = vec![
            Block::list_item(ListKind::Unordered, 3, vec![Leaf::new("a").into()]),
            Block::list_item(ListKind::Unordered, 5, vec![Leaf::new("b").into()]),
        ];
        normalize_document(&mut blocks);
        let depths: Vec<_> = blocks.iter().filter_map(Block::list_depth).collect();
        assert_eq!(depths, vec![0, 1]);
    }
}
