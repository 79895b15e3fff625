//! Post-normalization shape checks.
//!
//! [`find_violation`] reports the first broken invariant; [`check`] panics on
//! it and runs after every normalization in debug builds.

use thiserror::Error;

use crate::models::block::HEADING_LEVELS;
use crate::models::{Block, BlockPath, Inline, InlineKind, Leaf};

use super::leaves::{is_loose_whitespace, is_pinned};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("block {path}: empty leaf at {index} in a run that has text")]
    StrayEmptyLeaf { path: BlockPath, index: usize },
    #[error("block {path}: leaf {index} carries the same marks as the next leaf")]
    UncoalescedLeaves { path: BlockPath, index: usize },
    #[error("block {path}: whitespace-only run at {index} with no element beside it")]
    LooseWhitespace { path: BlockPath, index: usize },
    #[error("block {path}: inline element at {index} is not flanked by leaves")]
    UnflankedElement { path: BlockPath, index: usize },
    #[error("block {path}: image at {index} has children")]
    ImageWithChildren { path: BlockPath, index: usize },
    #[error("block {path}: link at {index} has unnormalized children")]
    LinkChildren { path: BlockPath, index: usize },
    #[error("block {path}: text block has no inline children")]
    NoInlines { path: BlockPath },
    #[error("block {path}: heading level {level} outside 1..=6")]
    HeadingLevel { path: BlockPath, level: u8 },
    #[error("block {path}: list depth {depth} exceeds allowed {max}")]
    ListDepth {
        path: BlockPath,
        depth: usize,
        max: usize,
    },
}

/// Panics with a description of the first violation, if any.
pub fn check(blocks: &[Block]) {
    if let Some(violation) = find_violation(blocks) {
        panic!("normalization invariant violated: {violation}");
    }
}

pub fn find_violation(blocks: &[Block]) -> Option<Violation> {
    walk(blocks, &mut Vec::new())
}

fn walk(blocks: &[Block], prefix: &mut Vec<usize>) -> Option<Violation> {
    let mut max_depth = 0;
    for (i, block) in blocks.iter().enumerate() {
        prefix.push(i);
        let path = BlockPath::new(prefix.clone());

        match block {
            Block::ListItem { depth, .. } => {
                if *depth > max_depth {
                    prefix.pop();
                    return Some(Violation::ListDepth {
                        path,
                        depth: *depth,
                        max: max_depth,
                    });
                }
                max_depth = depth + 1;
            }
            _ => max_depth = 0,
        }

        if let Block::Heading { level, .. } = block
            && !HEADING_LEVELS.contains(level)
        {
            prefix.pop();
            return Some(Violation::HeadingLevel {
                path,
                level: *level,
            });
        }

        let found = match (block.inlines(), block.blocks()) {
            (Some(inlines), _) => check_inlines(inlines, &path),
            (None, Some(nested)) => walk(nested, prefix),
            (None, None) => None,
        };
        prefix.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

fn check_inlines(inlines: &[Inline], path: &BlockPath) -> Option<Violation> {
    if inlines.is_empty() {
        return Some(Violation::NoInlines { path: path.clone() });
    }

    // Leaf runs between elements, remembering where each starts.
    let mut run_start = 0;
    for (i, inline) in inlines.iter().enumerate() {
        let Inline::Element(el) = inline else {
            continue;
        };
        let flanked = i > 0
            && inlines[i - 1].as_leaf().is_some()
            && inlines.get(i + 1).is_some_and(|n| n.as_leaf().is_some());
        if !flanked {
            return Some(Violation::UnflankedElement {
                path: path.clone(),
                index: i,
            });
        }
        match &el.kind {
            InlineKind::Image { .. } if el.children != [Leaf::empty()] => {
                return Some(Violation::ImageWithChildren {
                    path: path.clone(),
                    index: i,
                });
            }
            InlineKind::Link { .. } if check_run(&el.children, false, path, 0).is_some() => {
                return Some(Violation::LinkChildren {
                    path: path.clone(),
                    index: i,
                });
            }
            _ => {}
        }
        let run = leaves_of(&inlines[run_start..i]);
        if let Some(v) = check_run(&run, true, path, run_start) {
            return Some(v);
        }
        run_start = i + 1;
    }

    let bounded = run_start > 0;
    let run = leaves_of(&inlines[run_start..]);
    check_run(&run, bounded, path, run_start)
}

fn leaves_of(inlines: &[Inline]) -> Vec<Leaf> {
    inlines.iter().filter_map(Inline::as_leaf).cloned().collect()
}

fn check_run(run: &[Leaf], bounded: bool, path: &BlockPath, offset: usize) -> Option<Violation> {
    if run.is_empty() {
        return Some(Violation::NoInlines { path: path.clone() });
    }
    if run.len() > 1
        && let Some(i) = run.iter().position(|l| l.text.is_empty())
    {
        return Some(Violation::StrayEmptyLeaf {
            path: path.clone(),
            index: offset + i,
        });
    }
    if !bounded && run.iter().all(is_loose_whitespace) {
        return Some(Violation::LooseWhitespace {
            path: path.clone(),
            index: offset,
        });
    }
    for i in 0..run.len().saturating_sub(1) {
        if run[i].marks == run[i + 1].marks && !is_pinned(run, i) && !is_pinned(run, i + 1) {
            return Some(Violation::UncoalescedLeaves {
                path: path.clone(),
                index: offset + i,
            });
        }
    }
    None
}
