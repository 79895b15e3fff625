use crate::editing::EditError;
use crate::models::{Block, BlockPath, document::siblings_mut};

/// Clamps list depths so each item is at most one level below the item
/// before it. An item that does not follow a list item sits at depth 0.
pub fn normalize_depths(blocks: &mut [Block]) {
    let mut prev: Option<usize> = None;
    for block in blocks {
        match block {
            Block::ListItem { depth, .. } => {
                let max = prev.map_or(0, |d| d + 1);
                if *depth > max {
                    log::trace!("clamping list depth {} to {}", depth, max);
                    *depth = max;
                }
                prev = Some(*depth);
            }
            Block::BlockQuote { children } => {
                normalize_depths(children);
                prev = None;
            }
            _ => prev = None,
        }
    }
}

/// End (exclusive) of the subtree rooted at the list item at `index`: the
/// item plus every following item that is deeper than it.
fn subtree_end(siblings: &[Block], index: usize, depth: usize) -> usize {
    siblings[index + 1..]
        .iter()
        .position(|b| b.list_depth().is_none_or(|d| d <= depth))
        .map_or(siblings.len(), |offset| index + 1 + offset)
}

fn shift(siblings: &mut [Block], up: bool) {
    for block in siblings {
        if let Block::ListItem { depth, .. } = block {
            *depth = if up { depth.saturating_sub(1) } else { *depth + 1 };
        }
    }
}

/// Resolves `path` to a list item, returning its siblings, index and depth.
fn locate<'a>(
    blocks: &'a mut Vec<Block>,
    path: &BlockPath,
) -> Result<(&'a mut Vec<Block>, usize, usize), EditError> {
    if path.is_empty() {
        return Err(EditError::EmptyPath);
    }
    let (siblings, index) =
        siblings_mut(blocks, path).ok_or_else(|| EditError::PathNotFound(path.clone()))?;
    let block = siblings
        .get(index)
        .ok_or_else(|| EditError::PathNotFound(path.clone()))?;
    let depth = block
        .list_depth()
        .ok_or_else(|| EditError::NotAListItem(path.clone()))?;
    Ok((siblings, index, depth))
}

/// Moves the list item at `path` and its descendants one level deeper.
///
/// Only legal when the immediately preceding sibling is a list item at the
/// same depth or deeper; otherwise nothing changes. Returns whether the tree
/// changed.
pub(crate) fn indent_in(blocks: &mut Vec<Block>, path: &BlockPath) -> Result<bool, EditError> {
    let (siblings, index, depth) = locate(blocks, path)?;
    let allowed = index > 0
        && siblings[index - 1]
            .list_depth()
            .is_some_and(|prev| prev >= depth);
    if !allowed {
        log::debug!("indent at {} ignored: no preceding item to nest under", path);
        return Ok(false);
    }
    let end = subtree_end(siblings, index, depth);
    shift(&mut siblings[index..end], false);
    Ok(true)
}

/// Moves the list item at `path` and its descendants one level up.
///
/// At depth 0 the item leaves the list and becomes a paragraph with the same
/// inline content. Its former descendants are re-clamped afterwards.
pub(crate) fn outdent_in(blocks: &mut Vec<Block>, path: &BlockPath) -> Result<bool, EditError> {
    let (siblings, index, depth) = locate(blocks, path)?;
    if depth > 0 {
        let end = subtree_end(siblings, index, depth);
        shift(&mut siblings[index..end], true);
        return Ok(true);
    }

    if let Block::ListItem { children, .. } = &mut siblings[index] {
        let children = std::mem::take(children);
        siblings[index] = Block::Paragraph { children };
    }
    log::debug!("outdent at {} turned a root list item into a paragraph", path);
    normalize_depths(siblings);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Leaf, ListKind};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn item(depth: usize, text: &str) -> Block {
        Block::list_item(ListKind::Unordered, depth, vec![Leaf::new(text).into()])
    }

    fn depths(blocks: &[Block]) -> Vec<Option<usize>> {
        blocks.iter().map(Block::list_depth).collect()
    }

    #[rstest]
    #[case(vec![3, 1, 4, 0], vec![0, 1, 2, 0])]
    #[case(vec![0, 1, 2, 2, 1], vec![0, 1, 2, 2, 1])]
    #[case(vec![1, 5], vec![0, 1])]
    fn clamps_depth_jumps(#[case] input: Vec<usize>, #[case] expected: Vec<usize>) {
        let mut blocks: Vec<Block> = input.iter().map(|&d| item(d, "x")).collect();
        normalize_depths(&mut blocks);
        let got: Vec<usize> = blocks.iter().filter_map(Block::list_depth).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn non_list_block_resets_depth() {
        let mut blocks = vec![
            item(0, "a"),
            item(1, "b"),
            Block::paragraph(vec![Leaf::new("p").into()]),
            item(2, "c"),
        ];
        normalize_depths(&mut blocks);
        assert_eq!(depths(&blocks), vec![Some(0), Some(1), None, Some(0)]);
    }

    #[test]
    fn indent_moves_subtree() {
        let mut blocks = vec![item(0, "a"), item(0, "b"), item(1, "c"), item(0, "d")];
        assert!(indent_in(&mut blocks, &BlockPath::from(1)).unwrap());
        assert_eq!(depths(&blocks), vec![Some(0), Some(1), Some(2), Some(0)]);
    }

    #[test]
    fn indent_first_item_is_noop() {
        let mut blocks = vec![item(0, "a"), item(0, "b")];
        assert!(!indent_in(&mut blocks, &BlockPath::from(0)).unwrap());
        assert_eq!(depths(&blocks), vec![Some(0), Some(0)]);
    }

    #[test]
    fn indent_under_shallower_item_is_noop() {
        let mut blocks = vec![item(0, "a"), item(1, "b")];
        assert!(!indent_in(&mut blocks, &BlockPath::from(1)).unwrap());
    }

    #[test]
    fn outdent_moves_subtree_up() {
        let mut blocks = vec![item(0, "a"), item(1, "b"), item(2, "c"), item(1, "d")];
        assert!(outdent_in(&mut blocks, &BlockPath::from(1)).unwrap());
        assert_eq!(depths(&blocks), vec![Some(0), Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn outdent_root_item_becomes_paragraph() {
        let mut blocks = vec![item(0, "a"), item(1, "b"), item(2, "c")];
        outdent_in(&mut blocks, &BlockPath::from(0)).unwrap();
        assert_eq!(blocks[0], Block::paragraph(vec![Leaf::new("a").into()]));
        assert_eq!(depths(&blocks), vec![None, Some(0), Some(1)]);
    }

    #[test]
    fn errors_name_the_path() {
        let mut blocks = vec![Block::paragraph(vec![Leaf::new("p").into()])];
        assert_eq!(
            indent_in(&mut blocks, &BlockPath::from(0)),
            Err(EditError::NotAListItem(BlockPath::from(0)))
        );
        assert_eq!(
            outdent_in(&mut blocks, &BlockPath::from(4)),
            Err(EditError::PathNotFound(BlockPath::from(4)))
        );
        assert_eq!(
            indent_in(&mut blocks, &BlockPath::default()),
            Err(EditError::EmptyPath)
        );
    }

    #[test]
    fn works_inside_quotes() {
        let mut blocks = vec![Block::BlockQuote {
            children: vec![item(0, "a"), item(0, "b")],
        }];
        assert!(indent_in(&mut blocks, &BlockPath::new(vec![0, 1])).unwrap());
        assert_eq!(depths(blocks[0].blocks().unwrap()), vec![Some(0), Some(1)]);
    }
}
