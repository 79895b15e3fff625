use crate::models::{Block, ListKind};

/// A maximal group of list items of one family at one nesting level.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRun<'a> {
    pub kind: ListKind,
    pub items: Vec<ListNode<'a>>,
}

/// One list item with the runs nested under it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode<'a> {
    /// Index of the item in the sibling sequence it came from
    pub index: usize,
    pub block: &'a Block,
    pub children: Vec<ListRun<'a>>,
}

/// Groups the flat list items of a sibling sequence into nested runs.
///
/// A non-list block ends every open run. Items of a different family never
/// join an existing run at their depth; they start a new one beside it.
pub fn runs(blocks: &[Block]) -> Vec<ListRun<'_>> {
    let mut result = Vec::new();
    let mut segment: Vec<ListRun<'_>> = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        let Block::ListItem { kind, depth, .. } = block else {
            result.append(&mut segment);
            continue;
        };
        let node = ListNode {
            index,
            block,
            children: Vec::new(),
        };
        insert_list_item_at_depth(&mut segment, node, *kind, *depth);
    }
    result.append(&mut segment);
    result
}

fn insert_list_item_at_depth<'a>(
    runs: &mut Vec<ListRun<'a>>,
    node: ListNode<'a>,
    kind: ListKind,
    target_depth: usize,
) {
    if target_depth > 0
        && let Some(parent) = runs.last_mut().and_then(|run| run.items.last_mut())
    {
        insert_list_item_at_depth(&mut parent.children, node, kind, target_depth - 1);
        return;
    }

    match runs.last_mut() {
        Some(run) if run.kind.same_family(kind) => run.items.push(node),
        _ => runs.push(ListRun {
            kind,
            items: vec![node],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Leaf;

    fn item(kind: ListKind, depth: usize) -> Block {
        Block::list_item(kind, depth, vec![Leaf::new("x").into()])
    }

    #[test]
    fn nests_by_depth() {
        let blocks = vec![
            item(ListKind::Unordered, 0),
            item(ListKind::Unordered, 1),
            item(ListKind::Unordered, 1),
            item(ListKind::Unordered, 0),
        ];
        let runs = runs(&blocks);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].items.len(), 2);
        assert_eq!(runs[0].items[0].children[0].items.len(), 2);
        assert_eq!(runs[0].items[1].index, 3);
    }

    #[test]
    fn kind_change_at_root_starts_new_run() {
        let blocks = vec![item(ListKind::Unordered, 0), item(ListKind::Ordered, 0)];
        let runs = runs(&blocks);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].kind, ListKind::Ordered);
    }

    #[test]
    fn mixed_kinds_under_one_parent_stay_separate() {
        let blocks = vec![
            item(ListKind::Unordered, 0),
            item(ListKind::Ordered, 1),
            item(ListKind::Task { checked: false }, 1),
            item(ListKind::Task { checked: true }, 1),
        ];
        let runs = runs(&blocks);
        let children = &runs[0].items[0].children;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind, ListKind::Ordered);
        assert_eq!(children[1].items.len(), 2);
    }

    #[test]
    fn paragraph_splits_runs() {
        let blocks = vec![
            item(ListKind::Unordered, 0),
            Block::paragraph(vec![Leaf::new("p").into()]),
            item(ListKind::Unordered, 0),
        ];
        assert_eq!(runs(&blocks).len(), 2);
    }
}
