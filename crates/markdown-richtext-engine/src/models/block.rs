use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::inline::{Inline, plain_text};
use super::kinds::BlockTag;

/// Levels a heading may take.
pub const HEADING_LEVELS: RangeInclusive<u8> = 1..=6;

/// Marker family of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListKind {
    /// `- item`
    Unordered,
    /// `1. item`
    Ordered,
    /// `- [ ] item` / `- [x] item`
    Task { checked: bool },
}

impl ListKind {
    /// Whether two kinds belong to the same list run.
    ///
    /// Task items form their own run regardless of the checkbox state.
    pub fn same_family(self, other: ListKind) -> bool {
        matches!(
            (self, other),
            (ListKind::Unordered, ListKind::Unordered)
                | (ListKind::Ordered, ListKind::Ordered)
                | (ListKind::Task { .. }, ListKind::Task { .. })
        )
    }
}

/// A structural node of the document.
///
/// Text-bearing variants own a run of [`Inline`]s; `BlockQuote` is the only
/// container variant and owns nested blocks. List items are stored flat with
/// an explicit depth, see [`crate::lists`] for the nested view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    Paragraph {
        children: Vec<Inline>,
    },
    Heading {
        level: u8,
        children: Vec<Inline>,
    },
    ListItem {
        kind: ListKind,
        depth: usize,
        children: Vec<Inline>,
    },
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        code: String,
    },
    ImageBlock {
        url: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    BlockQuote {
        children: Vec<Block>,
    },
    HorizontalRule,
}

impl Block {
    pub fn paragraph(children: Vec<Inline>) -> Self {
        Block::Paragraph { children }
    }

    pub fn list_item(kind: ListKind, depth: usize, children: Vec<Inline>) -> Self {
        Block::ListItem {
            kind,
            depth,
            children,
        }
    }

    pub fn tag(&self) -> BlockTag {
        match self {
            Block::Paragraph { .. } => BlockTag::Paragraph,
            Block::Heading { .. } => BlockTag::Heading,
            Block::ListItem { .. } => BlockTag::ListItem,
            Block::CodeBlock { .. } => BlockTag::CodeBlock,
            Block::ImageBlock { .. } => BlockTag::ImageBlock,
            Block::BlockQuote { .. } => BlockTag::BlockQuote,
            Block::HorizontalRule => BlockTag::HorizontalRule,
        }
    }

    /// Inline children of a text-bearing block.
    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Block::Paragraph { children }
            | Block::Heading { children, .. }
            | Block::ListItem { children, .. } => Some(children),
            Block::CodeBlock { .. }
            | Block::ImageBlock { .. }
            | Block::BlockQuote { .. }
            | Block::HorizontalRule => None,
        }
    }

    pub fn inlines_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            Block::Paragraph { children }
            | Block::Heading { children, .. }
            | Block::ListItem { children, .. } => Some(children),
            Block::CodeBlock { .. }
            | Block::ImageBlock { .. }
            | Block::BlockQuote { .. }
            | Block::HorizontalRule => None,
        }
    }

    /// Nested blocks of a container block.
    pub fn blocks(&self) -> Option<&[Block]> {
        match self {
            Block::BlockQuote { children } => Some(children),
            _ => None,
        }
    }

    pub fn blocks_mut(&mut self) -> Option<&mut Vec<Block>> {
        match self {
            Block::BlockQuote { children } => Some(children),
            _ => None,
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::ListItem { .. })
    }

    pub fn list_depth(&self) -> Option<usize> {
        match self {
            Block::ListItem { depth, .. } => Some(*depth),
            _ => None,
        }
    }

    /// First heading level outside [`HEADING_LEVELS`], searching quoted
    /// blocks too.
    pub fn invalid_heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } if !HEADING_LEVELS.contains(level) => Some(*level),
            Block::BlockQuote { children } => {
                children.iter().find_map(Block::invalid_heading_level)
            }
            _ => None,
        }
    }

    /// Rendered text of the block, without markup.
    pub fn plain_text(&self) -> String {
        match self {
            Block::CodeBlock { code, .. } => code.clone(),
            Block::ImageBlock { .. } | Block::HorizontalRule => String::new(),
            Block::BlockQuote { children } => children
                .iter()
                .map(Block::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Paragraph { children }
            | Block::Heading { children, .. }
            | Block::ListItem { children, .. } => plain_text(children),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Leaf;

    #[test]
    fn task_items_share_a_family() {
        assert!(ListKind::Task { checked: true }.same_family(ListKind::Task { checked: false }));
        assert!(!ListKind::Ordered.same_family(ListKind::Unordered));
    }

    #[test]
    fn only_text_blocks_expose_inlines() {
        let p = Block::paragraph(vec![Leaf::new("a").into()]);
        assert!(p.inlines().is_some());
        let code = Block::CodeBlock {
            language: None,
            code: "x".into(),
        };
        assert!(code.inlines().is_none());
        assert_eq!(code.plain_text(), "x");
    }

    #[test]
    fn heading_level_is_checked_through_quotes() {
        let heading = |level| Block::Heading {
            level,
            children: vec![Leaf::new("h").into()],
        };
        assert_eq!(heading(6).invalid_heading_level(), None);
        assert_eq!(heading(0).invalid_heading_level(), Some(0));
        let quote = Block::BlockQuote {
            children: vec![heading(2), heading(9)],
        };
        assert_eq!(quote.invalid_heading_level(), Some(9));
    }

    #[test]
    fn serde_uses_kebab_case_tags() {
        let item = Block::list_item(ListKind::Ordered, 1, vec![Leaf::new("a").into()]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "list-item");
        assert_eq!(json["kind"], "ordered");
        assert_eq!(json["depth"], 1);

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
