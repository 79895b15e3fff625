//! Mapping between host kind-tags and the closed set of block variants.
//!
//! The block model is closed: hosts cannot register new variants. A host that
//! names its blocks differently (for example `unordered-list-item`) supplies
//! aliases here, and imported trees are rewritten to canonical tags before
//! they are deserialized.

use std::collections::HashMap;

use serde_json::Value;

/// Discriminant of [`super::Block`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    Paragraph,
    Heading,
    ListItem,
    CodeBlock,
    ImageBlock,
    BlockQuote,
    HorizontalRule,
}

impl BlockTag {
    pub const ALL: [BlockTag; 7] = [
        BlockTag::Paragraph,
        BlockTag::Heading,
        BlockTag::ListItem,
        BlockTag::CodeBlock,
        BlockTag::ImageBlock,
        BlockTag::BlockQuote,
        BlockTag::HorizontalRule,
    ];

    /// The serde tag written for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockTag::Paragraph => "paragraph",
            BlockTag::Heading => "heading",
            BlockTag::ListItem => "list-item",
            BlockTag::CodeBlock => "code-block",
            BlockTag::ImageBlock => "image-block",
            BlockTag::BlockQuote => "block-quote",
            BlockTag::HorizontalRule => "horizontal-rule",
        }
    }
}

#[derive(Debug, Clone)]
pub struct KindTable {
    tags: HashMap<String, BlockTag>,
}

impl Default for KindTable {
    fn default() -> Self {
        let tags = BlockTag::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), *t))
            .collect();
        Self { tags }
    }
}

impl KindTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `alias` as another name for `target`.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, target: BlockTag) -> Self {
        self.tags.insert(alias.into(), target);
        self
    }

    pub fn resolve(&self, tag: &str) -> Option<BlockTag> {
        self.tags.get(tag).copied()
    }

    /// Rewrites every block `type` in a JSON document tree to its canonical tag.
    ///
    /// Accepts either `{"blocks": [...]}` or a bare array of blocks. Inline
    /// children are left alone. Returns the first unknown tag on failure.
    pub fn canonicalize(&self, tree: &mut Value) -> Result<(), String> {
        match tree {
            Value::Array(blocks) => self.canonicalize_blocks(blocks),
            Value::Object(map) => match map.get_mut("blocks") {
                Some(Value::Array(blocks)) => self.canonicalize_blocks(blocks),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }

    fn canonicalize_blocks(&self, blocks: &mut [Value]) -> Result<(), String> {
        for block in blocks {
            let Some(obj) = block.as_object_mut() else {
                continue;
            };
            let Some(tag) = obj.get("type").and_then(Value::as_str) else {
                continue;
            };
            let resolved = self.resolve(tag).ok_or_else(|| tag.to_string())?;
            obj.insert("type".into(), Value::from(resolved.as_str()));
            if resolved == BlockTag::BlockQuote
                && let Some(Value::Array(children)) = obj.get_mut("children")
            {
                self.canonicalize_blocks(children)?;
            }
        }
        Ok(())
    }
}
