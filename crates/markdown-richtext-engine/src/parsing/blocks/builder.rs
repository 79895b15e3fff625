use crate::lists::detect_indent_style;
use crate::models::{Block, Inline, InlineKind, Leaf, ListKind};
use crate::normalize::normalize_inlines;
use crate::parsing::inline::parse_inline;

use super::{
    classify::LineClass,
    kinds::{BlockQuote, CodeFence, FenceSig},
};

#[derive(Debug)]
enum LeafState<'a> {
    None,
    Paragraph {
        lines: Vec<&'a str>,
    },
    ListItem {
        kind: ListKind,
        indent: &'a str,
        lines: Vec<&'a str>,
    },
    Fence {
        sig: FenceSig<'a>,
        lines: Vec<&'a str>,
    },
}

/// Phase 2 of block parsing: a state machine over classified lines.
///
/// Quote lines are collected with one `>` level stripped and parsed
/// recursively when the quote ends. List depths are resolved in
/// [`BlockBuilder::finish`] once the whole sequence has been seen, because
/// the indent unit is decided by the first indented item.
pub struct BlockBuilder<'a> {
    leaf: LeafState<'a>,
    quote: Vec<&'a str>,
    out: Vec<Block>,
    /// (index into `out`, raw indentation) for each list item
    list_indents: Vec<(usize, &'a str)>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new() -> Self {
        Self {
            leaf: LeafState::None,
            quote: vec![],
            out: vec![],
            list_indents: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass<'a>) {
        if self.in_fence() {
            self.consume_fence_line(c);
            return;
        }

        if c.quote_depth > 0 {
            self.flush_leaf();
            if let Some(inner) = BlockQuote::strip_one(c.line) {
                self.quote.push(inner);
            }
            return;
        }
        self.flush_quote();

        if c.is_blank {
            self.flush_leaf();
            return;
        }

        if let Some(sig) = c.fence_sig {
            self.flush_leaf();
            self.leaf = LeafState::Fence { sig, lines: vec![] };
            return;
        }

        if let Some((level, text)) = c.heading {
            self.flush_leaf();
            self.out.push(Block::Heading {
                level,
                children: parse_inline(text.trim()),
            });
            return;
        }

        if c.thematic_break {
            self.flush_leaf();
            self.out.push(Block::HorizontalRule);
            return;
        }

        if let Some(marker) = c.list_marker {
            self.flush_leaf();
            self.leaf = LeafState::ListItem {
                kind: marker.kind,
                indent: marker.indent,
                lines: vec![marker.rest.trim()],
            };
            return;
        }

        let text = c.line.trim();
        match &mut self.leaf {
            // Lazy continuation
            LeafState::Paragraph { lines } | LeafState::ListItem { lines, .. } => lines.push(text),
            LeafState::None | LeafState::Fence { .. } => {
                self.leaf = LeafState::Paragraph { lines: vec![text] };
            }
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush
        self.flush_leaf();
        self.flush_quote();

        let style = detect_indent_style(self.list_indents.iter().map(|(_, indent)| *indent));
        for (index, indent) in self.list_indents {
            if let Some(Block::ListItem { depth, .. }) = self.out.get_mut(index) {
                *depth = style.calculate_depth(indent);
            }
        }
        self.out
    }

    fn in_fence(&self) -> bool {
        matches!(self.leaf, LeafState::Fence { .. })
    }

    fn consume_fence_line(&mut self, c: &LineClass<'a>) {
        let LeafState::Fence { sig, lines } = &mut self.leaf else {
            return;
        };
        if CodeFence::closes(sig, CodeFence::sig(c.line).as_ref()) {
            self.flush_leaf();
        } else {
            lines.push(c.line);
        }
    }

    fn flush_leaf(&mut self) {
        match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None => {}
            LeafState::Paragraph { lines } => {
                let children = normalize_inlines(parse_inline(&lines.join("\n")));
                if let Some(image) = image_block(&children) {
                    self.out.push(image);
                } else if children != [Leaf::empty().into()] {
                    // Content that normalizes away (e.g. a whitespace code
                    // span) leaves nothing a reader could see.
                    self.out.push(Block::Paragraph { children });
                }
            }
            LeafState::ListItem {
                kind,
                indent,
                lines,
            } => {
                self.list_indents.push((self.out.len(), indent));
                self.out.push(Block::ListItem {
                    kind,
                    depth: 0,
                    children: parse_inline(&lines.join("\n")),
                });
            }
            LeafState::Fence { sig, lines } => {
                self.out.push(Block::CodeBlock {
                    language: CodeFence::language(sig.info),
                    code: lines.join("\n"),
                });
            }
        }
    }

    fn flush_quote(&mut self) {
        if self.quote.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.quote);
        self.out.push(Block::BlockQuote {
            children: crate::parsing::parse_blocks(lines),
        });
    }
}

/// A paragraph whose only content is one image is an image block.
fn image_block(children: &[Inline]) -> Option<Block> {
    let [Inline::Leaf(before), Inline::Element(el), Inline::Leaf(after)] = children else {
        return None;
    };
    if !before.is_canonical_empty() || !after.is_canonical_empty() {
        return None;
    }
    match &el.kind {
        InlineKind::Image { url, alt, title } => Some(Block::ImageBlock {
            url: url.clone(),
            alt: alt.clone(),
            title: title.clone(),
        }),
        InlineKind::Link { .. } => None,
    }
}

impl Default for BlockBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::MarkdownLineClassifier;
    use pretty_assertions::assert_eq;

    fn build(md: &str) -> Vec<Block> {
        let mut builder = BlockBuilder::new();
        for line in md.lines() {
            builder.push(&MarkdownLineClassifier.classify(line));
        }
        builder.finish()
    }

    fn tags(blocks: &[Block]) -> Vec<&'static str> {
        blocks.iter().map(|b| b.tag().as_str()).collect()
    }

    #[test]
    fn fence_is_a_raw_zone() {
        let blocks = build("```rust\n# not heading\n\n> not quote\n```\nafter");
        assert_eq!(
            blocks[0],
            Block::CodeBlock {
                language: Some("rust".into()),
                code: "# not heading\n\n> not quote".into(),
            }
        );
        assert_eq!(tags(&blocks), vec!["code-block", "paragraph"]);
    }

    #[test]
    fn unterminated_fence_runs_to_eof() {
        let blocks = build("~~~\na\nb");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: None,
                code: "a\nb".into(),
            }]
        );
    }

    #[test]
    fn list_depths_follow_first_indent() {
        let blocks = build("- a\n    - b\n        - c\n    - d");
        let depths: Vec<_> = blocks.iter().filter_map(Block::list_depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1]);
    }

    #[test]
    fn lazy_continuation_joins_list_item() {
        let blocks = build("- first\ncontinued\n- second");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].plain_text(), "first\ncontinued");
    }

    #[test]
    fn quote_lines_nest() {
        let blocks = build("> a\n> > b\n\nc");
        assert_eq!(tags(&blocks), vec!["block-quote", "paragraph"]);
        let inner = blocks[0].blocks().unwrap();
        assert_eq!(tags(inner), vec!["paragraph", "block-quote"]);
    }

    #[test]
    fn heading_rule_and_image_lines() {
        let blocks = build("## Title\n---\n![alt](a.png \"t\")");
        assert_eq!(tags(&blocks), vec!["heading", "horizontal-rule", "image-block"]);
    }

    #[test]
    fn image_inside_paragraph_stays_inline() {
        let blocks = build("text\n![alt](a.png)");
        assert_eq!(tags(&blocks), vec!["paragraph"]);
        let blocks = build("![alt](a.png)\ntext");
        assert_eq!(tags(&blocks), vec!["paragraph"]);
    }

    #[test]
    fn marked_lone_image_is_still_a_block() {
        let blocks = build("**![alt](a.png)**");
        assert_eq!(
            blocks,
            vec![Block::ImageBlock {
                url: "a.png".into(),
                alt: "alt".into(),
                title: None,
            }]
        );
    }
}
