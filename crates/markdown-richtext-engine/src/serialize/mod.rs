//! # Markdown Serialization
//!
//! Writes a [`Document`] back to canonical markdown. The output is chosen so
//! that parsing it again yields the same document: delimiters come from the
//! same `kinds` types the parser reads, and anything that would be read as
//! syntax is escaped.
//!
//! - **`inline`**: mark stack, whitespace settling, link and image writing
//! - **`escape`**: text escapes and line-start escapes

mod escape;
mod inline;

use crate::models::{Block, Document, ListKind};
use crate::parsing::blocks::kinds::{BlockQuote, CodeFence, Heading, ListMarker, ThematicBreak};
use crate::parsing::inline::kinds::Link;

use escape::{escape_alt, escape_line_starts};
use inline::render_inlines;

/// Output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Spaces per list depth level.
    pub indent_width: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Serializes with default options.
pub fn serialize_markdown(document: &Document) -> String {
    serialize_with(document, &SerializeOptions::default())
}

pub fn serialize_with(document: &Document, options: &SerializeOptions) -> String {
    let mut out = write_blocks(document.blocks(), options);
    if !out.is_empty() {
        out.push('\n');
    }
    log::debug!(
        "serialized {} blocks into {} bytes",
        document.blocks().len(),
        out.len()
    );
    out
}

/// Ordered-list numbering per depth, restarted whenever a run ends.
#[derive(Debug, Default)]
struct Numbering {
    /// (kind, last number) per depth
    levels: Vec<(ListKind, usize)>,
}

impl Numbering {
    fn next(&mut self, kind: ListKind, depth: usize) -> usize {
        self.levels.truncate(depth + 1);
        match self.levels.get_mut(depth) {
            Some((prev, n)) if prev.same_family(kind) => {
                *prev = kind;
                *n += 1;
                *n
            }
            Some(level) => {
                *level = (kind, 1);
                1
            }
            None => {
                // A skipped level can only come from an unnormalized tree.
                self.levels.resize(depth, (kind, 0));
                self.levels.push((kind, 1));
                1
            }
        }
    }

    fn reset(&mut self) {
        self.levels.clear();
    }
}

fn write_blocks(blocks: &[Block], options: &SerializeOptions) -> String {
    let mut out = String::new();
    let mut numbering = Numbering::default();
    let mut prev: Option<&Block> = None;

    for block in blocks {
        if let Some(prev) = prev {
            let tight = prev.is_list_item() && block.is_list_item();
            out.push_str(if tight { "\n" } else { "\n\n" });
        }
        if !block.is_list_item() {
            numbering.reset();
        }
        write_block(block, options, &mut numbering, &mut out);
        prev = Some(block);
    }
    out
}

fn write_block(block: &Block, options: &SerializeOptions, numbering: &mut Numbering, out: &mut String) {
    match block {
        Block::Paragraph { children } => {
            let mut rendered = render_inlines(children);
            let mut starts = vec![0];
            starts.append(&mut rendered.line_starts);
            escape_line_starts(&mut rendered.text, &starts);
            out.push_str(&rendered.text);
        }
        Block::Heading { level, children } => {
            let rendered = render_inlines(children);
            out.push_str(&Heading::prefix(*level));
            if !rendered.text.is_empty() {
                out.push(' ');
                out.push_str(&rendered.text);
            }
        }
        Block::ListItem {
            kind,
            depth,
            children,
        } => {
            let number = numbering.next(*kind, *depth);
            let mut rendered = render_inlines(children);
            // The first line follows the marker and cannot start a block.
            escape_line_starts(&mut rendered.text, &rendered.line_starts);

            out.push_str(&" ".repeat(options.indent_width.max(1) * depth));
            out.push_str(&ListMarker::render(*kind, number));
            if !rendered.text.is_empty() {
                out.push(' ');
                out.push_str(&rendered.text);
            }
        }
        Block::CodeBlock { language, code } => {
            let fence = CodeFence::fence_for(code, language.as_deref());
            out.push_str(&fence);
            out.push_str(language.as_deref().unwrap_or_default());
            out.push('\n');
            if !code.is_empty() {
                out.push_str(code);
                out.push('\n');
            }
            out.push_str(&fence);
        }
        Block::ImageBlock { url, alt, title } => {
            out.push('!');
            out.push(char::from(Link::OPEN));
            out.push_str(&escape_alt(alt));
            out.push(char::from(Link::CLOSE));
            out.push_str(&Link::render_target(url, title.as_deref()));
        }
        Block::BlockQuote { children } => {
            let inner = write_blocks(children, options);
            let quoted: Vec<String> = inner.split('\n').map(BlockQuote::quote_line).collect();
            out.push_str(&quoted.join("\n"));
        }
        Block::HorizontalRule => out.push_str(ThematicBreak::RULE),
    }
}
