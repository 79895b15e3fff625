pub mod blocks;
pub mod inline;

#[cfg(test)]
mod tests;

use crate::models::{Block, Document};
use crate::normalize::normalize_document;

use blocks::{BlockBuilder, MarkdownLineClassifier};

/// Parses markdown into a normalized document. Never fails: anything not
/// recognized is kept as paragraph text.
pub fn parse_markdown(text: &str) -> Document {
    let mut blocks = parse_blocks(text.lines());
    normalize_document(&mut blocks);
    log::debug!("parsed {} top-level blocks", blocks.len());
    Document::from_normalized(blocks)
}

/// Block phase only: classified lines through the builder. Inline content
/// is parsed but not yet normalized.
pub(crate) fn parse_blocks<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Block> {
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new();

    for line in lines {
        let lc = classifier.classify(line);
        builder.push(&lc);
    }

    builder.finish()
}
