use super::kinds::{BlockQuote, CodeFence, FenceSig, Heading, ListMarker, ThematicBreak};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context. Which facts win is decided by
/// the builder.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// The line without its line ending.
    pub line: &'a str,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// Number of blockquote `>` prefixes found.
    pub quote_depth: u8,
    /// Text content after stripping quote prefixes.
    pub remainder: &'a str,
    /// If the remainder looks like a fence opener/closer.
    pub fence_sig: Option<FenceSig<'a>>,
    /// Heading level and text.
    pub heading: Option<(u8, &'a str)>,
    pub thematic_break: bool,
    pub list_marker: Option<ListMarker<'a>>,
}

impl LineClass<'_> {
    /// Whether the line would start a block other than a paragraph.
    ///
    /// The serializer uses this to decide when a line of paragraph text
    /// needs its first character escaped.
    pub fn starts_block(&self) -> bool {
        self.quote_depth > 0
            || self.fence_sig.is_some()
            || self.heading.is_some()
            || self.thematic_break
            || self.list_marker.is_some()
    }
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        let line = line.trim_end_matches(['\r', '\n']);
        let is_blank = line.trim().is_empty();

        let (quote_depth, idx) = BlockQuote::strip_prefixes(line);
        // Without a quote prefix the indentation belongs to the line.
        let remainder = if quote_depth == 0 { line } else { &line[idx..] };

        LineClass {
            line,
            is_blank,
            quote_depth,
            remainder,
            fence_sig: CodeFence::sig(remainder),
            heading: Heading::parse(remainder),
            thematic_break: ThematicBreak::matches(remainder),
            list_marker: ListMarker::parse(remainder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListKind;

    #[test]
    fn classifies_quote_depth_and_remainder() {
        let lc = MarkdownLineClassifier.classify("> > # Title\r");
        assert_eq!(lc.quote_depth, 2);
        assert_eq!(lc.remainder, "# Title");
        assert_eq!(lc.heading, Some((1, "Title")));
        assert!(lc.starts_block());
    }

    #[test]
    fn blank_lines() {
        assert!(MarkdownLineClassifier.classify("   ").is_blank);
        assert!(!MarkdownLineClassifier.classify(" x ").is_blank);
    }

    #[test]
    fn rule_and_list_both_reported() {
        let lc = MarkdownLineClassifier.classify("- - -");
        assert!(lc.thematic_break);
        assert_eq!(lc.list_marker.map(|m| m.kind), Some(ListKind::Unordered));
    }

    #[test]
    fn plain_text_starts_nothing() {
        let lc = MarkdownLineClassifier.classify("just words");
        assert!(!lc.starts_block());
        assert_eq!(lc.fence_sig, None);
    }
}
