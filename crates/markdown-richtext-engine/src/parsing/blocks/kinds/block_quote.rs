/// Blockquote block type with owned delimiter constant.
///
/// All blockquote syntax knowledge lives here; the classifier, the builder
/// and the serializer call into it rather than hardcoding `>`.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips blockquote prefixes from a line, returning (depth, byte_offset).
    ///
    /// Handles various forms: `> text`, `>> nested`, `> > spaced nested`.
    pub fn strip_prefixes(s: &str) -> (u8, usize) {
        let b = s.as_bytes();
        let mut i = 0usize;
        let mut depth = 0u8;

        loop {
            while i < b.len() && b[i] == b' ' {
                i += 1;
            }
            if i < b.len() && b[i] == (Self::PREFIX as u8) {
                depth = depth.saturating_add(1);
                i += 1;
                if i < b.len() && b[i] == b' ' {
                    i += 1;
                }
            } else {
                break;
            }
        }
        (depth, i)
    }

    /// Strips exactly one quote level, keeping any deeper prefixes.
    ///
    /// Returns `None` when the line is not quoted.
    pub fn strip_one(s: &str) -> Option<&str> {
        let rest = s.trim_start_matches(' ').strip_prefix(Self::PREFIX)?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }

    /// Prefixes one line of quoted content.
    pub fn quote_line(line: &str) -> String {
        if line.is_empty() {
            Self::PREFIX.to_string()
        } else {
            format!("{} {}", Self::PREFIX, line)
        }
    }
}
