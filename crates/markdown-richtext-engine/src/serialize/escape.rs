use crate::parsing::blocks::MarkdownLineClassifier;

/// Characters that would be read as inline syntax.
const INLINE_SPECIAL: [char; 7] = ['\\', '*', '_', '`', '[', ']', '~'];

/// Characters that would end or nest the alt text of an image.
const ALT_SPECIAL: [char; 3] = ['\\', '[', ']'];

pub(crate) fn escape_text(text: &str, out: &mut String) {
    escape_with(text, &INLINE_SPECIAL, out);
}

pub(crate) fn escape_alt(alt: &str) -> String {
    let mut out = String::with_capacity(alt.len());
    escape_with(alt, &ALT_SPECIAL, &mut out);
    out
}

fn escape_with(text: &str, special: &[char], out: &mut String) {
    for c in text.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Escapes the lines starting at `line_starts` (byte offsets into `text`)
/// that would otherwise open a block: `# x`, `> x`, `- x`, `1. x`, `---`.
pub(crate) fn escape_line_starts(text: &mut String, line_starts: &[usize]) {
    let classifier = MarkdownLineClassifier;
    for &start in line_starts.iter().rev() {
        let line = text[start..].split('\n').next().unwrap_or_default();
        if !classifier.classify(line).starts_block() {
            continue;
        }
        // `1.` is escaped at its punctuation, `\1.` would not help
        let digits = line.bytes().take_while(u8::is_ascii_digit).count();
        let at = if digits > 0 && matches!(line.as_bytes().get(digits), Some(b'.' | b')')) {
            start + digits
        } else {
            start
        };
        text.insert(at, '\\');
    }
}
