/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones": no other inline parsing occurs inside them.
/// A span opened by N backticks closes at the next run of exactly N.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Content as read between the delimiters: one space is stripped from
    /// each side when both are present and the content is not all spaces.
    pub fn unpad(inner: &str) -> &str {
        if inner.len() >= 2
            && inner.starts_with(' ')
            && inner.ends_with(' ')
            && !inner.bytes().all(|b| b == b' ')
        {
            &inner[1..inner.len() - 1]
        } else {
            inner
        }
    }

    /// Writes `code` as a span that reads back to exactly `code`.
    pub fn render(code: &str) -> String {
        let longest = code
            .split(|c| c != '`')
            .map(str::len)
            .max()
            .unwrap_or(0);
        let fence = "`".repeat(longest + 1);
        let needs_pad = code.starts_with('`')
            || code.ends_with('`')
            || (code.len() >= 2
                && code.starts_with(' ')
                && code.ends_with(' ')
                && !code.bytes().all(|b| b == b' '));
        if needs_pad {
            format!("{fence} {code} {fence}")
        } else {
            format!("{fence}{code}{fence}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpad_strips_one_space_each_side() {
        assert_eq!(CodeSpan::unpad(" a "), "a");
        assert_eq!(CodeSpan::unpad("  a  "), " a ");
        assert_eq!(CodeSpan::unpad("   "), "   ");
        assert_eq!(CodeSpan::unpad(" a"), " a");
    }

    #[test]
    fn render_picks_longer_fence() {
        assert_eq!(CodeSpan::render("x"), "`x`");
        assert_eq!(CodeSpan::render("a`b"), "``a`b``");
        assert_eq!(CodeSpan::render("`a"), "`` `a ``");
        assert_eq!(CodeSpan::render(" a "), "`  a  `");
    }

    #[test]
    fn render_then_unpad_is_identity() {
        for code in ["x", "a`b", "`a", " a ", "``", " "] {
            let rendered = CodeSpan::render(code);
            let n = rendered.bytes().take_while(|&b| b == CodeSpan::TICK).count();
            let inner = &rendered[n..rendered.len() - n];
            assert_eq!(CodeSpan::unpad(inner), code);
        }
    }
}
