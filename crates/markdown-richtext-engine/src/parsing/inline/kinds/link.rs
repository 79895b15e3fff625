/// Link and image syntax: `[text](dest "title")`, `![alt](dest "title")`.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const IMAGE_OPEN: &'static [u8; 2] = b"![";
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    pub const TITLE_QUOTE: u8 = b'"';

    /// Writes a destination, wrapping it in `<>` when it would not survive
    /// as a bare destination.
    pub fn render_dest(dest: &str) -> String {
        if dest.is_empty() || dest.contains([' ', '\t', '\n', '(', ')', '<', '>']) {
            format!("<{dest}>")
        } else {
            dest.to_string()
        }
    }

    pub fn render_title(title: &str) -> String {
        let escaped = title.replace('\\', "\\\\").replace('"', "\\\"");
        format!(" \"{escaped}\"")
    }

    /// The `(dest "title")` tail of a link or image.
    pub fn render_target(dest: &str, title: Option<&str>) -> String {
        let title = title.map(Self::render_title).unwrap_or_default();
        format!("({}{})", Self::render_dest(dest), title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_targets() {
        assert_eq!(Link::render_target("a.png", None), "(a.png)");
        assert_eq!(Link::render_target("a b", Some("t")), "(<a b> \"t\")");
        assert_eq!(Link::render_target("", Some("say \"hi\"")), "(<> \"say \\\"hi\\\"\")");
    }
}
