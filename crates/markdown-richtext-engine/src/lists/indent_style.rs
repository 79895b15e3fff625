/// Indentation unit used by a document's nested list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces(usize), // Number of spaces per indent level
    Tabs,
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::Spaces(2)
    }
}

impl IndentStyle {
    /// Convert a leading-whitespace string to a depth level
    pub fn calculate_depth(&self, indent_str: &str) -> usize {
        match self {
            IndentStyle::Tabs => indent_str.chars().take_while(|&c| c == '\t').count(),
            IndentStyle::Spaces(spaces_per_level) => {
                let space_count = indent_str.chars().take_while(|&c| c == ' ').count();
                if space_count == 0 || *spaces_per_level == 0 {
                    0
                } else {
                    space_count / spaces_per_level
                }
            }
        }
    }
}

/// Detect the indent style from the indentation of list marker lines.
///
/// The first non-empty indentation wins; documents with no nested items get
/// two spaces.
pub fn detect_indent_style<'a>(indents: impl IntoIterator<Item = &'a str>) -> IndentStyle {
    for indent in indents {
        if indent.starts_with('\t') {
            return IndentStyle::Tabs;
        }
        let spaces = indent.chars().take_while(|&c| c == ' ').count();
        if spaces > 0 {
            return IndentStyle::Spaces(spaces);
        }
    }
    IndentStyle::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_depth_spaces() {
        let style = IndentStyle::Spaces(2);
        assert_eq!(style.calculate_depth(""), 0);
        assert_eq!(style.calculate_depth("  "), 1);
        assert_eq!(style.calculate_depth("    "), 2);
        assert_eq!(style.calculate_depth("     "), 2); // odd spaces round down

        let style4 = IndentStyle::Spaces(4);
        assert_eq!(style4.calculate_depth("    "), 1);
        assert_eq!(style4.calculate_depth("        "), 2);
    }

    #[test]
    fn test_calculate_depth_tabs() {
        let style = IndentStyle::Tabs;
        assert_eq!(style.calculate_depth(""), 0);
        assert_eq!(style.calculate_depth("\t"), 1);
        assert_eq!(style.calculate_depth("\t\t\t"), 3);
    }

    #[test]
    fn test_detect_first_wins() {
        assert_eq!(detect_indent_style(["", "  ", "    "]), IndentStyle::Spaces(2));
        assert_eq!(detect_indent_style(["", "    ", "  "]), IndentStyle::Spaces(4));
        assert_eq!(detect_indent_style(["\t", "  "]), IndentStyle::Tabs);
    }

    #[test]
    fn test_detect_defaults_to_two_spaces() {
        assert_eq!(detect_indent_style(["", ""]), IndentStyle::Spaces(2));
        assert_eq!(detect_indent_style(Vec::<&str>::new()), IndentStyle::Spaces(2));
    }
}
