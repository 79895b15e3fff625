/// Horizontal rule: three or more of the same `-`, `*` or `_`, spaces allowed.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const RULE: &'static str = "---";

    pub fn matches(line: &str) -> bool {
        let mut chars = line.chars().filter(|c| !matches!(c, ' ' | '\t'));
        let Some(first) = chars.next() else {
            return false;
        };
        if !matches!(first, '-' | '*' | '_') {
            return false;
        }
        let mut count = 1;
        for c in chars {
            if c != first {
                return false;
            }
            count += 1;
        }
        count >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_rules() {
        assert!(ThematicBreak::matches("---"));
        assert!(ThematicBreak::matches(" * * * "));
        assert!(ThematicBreak::matches("_____"));
    }

    #[test]
    fn rejects_other_lines() {
        assert!(!ThematicBreak::matches("--"));
        assert!(!ThematicBreak::matches("-*-"));
        assert!(!ThematicBreak::matches("--- x"));
        assert!(!ThematicBreak::matches(""));
    }
}
