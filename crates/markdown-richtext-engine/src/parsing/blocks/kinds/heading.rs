use std::sync::OnceLock;

use regex::Regex;

/// ATX heading syntax: `#` through `######`.
pub struct Heading;

impl Heading {
    pub const MARK: char = '#';
    pub const MAX_LEVEL: u8 = 6;

    /// Returns (level, text) for a heading line.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = HEADING_REGEX.get_or_init(|| {
            Regex::new(r"^[ ]{0,3}(#{1,6})(?:[ \t]+(.*?))?[ \t]*$").expect("Invalid heading regex")
        });
        let caps = re.captures(line)?;
        let level = caps.get(1)?.as_str().len() as u8;
        let text = caps.get(2).map_or("", |m| m.as_str());
        Some((level, text))
    }

    pub fn prefix(level: u8) -> String {
        Self::MARK
            .to_string()
            .repeat(level.clamp(1, Self::MAX_LEVEL) as usize)
    }
}
