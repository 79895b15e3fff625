use crate::models::Mark;

/// An emphasis delimiter and the mark it toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delim {
    /// `**`
    StarBold,
    /// `__`
    UnderscoreBold,
    /// `*`
    StarItalic,
    /// `_`
    UnderscoreItalic,
    /// `~~`
    Strike,
}

impl Delim {
    /// Checked in this order at each position: longer tokens first.
    pub const ALL: [Delim; 5] = [
        Delim::StarBold,
        Delim::UnderscoreBold,
        Delim::Strike,
        Delim::StarItalic,
        Delim::UnderscoreItalic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Delim::StarBold => "**",
            Delim::UnderscoreBold => "__",
            Delim::StarItalic => "*",
            Delim::UnderscoreItalic => "_",
            Delim::Strike => "~~",
        }
    }

    pub fn token(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    pub fn mark(self) -> Mark {
        match self {
            Delim::StarBold | Delim::UnderscoreBold => Mark::Bold,
            Delim::StarItalic | Delim::UnderscoreItalic => Mark::Italic,
            Delim::Strike => Mark::Strike,
        }
    }

    /// `_` delimiters may not open or close inside a word.
    pub fn is_intraword_sensitive(self) -> bool {
        matches!(self, Delim::UnderscoreBold | Delim::UnderscoreItalic)
    }

    /// Single-char delimiters only close at an odd-length run, so `**` inside
    /// `*...*` is read as bold rather than as the italic closer.
    pub fn needs_odd_run(self) -> bool {
        self.token().len() == 1
    }
}

/// Delimiter strings the serializer writes.
pub struct Emphasis;

impl Emphasis {
    pub const BOLD: &'static str = "**";
    pub const STRIKE: &'static str = "~~";
    pub const ITALIC: &'static str = "_";
    /// Used when `_` would touch an alphanumeric character.
    pub const ITALIC_INTRAWORD: &'static str = "*";
}
