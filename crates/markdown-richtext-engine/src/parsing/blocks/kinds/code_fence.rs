#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    fn byte(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// What a line looks like if it could open or close a fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig<'a> {
    pub kind: FenceKind,
    /// Number of fence characters
    pub len: usize,
    /// Info string after the fence characters, trimmed
    pub info: &'a str,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    pub fn sig(remainder: &str) -> Option<FenceSig<'_>> {
        let t = remainder.trim_start().trim_end_matches(['\r', '\n']);
        let kind = if t.starts_with(Self::BACKTICKS) {
            FenceKind::Backticks
        } else if t.starts_with(Self::TILDES) {
            FenceKind::Tildes
        } else {
            return None;
        };
        let len = t.bytes().take_while(|&b| b == kind.byte()).count();
        let info = t[len..].trim();
        // A backtick in the info string means this is inline code, not a fence.
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some(FenceSig { kind, len, info })
    }

    pub fn closes(open: &FenceSig<'_>, sig: Option<&FenceSig<'_>>) -> bool {
        sig.is_some_and(|s| s.kind == open.kind && s.len >= open.len && s.info.is_empty())
    }

    /// Language tag: the first word of the info string.
    pub fn language(info: &str) -> Option<String> {
        info.split_whitespace().next().map(str::to_string)
    }

    /// A fence long enough that no line of `code` can close it. Tildes are
    /// used when the language tag itself contains a backtick.
    pub fn fence_for(code: &str, language: Option<&str>) -> String {
        let kind = if language.is_some_and(|l| l.contains('`')) {
            FenceKind::Tildes
        } else {
            FenceKind::Backticks
        };
        let longest = code
            .lines()
            .map(|l| l.trim_start().bytes().take_while(|&b| b == kind.byte()).count())
            .max()
            .unwrap_or(0);
        char::from(kind.byte())
            .to_string()
            .repeat(longest.max(2) + 1)
    }
}
