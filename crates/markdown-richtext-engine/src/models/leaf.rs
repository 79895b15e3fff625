use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A boolean inline formatting attribute.
///
/// The declaration order is also the nesting order used when several marks
/// open at the same position: `Code` is always innermost because its content
/// is a raw zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mark {
    Bold,
    Italic,
    Strike,
    Code,
}

/// The set of marks carried by a leaf.
pub type Marks = BTreeSet<Mark>;

/// Atomic text run: a string plus the marks applied to all of it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub marks: Marks,
}

impl Leaf {
    /// Creates an unmarked leaf.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::new(),
        }
    }

    /// Creates a leaf carrying the given marks.
    pub fn with_marks(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// The canonical empty leaf (no text, no marks).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style helper adding one mark.
    #[must_use]
    pub fn with(mut self, mark: Mark) -> Self {
        self.marks.insert(mark);
        self
    }

    pub fn has(&self, mark: Mark) -> bool {
        self.marks.contains(&mark)
    }

    /// True for the canonical empty leaf.
    pub fn is_canonical_empty(&self) -> bool {
        self.text.is_empty() && self.marks.is_empty()
    }

    /// True when the leaf has text and all of it is whitespace.
    pub fn is_whitespace_only(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_whitespace)
    }

    pub fn starts_with_whitespace(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_whitespace)
    }

    pub fn ends_with_whitespace(&self) -> bool {
        self.text.chars().next_back().is_some_and(char::is_whitespace)
    }

    /// Splits off trailing whitespace: `("alpha", " ")` for `"alpha "`.
    pub fn split_trailing_whitespace(self) -> (Leaf, String) {
        let core_len = self.text.trim_end_matches(char::is_whitespace).len();
        let mut text = self.text;
        let tail = text.split_off(core_len);
        (Leaf::with_marks(text, self.marks), tail)
    }

    /// Splits off leading whitespace: `(" ", "bravo")` for `" bravo"`.
    pub fn split_leading_whitespace(self) -> (String, Leaf) {
        let ws_len = self.text.len() - self.text.trim_start_matches(char::is_whitespace).len();
        let mut head = self.text;
        let rest = head.split_off(ws_len);
        (head, Leaf::with_marks(rest, self.marks))
    }
}

/// Marks present in both sets.
pub fn intersect(a: &Marks, b: &Marks) -> Marks {
    a.intersection(b).copied().collect()
}
