use serde::{Deserialize, Serialize};

use super::leaf::{Leaf, Marks, intersect};

/// What an inline element is, with its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InlineKind {
    /// `[text](href "title")`
    Link {
        href: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// `![alt](url "title")` inside a line of text.
    Image {
        url: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

/// A non-text inline node owning its own leaf children.
///
/// Images are void: their children are always a single empty leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineElement {
    #[serde(flatten)]
    pub kind: InlineKind,
    pub children: Vec<Leaf>,
}

impl InlineElement {
    pub fn link(href: impl Into<String>, children: Vec<Leaf>) -> Self {
        Self {
            kind: InlineKind::Link {
                href: href.into(),
                title: None,
            },
            children,
        }
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            kind: InlineKind::Image {
                url: url.into(),
                alt: alt.into(),
                title: None,
            },
            children: vec![Leaf::empty()],
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, InlineKind::Image { .. })
    }

    /// Marks shared by every non-empty child leaf.
    ///
    /// These are the marks that serialize outside the element's delimiters.
    pub fn common_marks(&self) -> Marks {
        let mut texts = self.children.iter().filter(|l| !l.text.is_empty());
        let Some(first) = texts.next() else {
            return Marks::new();
        };
        texts.fold(first.marks.clone(), |acc, l| intersect(&acc, &l.marks))
    }

    pub fn plain_text(&self) -> String {
        match &self.kind {
            InlineKind::Link { .. } => self.children.iter().map(|l| l.text.as_str()).collect(),
            InlineKind::Image { .. } => String::new(),
        }
    }
}

/// A child of a text-bearing block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Inline {
    Leaf(Leaf),
    Element(InlineElement),
}

impl Inline {
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Inline::Leaf(leaf) => Some(leaf),
            Inline::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&InlineElement> {
        match self {
            Inline::Leaf(_) => None,
            Inline::Element(el) => Some(el),
        }
    }
}

impl From<Leaf> for Inline {
    fn from(leaf: Leaf) -> Self {
        Inline::Leaf(leaf)
    }
}

impl From<InlineElement> for Inline {
    fn from(el: InlineElement) -> Self {
        Inline::Element(el)
    }
}

/// Concatenated text of a run of inlines; images contribute nothing.
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|i| match i {
            Inline::Leaf(leaf) => leaf.text.clone(),
            Inline::Element(el) => el.plain_text(),
        })
        .collect()
}
