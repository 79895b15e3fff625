use std::sync::OnceLock;

use regex::Regex;

use crate::models::ListKind;

/// A list marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker<'a> {
    /// Leading whitespace before the marker
    pub indent: &'a str,
    pub kind: ListKind,
    /// Item text after the marker (and checkbox)
    pub rest: &'a str,
}

impl<'a> ListMarker<'a> {
    pub const BULLET: &'static str = "-";

    /// Recognizes `- x`, `* x`, `+ x`, `1. x`, `1) x` and `- [ ] x` / `- [x] x`.
    pub fn parse(line: &'a str) -> Option<Self> {
        static LIST_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = LIST_REGEX.get_or_init(|| {
            Regex::new(
                r"^(?P<indent>[ \t]*)(?:(?P<bullet>[-*+])|(?P<number>\d{1,9})[.)])(?:[ \t]+|$)(?P<task>\[(?P<check>[ xX])\](?:[ \t]+|$))?(?P<rest>.*)$",
            )
            .expect("Invalid list marker regex")
        });
        let caps = re.captures(line)?;
        let indent = caps.name("indent").map_or("", |m| m.as_str());
        let rest = caps.name("rest").map_or("", |m| m.as_str());

        let kind = if caps.name("number").is_some() {
            ListKind::Ordered
        } else if let Some(check) = caps.name("check") {
            ListKind::Task {
                checked: check.as_str() != " ",
            }
        } else {
            ListKind::Unordered
        };

        // A checkbox after a number stays part of the text.
        let rest = match (kind, caps.name("task")) {
            (ListKind::Ordered, Some(task)) => &line[task.start()..],
            _ => rest,
        };
        Some(Self { indent, kind, rest })
    }

    /// Marker text for an item; `number` is used for ordered items.
    pub fn render(kind: ListKind, number: usize) -> String {
        match kind {
            ListKind::Unordered => Self::BULLET.to_string(),
            ListKind::Ordered => format!("{number}."),
            ListKind::Task { checked: false } => format!("{} [ ]", Self::BULLET),
            ListKind::Task { checked: true } => format!("{} [x]", Self::BULLET),
        }
    }
}
