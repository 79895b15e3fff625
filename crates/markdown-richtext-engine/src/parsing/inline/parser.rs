use std::collections::HashSet;

use crate::models::{Inline, InlineElement, InlineKind, Leaf, Mark, Marks};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Delim, Link},
};

/// What ends the run currently being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Closer {
    Eof,
    Delim(Delim),
    /// The `]` of link text
    LinkText,
}

/// Key for remembering attempts that already failed, so a pathological line
/// of unmatched openers is not rescanned from every position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Attempt {
    pos: usize,
    closer: Closer,
    in_link: bool,
    marks: Marks,
}

struct InlineParser<'a> {
    cur: Cursor<'a>,
    out: Vec<Inline>,
    failed: HashSet<Attempt>,
}

/// Parses inline content into leaves and elements.
///
/// Never fails: any construct that does not close degrades to literal text.
/// The result is not normalized.
///
/// # Raw Zone Precedence
/// Code spans are checked before everything else except escapes, so
/// `` `**x**` `` is code, not bold.
pub fn parse_inline(s: &str) -> Vec<Inline> {
    let mut p = InlineParser {
        cur: Cursor::new(s),
        out: vec![],
        failed: HashSet::new(),
    };
    p.parse_run(Closer::Eof, &Marks::new(), false);
    coalesce(p.out)
}

/// Joins neighbouring leaves with identical marks. Failed attempts leave
/// their literal delimiters in separate leaves.
fn coalesce(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        if let (Some(Inline::Leaf(prev)), Inline::Leaf(leaf)) = (out.last_mut(), &inline)
            && prev.marks == leaf.marks
        {
            prev.text.push_str(&leaf.text);
            continue;
        }
        out.push(inline);
    }
    out
}

impl<'a> InlineParser<'a> {
    fn push_text(&mut self, text: &mut String, marks: &Marks) {
        if !text.is_empty() {
            self.out
                .push(Leaf::with_marks(std::mem::take(text), marks.clone()).into());
        }
    }

    /// Parses until `closer` is found. Returns false if the input (or the
    /// enclosing link text) ended first; the caller then rolls back.
    fn parse_run(&mut self, closer: Closer, marks: &Marks, in_link: bool) -> bool {
        let run_start = self.cur.i;
        let mut text = String::new();

        loop {
            let Some(b) = self.cur.peek() else {
                self.push_text(&mut text, marks);
                return closer == Closer::Eof;
            };

            if b == b'\\'
                && let Some(next) = self.cur.char_at(1)
                && next.is_ascii_punctuation()
            {
                text.push(next);
                self.cur.bump_n(2);
                continue;
            }

            if b == CodeSpan::TICK {
                let ticks = self.cur.run_len(CodeSpan::TICK);
                match self.try_parse_code_span(ticks) {
                    Some(code) => {
                        self.push_text(&mut text, marks);
                        let mut code_marks = marks.clone();
                        code_marks.insert(Mark::Code);
                        self.out.push(Leaf::with_marks(code, code_marks).into());
                    }
                    None => {
                        // The whole run is literal, never a shorter opener.
                        text.push_str(&"`".repeat(ticks));
                        self.cur.bump_n(ticks);
                    }
                }
                continue;
            }

            if b == Link::CLOSE && in_link {
                self.push_text(&mut text, marks);
                if closer == Closer::LinkText {
                    self.cur.bump();
                    return true;
                }
                return false;
            }

            if let Closer::Delim(d) = closer
                && self.at_closer(d, run_start)
            {
                self.push_text(&mut text, marks);
                self.cur.bump_n(d.token().len());
                return true;
            }

            if !in_link && self.cur.starts_with(Link::IMAGE_OPEN) {
                self.push_text(&mut text, marks);
                if self.try_parse_image() {
                    continue;
                }
                text.push_str("![");
                self.cur.bump_n(2);
                continue;
            }

            if !in_link && b == Link::OPEN {
                self.push_text(&mut text, marks);
                if self.try_parse_link(marks) {
                    continue;
                }
                text.push('[');
                self.cur.bump();
                continue;
            }

            if let Some(d) = self.delim_at() {
                self.push_text(&mut text, marks);
                if self.can_open(d, marks) && self.try_parse_emphasis(d, marks, in_link) {
                    continue;
                }
                // A token that cannot open is literal as a whole.
                text.push_str(d.as_str());
                self.cur.bump_n(d.token().len());
                continue;
            }

            if let Some(c) = self.cur.bump_char() {
                text.push(c);
            }
        }
    }

    /// Whether the delimiter `d` closes here.
    fn at_closer(&self, d: Delim, run_start: usize) -> bool {
        if self.cur.i == run_start || !self.cur.starts_with(d.token()) {
            return false;
        }
        if self.cur.prev_char().is_none_or(char::is_whitespace) {
            return false;
        }
        if d.is_intraword_sensitive()
            && self
                .cur
                .char_at(d.token().len())
                .is_some_and(char::is_alphanumeric)
        {
            return false;
        }
        !d.needs_odd_run() || self.cur.run_len(d.token()[0]) % 2 == 1
    }

    /// The longest emphasis token at the cursor.
    fn delim_at(&self) -> Option<Delim> {
        Delim::ALL
            .into_iter()
            .find(|d| self.cur.starts_with(d.token()))
    }

    /// An opener must be followed by non-whitespace, and its mark must not
    /// already be active.
    fn can_open(&self, d: Delim, marks: &Marks) -> bool {
        if marks.contains(&d.mark()) {
            return false;
        }
        if self
            .cur
            .char_at(d.token().len())
            .is_none_or(char::is_whitespace)
        {
            return false;
        }
        !(d.is_intraword_sensitive() && self.cur.prev_char().is_some_and(char::is_alphanumeric))
    }

    fn try_parse_emphasis(&mut self, d: Delim, marks: &Marks, in_link: bool) -> bool {
        let mut inner = marks.clone();
        inner.insert(d.mark());
        let attempt = Attempt {
            pos: self.cur.i,
            closer: Closer::Delim(d),
            in_link,
            marks: inner.clone(),
        };
        if self.failed.contains(&attempt) {
            return false;
        }

        let saved = self.cur.clone();
        let out_len = self.out.len();
        self.cur.bump_n(d.token().len());
        if self.parse_run(Closer::Delim(d), &inner, in_link) {
            return true;
        }
        // Not closed, restore cursor
        self.cur = saved;
        self.out.truncate(out_len);
        self.failed.insert(attempt);
        false
    }

    /// Reads a code span opened by `ticks` backticks. Returns its content.
    fn try_parse_code_span(&mut self, ticks: usize) -> Option<String> {
        let mut probe = self.cur.clone();
        probe.bump_n(ticks);
        let inner_start = probe.i;
        while !probe.eof() {
            let run = probe.run_len(CodeSpan::TICK);
            if run == ticks {
                let inner = &probe.s[inner_start..probe.i];
                probe.bump_n(run);
                self.cur = probe;
                return Some(CodeSpan::unpad(inner).to_string());
            }
            if run > 0 {
                probe.bump_n(run);
            } else {
                probe.bump_char();
            }
        }
        None
    }

    /// Parses `[text](dest "title")`. On failure the cursor and output are
    /// restored.
    fn try_parse_link(&mut self, marks: &Marks) -> bool {
        let attempt = Attempt {
            pos: self.cur.i,
            closer: Closer::LinkText,
            in_link: true,
            marks: marks.clone(),
        };
        if self.failed.contains(&attempt) {
            return false;
        }

        let saved = self.cur.clone();
        let out_len = self.out.len();
        self.cur.bump();
        if self.parse_run(Closer::LinkText, marks, true)
            && let Some((href, title)) = self.parse_target()
        {
            let children = self
                .out
                .drain(out_len..)
                .collect::<Vec<_>>();
            let children = coalesce(children)
                .into_iter()
                .filter_map(|i| match i {
                    Inline::Leaf(leaf) => Some(leaf),
                    Inline::Element(_) => None,
                })
                .collect();
            self.out.push(
                InlineElement {
                    kind: InlineKind::Link { href, title },
                    children,
                }
                .into(),
            );
            return true;
        }

        self.cur = saved;
        self.out.truncate(out_len);
        self.failed.insert(attempt);
        false
    }

    /// Parses `![alt](dest "title")`.
    fn try_parse_image(&mut self) -> bool {
        let saved = self.cur.clone();
        self.cur.bump_n(Link::IMAGE_OPEN.len());

        let mut alt = String::new();
        loop {
            match self.cur.peek() {
                None => {
                    self.cur = saved;
                    return false;
                }
                Some(Link::CLOSE) => {
                    self.cur.bump();
                    break;
                }
                Some(b'\\')
                    if self
                        .cur
                        .char_at(1)
                        .is_some_and(|c| c.is_ascii_punctuation()) =>
                {
                    self.cur.bump();
                    if let Some(c) = self.cur.bump_char() {
                        alt.push(c);
                    }
                }
                Some(_) => {
                    if let Some(c) = self.cur.bump_char() {
                        alt.push(c);
                    }
                }
            }
        }

        let Some((url, title)) = self.parse_target() else {
            self.cur = saved;
            return false;
        };
        self.out.push(
            InlineElement {
                kind: InlineKind::Image { url, alt, title },
                children: vec![Leaf::empty()],
            }
            .into(),
        );
        true
    }

    /// Parses `(dest "title")` right at the cursor. Restores on failure.
    fn parse_target(&mut self) -> Option<(String, Option<String>)> {
        let saved = self.cur.clone();
        let parsed = self.parse_target_inner();
        if parsed.is_none() {
            self.cur = saved;
        }
        parsed
    }

    fn parse_target_inner(&mut self) -> Option<(String, Option<String>)> {
        if self.cur.bump()? != Link::DEST_OPEN {
            return None;
        }
        self.skip_spaces();

        let dest = if self.cur.peek() == Some(b'<') {
            self.cur.bump();
            let start = self.cur.i;
            while self.cur.peek()? != b'>' {
                if self.cur.peek()? == b'\n' {
                    return None;
                }
                self.cur.bump_char();
            }
            let dest = self.cur.since(start).to_string();
            self.cur.bump();
            dest
        } else {
            let start = self.cur.i;
            while let Some(b) = self.cur.peek() {
                if b == Link::DEST_CLOSE || b.is_ascii_whitespace() {
                    break;
                }
                self.cur.bump_char();
            }
            self.cur.since(start).to_string()
        };

        self.skip_spaces();
        let mut title = None;
        if self.cur.peek() == Some(Link::TITLE_QUOTE) {
            self.cur.bump();
            let mut t = String::new();
            loop {
                match self.cur.peek()? {
                    Link::TITLE_QUOTE => {
                        self.cur.bump();
                        break;
                    }
                    b'\\' if matches!(self.cur.peek_at(1), Some(b'"' | b'\\')) => {
                        self.cur.bump();
                        t.push(char::from(self.cur.bump()?));
                    }
                    _ => t.push(self.cur.bump_char()?),
                }
            }
            title = Some(t);
            self.skip_spaces();
        }

        if self.cur.bump()? != Link::DEST_CLOSE {
            return None;
        }
        Some((dest, title))
    }

    fn skip_spaces(&mut self) {
        while matches!(self.cur.peek(), Some(b' ' | b'\t')) {
            self.cur.bump();
        }
    }
}
