//! Inline serialization.
//!
//! Leaves carry flat mark sets, markdown needs properly nested delimiters.
//! The run is turned into a token stream with a mark stack, the stream is
//! settled so every delimiter sits against non-whitespace, and only then
//! are delimiter characters chosen.

use std::cmp::Reverse;

use crate::models::{Inline, InlineElement, InlineKind, Leaf, Mark, Marks, leaf::intersect};
use crate::parsing::inline::kinds::{CodeSpan, Emphasis, Link};

use super::escape::{escape_alt, escape_text};

/// Rendered inline run plus the byte offsets where a new line begins
/// inside plain text.
#[derive(Debug, Default)]
pub(crate) struct Rendered {
    pub text: String,
    pub line_starts: Vec<usize>,
}

pub(crate) fn render_inlines(inlines: &[Inline]) -> Rendered {
    let items = items(inlines);
    let tokens = settle(tokens(&items));
    let mut out = Rendered::default();
    write_tokens(&tokens, &mut out);
    out
}

#[derive(Debug)]
enum Body<'a> {
    Text(&'a str),
    Code(&'a str),
    Element(&'a InlineElement),
}

#[derive(Debug)]
struct Item<'a> {
    /// Marks that need delimiters around this item. Never contains `Code`.
    marks: Marks,
    body: Body<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Open(Mark),
    Close(Mark),
    Text(String),
    Code(&'a str),
    Element(&'a InlineElement),
}

fn without_code(marks: &Marks) -> Marks {
    marks.iter().copied().filter(|m| *m != Mark::Code).collect()
}

fn items(inlines: &[Inline]) -> Vec<Item<'_>> {
    inlines
        .iter()
        .enumerate()
        .filter_map(|(i, inline)| match inline {
            Inline::Leaf(leaf) if leaf.text.is_empty() => None,
            Inline::Leaf(leaf) => Some(Item {
                marks: without_code(&leaf.marks),
                body: if leaf.has(Mark::Code) {
                    Body::Code(&leaf.text)
                } else {
                    Body::Text(&leaf.text)
                },
            }),
            Inline::Element(el) => Some(Item {
                marks: element_marks(inlines, i),
                body: Body::Element(el),
            }),
        })
        .collect()
}

/// Marks hoisted outside a link's brackets: those shared by all its text.
fn hoisted_marks(el: &InlineElement) -> Marks {
    without_code(&el.common_marks())
}

/// Visible content next to an element: (marks, starts with whitespace,
/// ends with whitespace).
fn content(inline: &Inline) -> Option<(Marks, bool, bool)> {
    match inline {
        Inline::Leaf(leaf) if leaf.text.is_empty() => None,
        Inline::Leaf(leaf) if leaf.has(Mark::Code) => Some((without_code(&leaf.marks), false, false)),
        Inline::Leaf(leaf) => Some((
            leaf.marks.clone(),
            leaf.starts_with_whitespace(),
            leaf.ends_with_whitespace(),
        )),
        Inline::Element(el) if el.plain_text().is_empty() => None,
        Inline::Element(el) => Some((hoisted_marks(el), false, false)),
    }
}

/// Marks an element is written inside.
///
/// A link with text takes the marks common to its children. Images and
/// empty links carry no text of their own, so they sit inside whatever
/// their neighbours keep open. A neighbour's edge whitespace must stay
/// inside that neighbour's marks, which decides the side when they differ.
fn element_marks(inlines: &[Inline], i: usize) -> Marks {
    let Inline::Element(el) = &inlines[i] else {
        return Marks::new();
    };
    if !el.plain_text().is_empty() {
        return hoisted_marks(el);
    }
    let left = inlines[..i].iter().rev().find_map(content);
    let right = inlines[i + 1..].iter().find_map(content);
    match (left, right) {
        (Some((left, _, true)), Some(_)) => left,
        (Some(_), Some((right, true, _))) => right,
        (Some((left, ..)), Some((right, ..))) => intersect(&left, &right),
        (Some((marks, ..)), None) | (None, Some((marks, ..))) => marks,
        (None, None) => Marks::new(),
    }
}

/// How many items from `from` on keep `mark`.
fn lifetime(items: &[Item<'_>], from: usize, mark: Mark) -> usize {
    items[from..]
        .iter()
        .take_while(|item| item.marks.contains(&mark))
        .count()
}

fn tokens<'a>(items: &[Item<'a>]) -> Vec<Token<'a>> {
    let mut stack: Vec<Mark> = Vec::new();
    let mut out = Vec::with_capacity(items.len() * 2);

    for (i, item) in items.iter().enumerate() {
        // Close down to the deepest mark the item still wants.
        let keep = stack.iter().take_while(|m| item.marks.contains(m)).count();
        out.extend(stack.drain(keep..).rev().map(Token::Close));

        let mut opening: Vec<Mark> = item
            .marks
            .iter()
            .copied()
            .filter(|m| !stack.contains(m))
            .collect();
        // Longest-lived outermost, so they are not closed and reopened.
        opening.sort_by_key(|m| (Reverse(lifetime(items, i, *m)), *m));
        for mark in opening {
            stack.push(mark);
            out.push(Token::Open(mark));
        }

        out.push(match item.body {
            Body::Text(text) => Token::Text(text.to_string()),
            Body::Code(code) => Token::Code(code),
            Body::Element(el) => Token::Element(el),
        });
    }
    out.extend(stack.into_iter().rev().map(Token::Close));
    out
}

/// Moves whitespace off delimiter edges and drops delimiter pairs left
/// with nothing between them, until neither changes anything.
fn settle(mut tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    loop {
        let next = cancel_empty_pairs(hoist_trailing(hoist_leading(tokens.clone())));
        if next == tokens {
            return tokens;
        }
        tokens = next;
    }
}

/// `**␠a` becomes `␠**a`.
fn hoist_leading(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    let mut out: Vec<Token<'_>> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Token::Text(text) = &token
            && matches!(out.last(), Some(Token::Open(_)))
            && text.starts_with(char::is_whitespace)
        {
            let (ws, rest) = Leaf::new(text.as_str()).split_leading_whitespace();
            let opens = out
                .iter()
                .rev()
                .take_while(|t| matches!(t, Token::Open(_)))
                .count();
            let at = out.len() - opens;
            out.insert(at, Token::Text(ws));
            if !rest.text.is_empty() {
                out.push(Token::Text(rest.text));
            }
            continue;
        }
        out.push(token);
    }
    out
}

/// `a␠**` becomes `a**␠`.
fn hoist_trailing(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    let mut rev: Vec<Token<'_>> = Vec::with_capacity(tokens.len());
    for token in tokens.into_iter().rev() {
        if let Token::Text(text) = &token
            && matches!(rev.last(), Some(Token::Close(_)))
            && text.ends_with(char::is_whitespace)
        {
            let (core, ws) = Leaf::new(text.as_str()).split_trailing_whitespace();
            let closes = rev
                .iter()
                .rev()
                .take_while(|t| matches!(t, Token::Close(_)))
                .count();
            let at = rev.len() - closes;
            rev.insert(at, Token::Text(ws));
            if !core.text.is_empty() {
                rev.push(Token::Text(core.text));
            }
            continue;
        }
        rev.push(token);
    }
    rev.reverse();
    rev
}

fn cancel_empty_pairs(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    let mut out: Vec<Token<'_>> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Token::Close(mark) = token
            && out.last() == Some(&Token::Open(mark))
        {
            out.pop();
            continue;
        }
        out.push(token);
    }
    out
}

fn ends_alphanumeric(token: Option<&Token<'_>>) -> bool {
    matches!(token, Some(Token::Text(t)) if t.chars().next_back().is_some_and(char::is_alphanumeric))
}

fn starts_alphanumeric(token: Option<&Token<'_>>) -> bool {
    matches!(token, Some(Token::Text(t)) if t.chars().next().is_some_and(char::is_alphanumeric))
}

/// Picks `_` or `*` for each italic pair. `_` does not open after, or close
/// before, an alphanumeric character.
fn italic_delimiters(tokens: &[Token<'_>]) -> Vec<&'static str> {
    let mut chosen = Vec::new();
    for (open, token) in tokens.iter().enumerate() {
        if *token != Token::Open(Mark::Italic) {
            continue;
        }
        let close = tokens[open..]
            .iter()
            .position(|t| *t == Token::Close(Mark::Italic))
            .map_or(tokens.len(), |p| open + p);
        let intraword = (open > 0 && ends_alphanumeric(tokens.get(open - 1)))
            || starts_alphanumeric(tokens.get(close + 1));
        chosen.push(if intraword {
            Emphasis::ITALIC_INTRAWORD
        } else {
            Emphasis::ITALIC
        });
    }
    chosen
}

fn delimiter(mark: Mark, italic: &'static str) -> &'static str {
    match mark {
        Mark::Bold => Emphasis::BOLD,
        Mark::Italic => italic,
        Mark::Strike => Emphasis::STRIKE,
        // Code is written per leaf and never reaches the stack.
        Mark::Code => "",
    }
}

fn write_tokens(tokens: &[Token<'_>], out: &mut Rendered) {
    let italics = italic_delimiters(tokens);
    let mut pairs = italics.iter();
    let mut italic = Emphasis::ITALIC;

    for token in tokens {
        match token {
            Token::Open(mark) => {
                if *mark == Mark::Italic {
                    italic = pairs.next().copied().unwrap_or(Emphasis::ITALIC);
                }
                out.text.push_str(delimiter(*mark, italic));
            }
            Token::Close(mark) => out.text.push_str(delimiter(*mark, italic)),
            Token::Text(text) => write_text(text, out),
            Token::Code(code) => out.text.push_str(&CodeSpan::render(code)),
            Token::Element(el) => write_element(el, out),
        }
    }
}

fn write_text(text: &str, out: &mut Rendered) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.text.push('\n');
            out.line_starts.push(out.text.len());
        }
        escape_text(line, &mut out.text);
    }
}

fn write_element(el: &InlineElement, out: &mut Rendered) {
    // `!` right before `[` would turn the link into an image.
    if out.text.ends_with('!') {
        out.text.insert(out.text.len() - 1, '\\');
    }
    match &el.kind {
        InlineKind::Link { href, title } => {
            let hoisted = hoisted_marks(el);
            let children: Vec<Inline> = el
                .children
                .iter()
                .map(|leaf| {
                    let marks = leaf.marks.difference(&hoisted).copied().collect();
                    Leaf::with_marks(leaf.text.as_str(), marks).into()
                })
                .collect();
            let inner = render_inlines(&children);

            out.text.push(char::from(Link::OPEN));
            let offset = out.text.len();
            out.line_starts
                .extend(inner.line_starts.iter().map(|p| p + offset));
            out.text.push_str(&inner.text);
            out.text.push(char::from(Link::CLOSE));
            out.text
                .push_str(&Link::render_target(href, title.as_deref()));
        }
        InlineKind::Image { url, alt, title } => {
            out.text.push('!');
            out.text.push(char::from(Link::OPEN));
            out.text.push_str(&escape_alt(alt));
            out.text.push(char::from(Link::CLOSE));
            out.text.push_str(&Link::render_target(url, title.as_deref()));
        }
    }
}
