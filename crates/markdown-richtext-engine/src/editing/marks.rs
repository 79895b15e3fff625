use std::ops::Range;

use crate::models::{Inline, InlineKind, Leaf, Mark};

/// Total length in chars of the text an edit range addresses. Images count
/// as zero.
pub(crate) fn text_len(inlines: &[Inline]) -> usize {
    inlines
        .iter()
        .map(|i| match i {
            Inline::Leaf(leaf) => leaf.text.chars().count(),
            Inline::Element(el) => el.plain_text().chars().count(),
        })
        .sum()
}

/// Adds or removes `mark` over a char range of the block text, splitting
/// leaves (including link children) at the range edges.
pub(crate) fn set_mark(inlines: Vec<Inline>, range: &Range<usize>, mark: Mark, active: bool) -> Vec<Inline> {
    let mut offset = 0;
    let mut out = Vec::with_capacity(inlines.len() + 2);
    for inline in inlines {
        match inline {
            Inline::Leaf(leaf) => out.extend(
                mark_leaf(leaf, &mut offset, range, mark, active)
                    .into_iter()
                    .map(Inline::Leaf),
            ),
            Inline::Element(mut el) => {
                if let InlineKind::Link { .. } = el.kind {
                    el.children = el
                        .children
                        .into_iter()
                        .flat_map(|leaf| mark_leaf(leaf, &mut offset, range, mark, active))
                        .collect();
                }
                out.push(Inline::Element(el));
            }
        }
    }
    out
}

fn mark_leaf(leaf: Leaf, offset: &mut usize, range: &Range<usize>, mark: Mark, active: bool) -> Vec<Leaf> {
    let len = leaf.text.chars().count();
    let start = *offset;
    *offset += len;

    let lo = range.start.max(start);
    let hi = range.end.min(start + len);
    if lo >= hi {
        return vec![leaf];
    }

    let byte_at = |n: usize| {
        leaf.text
            .char_indices()
            .nth(n)
            .map_or(leaf.text.len(), |(b, _)| b)
    };
    let (a, b) = (byte_at(lo - start), byte_at(hi - start));

    let mut middle = Leaf::with_marks(&leaf.text[a..b], leaf.marks.clone());
    if active {
        middle.marks.insert(mark);
    } else {
        middle.marks.remove(&mark);
    }

    [
        Leaf::with_marks(&leaf.text[..a], leaf.marks.clone()),
        middle,
        Leaf::with_marks(&leaf.text[b..], leaf.marks.clone()),
    ]
    .into_iter()
    .filter(|l| !l.text.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InlineElement;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_leaf_at_range_edges() {
        let out = set_mark(vec![Leaf::new("héllo").into()], &(1..3), Mark::Bold, true);
        assert_eq!(
            out,
            vec![
                Leaf::new("h").into(),
                Leaf::new("él").with(Mark::Bold).into(),
                Leaf::new("lo").into(),
            ]
        );
    }

    #[test]
    fn reaches_into_link_children() {
        let inlines = vec![
            Leaf::new("ab").into(),
            InlineElement::link("u", vec![Leaf::new("cd")]).into(),
        ];
        let out = set_mark(inlines, &(1..3), Mark::Italic, true);
        assert_eq!(out[1], Inline::Leaf(Leaf::new("b").with(Mark::Italic)));
        let link = out[2].as_element().unwrap();
        assert_eq!(
            link.children,
            vec![Leaf::new("c").with(Mark::Italic), Leaf::new("d")]
        );
    }

    #[test]
    fn clearing_removes_only_that_mark() {
        let leaf = Leaf::new("ab").with(Mark::Bold).with(Mark::Strike);
        let out = set_mark(vec![leaf.into()], &(0..2), Mark::Bold, false);
        assert_eq!(out, vec![Leaf::new("ab").with(Mark::Strike).into()]);
    }

    #[test]
    fn text_len_counts_chars() {
        let inlines = vec![
            Leaf::new("é").into(),
            InlineElement::image("a.png", "alt").into(),
            InlineElement::link("u", vec![Leaf::new("xy")]).into(),
        ];
        assert_eq!(text_len(&inlines), 3);
    }
}
