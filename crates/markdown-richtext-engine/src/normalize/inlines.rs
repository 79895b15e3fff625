use crate::models::{Inline, InlineElement, InlineKind, Leaf};

use super::leaves::{RunBounds, normalize_leaves, normalize_run};

/// Normalizes the inline children of a text-bearing block.
///
/// The children are cut at inline elements into leaf runs; each run is
/// normalized on its own, and every element ends up with exactly one run on
/// each side. An empty run becomes a single empty leaf, which is how two
/// adjacent elements stay separated without inventing text between them.
pub fn normalize_inlines(children: Vec<Inline>) -> Vec<Inline> {
    let mut runs: Vec<Vec<Leaf>> = vec![Vec::new()];
    let mut elements: Vec<InlineElement> = Vec::new();

    for child in children {
        match child {
            Inline::Leaf(leaf) => {
                if let Some(run) = runs.last_mut() {
                    run.push(leaf);
                }
            }
            Inline::Element(el) => {
                elements.push(normalize_element(el));
                runs.push(Vec::new());
            }
        }
    }

    let last = runs.len() - 1;
    let mut out = Vec::with_capacity(runs.len() + elements.len());
    let mut elements = elements.into_iter();
    for (i, run) in runs.into_iter().enumerate() {
        let bounds = RunBounds {
            element_before: i > 0,
            element_after: i < last,
        };
        let run = normalize_run(run, bounds);
        if run.is_empty() {
            out.push(Inline::Leaf(Leaf::empty()));
        } else {
            out.extend(run.into_iter().map(Inline::Leaf));
        }
        if let Some(el) = elements.next() {
            out.push(Inline::Element(el));
        }
    }
    out
}

fn normalize_element(mut el: InlineElement) -> InlineElement {
    el.children = match el.kind {
        InlineKind::Link { .. } => normalize_leaves(el.children),
        InlineKind::Image { .. } => vec![Leaf::empty()],
    };
    el
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mark;
    use pretty_assertions::assert_eq;

    fn link(text: &str) -> Inline {
        Inline::Element(InlineElement::link("u", vec![Leaf::new(text)]))
    }

    #[test]
    fn lone_element_gets_flanking_empty_leaves() {
        let out = normalize_inlines(vec![link("alpha")]);
        assert_eq!(
            out,
            vec![Leaf::empty().into(), link("alpha"), Leaf::empty().into()]
        );
    }

    #[test]
    fn adjacent_elements_get_one_empty_leaf_between() {
        let out = normalize_inlines(vec![Leaf::new("a ").into(), link("b"), link("c")]);
        assert_eq!(
            out,
            vec![
                Leaf::new("a ").into(),
                link("b"),
                Leaf::empty().into(),
                link("c"),
                Leaf::empty().into(),
            ]
        );
    }

    #[test]
    fn space_between_elements_survives() {
        let out = normalize_inlines(vec![link("b"), Leaf::new(" ").into(), link("c")]);
        assert_eq!(out[2], Inline::Leaf(Leaf::new(" ")));
    }

    #[test]
    fn whitespace_only_block_collapses() {
        let out = normalize_inlines(vec![Leaf::new("  ").into(), Leaf::new(" ").with(Mark::Bold).into()]);
        assert_eq!(out, vec![Leaf::empty().into()]);
    }

    #[test]
    fn empty_children_become_one_empty_leaf() {
        assert_eq!(normalize_inlines(vec![]), vec![Leaf::empty().into()]);
    }

    #[test]
    fn link_children_are_normalized() {
        let el = InlineElement::link("u", vec![Leaf::new("a"), Leaf::new("b"), Leaf::empty()]);
        let out = normalize_inlines(vec![Inline::Element(el)]);
        let normalized = out[1].as_element().unwrap();
        assert_eq!(normalized.children, vec![Leaf::new("ab")]);
    }

    #[test]
    fn idempotent_on_mixed_content() {
        let input = vec![
            Leaf::new("x ").into(),
            Leaf::new(" ").with(Mark::Bold).into(),
            link("y"),
            link("z"),
            Leaf::new("  ").into(),
        ];
        let once = normalize_inlines(input);
        assert_eq!(normalize_inlines(once.clone()), once);
    }
}
