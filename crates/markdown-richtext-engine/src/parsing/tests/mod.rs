//! Document-level parser tests.
//!
//! Unit tests for the individual phases live next to the code; these go
//! through `parse_markdown` and check the normalized tree.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::models::{Block, Inline, InlineElement, Leaf, ListKind, Mark};
use crate::normalize::invariants;
use crate::parsing::parse_markdown;

fn inlines(md: &str) -> Vec<Inline> {
    let doc = parse_markdown(md);
    assert_eq!(doc.blocks().len(), 1, "expected a single block for {md:?}");
    doc.blocks()[0].inlines().unwrap().to_vec()
}

#[test]
fn link_is_flanked_by_empty_leaves() {
    assert_eq!(
        inlines("[alpha](url)"),
        vec![
            Leaf::empty().into(),
            InlineElement::link("url", vec![Leaf::new("alpha")]).into(),
            Leaf::empty().into(),
        ]
    );
}

#[test]
fn marks_around_link_reach_its_children() {
    let children = inlines("**[alpha _bravo_](url)**");
    assert_eq!(children.len(), 3);
    let link = children[1].as_element().unwrap();
    assert_eq!(
        link.children,
        vec![
            Leaf::new("alpha ").with(Mark::Bold),
            Leaf::new("bravo").with(Mark::Bold).with(Mark::Italic),
        ]
    );
}

#[test]
fn adjacent_links_share_one_empty_leaf() {
    assert_eq!(
        inlines("[a](u)[b](v)"),
        vec![
            Leaf::empty().into(),
            InlineElement::link("u", vec![Leaf::new("a")]).into(),
            Leaf::empty().into(),
            InlineElement::link("v", vec![Leaf::new("b")]).into(),
            Leaf::empty().into(),
        ]
    );
}

#[rstest]
#[case("")]
#[case("\n\n")]
#[case("   \n\t\n")]
fn blank_input_has_no_blocks(#[case] md: &str) {
    assert!(parse_markdown(md).is_empty());
}

#[test]
fn unclosed_bold_stays_literal() {
    assert_eq!(inlines("**alpha"), vec![Leaf::new("**alpha").into()]);
}

#[test]
fn paragraph_lines_keep_their_break() {
    assert_eq!(inlines("alpha\nbravo"), vec![Leaf::new("alpha\nbravo").into()]);
}

#[test]
fn quote_holds_nested_blocks() {
    let doc = parse_markdown("> # Title\n> - item\n>\n> text");
    let Block::BlockQuote { children } = &doc.blocks()[0] else {
        panic!("expected a quote, got {:?}", doc.blocks()[0]);
    };
    let tags: Vec<_> = children.iter().map(|b| b.tag().as_str()).collect();
    assert_eq!(tags, vec!["heading", "list-item", "paragraph"]);
}

#[test]
fn list_kinds_and_depths() {
    let doc = parse_markdown("- a\n  - [x] b\n  - [ ] c\n1. d\n2. e");
    let items: Vec<_> = doc
        .blocks()
        .iter()
        .map(|b| match b {
            Block::ListItem { kind, depth, .. } => (*kind, *depth),
            other => panic!("expected list items, got {other:?}"),
        })
        .collect();
    assert_eq!(
        items,
        vec![
            (ListKind::Unordered, 0),
            (ListKind::Task { checked: true }, 1),
            (ListKind::Task { checked: false }, 1),
            (ListKind::Ordered, 0),
            (ListKind::Ordered, 0),
        ]
    );
}

#[test]
fn overindented_item_is_clamped() {
    let doc = parse_markdown("- a\n      - b");
    let depths: Vec<_> = doc.blocks().iter().filter_map(Block::list_depth).collect();
    assert_eq!(depths, vec![0, 1]);
}

#[test]
fn indented_item_after_paragraph_starts_at_root() {
    let doc = parse_markdown("text\n\n    - a");
    assert_eq!(doc.blocks()[1].list_depth(), Some(0));
}

#[test]
fn whitespace_only_code_span_is_kept() {
    assert_eq!(inlines("` `"), vec![Leaf::new(" ").with(Mark::Code).into()]);
}

#[rstest]
#[case("`a ` b", vec![Leaf::new("a ").with(Mark::Code), Leaf::new(" b")])]
#[case("x ` y` z", vec![Leaf::new("x "), Leaf::new(" y").with(Mark::Code), Leaf::new(" z")])]
fn code_span_keeps_its_edge_whitespace(#[case] md: &str, #[case] expected: Vec<Leaf>) {
    let expected: Vec<Inline> = expected.into_iter().map(Inline::from).collect();
    assert_eq!(inlines(md), expected);
}

#[rstest]
#[case("# Heading with **bold** and `code`")]
#[case("- a [link](u) and ![img](i.png)")]
#[case("> quoted *and* __strong__\n>\n> - x\n>   - y")]
#[case("```\nraw **not bold**\n```")]
#[case("***a*** ~~b~~ \\*c\\* _d_e")]
#[case("[](empty) [a](b)[c](d) ![](x)")]
fn parsed_documents_hold_invariants(#[case] md: &str) {
    let doc = parse_markdown(md);
    assert_eq!(invariants::find_violation(doc.blocks()), None);
}
