//! Round trips through markdown text.
//!
//! Canonical fixtures are already in serializer output form and must come
//! back byte for byte. Messy fixtures use syntax variants; their first
//! serialization is canonical and stable from then on.

use markdown_richtext_engine::normalize::invariants;
use markdown_richtext_engine::{parse_markdown, serialize_markdown};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

#[rstest]
#[case("canonical/mixed")]
#[case("canonical/marks")]
fn canonical_fixture_is_reproduced(#[case] name: &str) {
    let md = fixture(name);
    let doc = parse_markdown(&md);
    assert_eq!(invariants::find_violation(doc.blocks()), None);
    assert_eq!(serialize_markdown(&doc), md);
}

#[rstest]
#[case("canonical/mixed")]
#[case("canonical/marks")]
#[case("messy/syntax_variants")]
#[case("messy/unclosed")]
fn parse_is_left_inverse_of_serialize(#[case] name: &str) {
    let doc = parse_markdown(&fixture(name));
    let md = serialize_markdown(&doc);
    let reparsed = parse_markdown(&md);
    assert_eq!(reparsed, doc);
    assert_eq!(serialize_markdown(&reparsed), md);
}

#[test]
fn syntax_variants_are_canonicalized() {
    let doc = parse_markdown(&fixture("messy/syntax_variants"));
    insta::assert_snapshot!(serialize_markdown(&doc), @r#"
    Setext-free text with **strong** and _star italic_ and **_both_**.
    Intra\_word\_underscores stay literal, as do 2 \* 3 \* 4 and a lone \~ tilde.

    - star bullet
    - plus bullet
      - four-space nested
    1. paren ordered
    Lazy
    continuation line

    > quote without space
    >
    > > nested quote

    ```python
    code with ``` inside
    ```

    ### spaced heading

    Escapes: \*not emphasis\* and \[not a link\]

    ![inline](a.png) image at start and ![x](<with space.png>) later
    "#);
}

#[rstest]
#[case("**bold**\n")]
#[case("_italic_\n")]
#[case("~~strike~~\n")]
#[case("`code`\n")]
#[case("`` a`b ``\n")]
#[case("`a ` b\n")]
#[case("x ` y` z\n")]
#[case("` `\n")]
#[case("[a](u)[b](v)\n")]
#[case("**[alpha _bravo_](url)**\n")]
#[case("_a **b**_ c\n")]
#[case("x*a*y\n")]
#[case("**a** **b**\n")]
#[case("wow\\![a](u)\n")]
#[case("1\\. not a list\n")]
#[case("- a\n  - b\n    - c\n- d\n")]
#[case("> > deep\n")]
fn small_documents_are_stable(#[case] md: &str) {
    assert_eq!(serialize_markdown(&parse_markdown(md)), md);
}
