// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold**, _italic_ and `code` content.\n\n- Bullet point with a [link](https://example.com \"Example\")\n  - Nested item\n- [ ] Another item\n\n> Quoted ~~text~~\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n![diagram](img/diagram.png)\n\n";
    base.repeat(size)
}

/// Lines full of openers that never close, the worst case for rollback.
#[allow(dead_code)]
pub fn generate_unclosed_emphasis(lines: usize) -> String {
    let line = "*a _b **c ~~d [e ".repeat(20);
    let mut content = String::new();
    for _ in 0..lines {
        content.push_str(&line);
        content.push_str("\n\n");
    }
    content
}

#[allow(dead_code)]
pub fn generate_nested_list(items: usize, max_depth: usize) -> String {
    let mut content = String::new();
    for i in 0..items {
        let depth = i % (max_depth + 1);
        content.push_str(&"  ".repeat(depth));
        content.push_str(&format!("- item {i} with *some* text\n"));
    }
    content
}
