use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::models::{Block, Document, KindTable};
use crate::parsing::parse_markdown;
use crate::serialize::serialize_markdown;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document tree: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown block kind: {0}")]
    UnknownKind(String),
    #[error("Heading level {0} is outside 1..=6")]
    InvalidHeadingLevel(u8),
}

fn read_to_string(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

fn write(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::write(path, content)?)
}

/// Read a markdown file into a document
pub fn read_markdown(path: &Path) -> Result<Document, IoError> {
    let text = read_to_string(path)?;
    log::debug!("read {} bytes from {}", text.len(), path.display());
    Ok(parse_markdown(&text))
}

/// Write a document as markdown
pub fn write_markdown(path: &Path, document: &Document) -> Result<(), IoError> {
    write(path, &serialize_markdown(document))
}

/// Read a JSON document tree, mapping host kind tags through `kinds`.
///
/// Accepts `{"blocks": [...]}` or a bare array of blocks. The result is
/// normalized like any other host-supplied tree.
pub fn read_tree(path: &Path, kinds: &KindTable) -> Result<Document, IoError> {
    let mut tree: Value = serde_json::from_str(&read_to_string(path)?)?;
    kinds.canonicalize(&mut tree).map_err(IoError::UnknownKind)?;

    let blocks: Vec<Block> = match tree {
        Value::Object(mut map) => serde_json::from_value(map.remove("blocks").unwrap_or_default())?,
        other => serde_json::from_value(other)?,
    };
    if let Some(level) = blocks.iter().find_map(Block::invalid_heading_level) {
        return Err(IoError::InvalidHeadingLevel(level));
    }
    log::debug!("read tree with {} top-level blocks from {}", blocks.len(), path.display());
    Ok(Document::from_blocks(blocks))
}

/// Pretty-printed JSON tree with a trailing newline
pub fn tree_to_string(document: &Document) -> Result<String, IoError> {
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');
    Ok(json)
}

/// Write a document as a pretty-printed JSON tree
pub fn write_tree(path: &Path, document: &Document) -> Result<(), IoError> {
    write(path, &tree_to_string(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockTag, Leaf, ListKind};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp directory")
    }

    #[test]
    fn markdown_round_trips_through_a_file() {
        let dir = temp_dir();
        let path = dir.path().join("nested/note.md");
        let document = parse_markdown("# Title\n\n- **a**\n  - b\n");

        write_markdown(&path, &document).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Title\n\n- **a**\n  - b\n"
        );
        assert_eq!(read_markdown(&path).unwrap(), document);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = temp_dir();
        let result = read_markdown(&dir.path().join("missing.md"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn tree_round_trips_through_json() {
        let dir = temp_dir();
        let path = dir.path().join("doc.json");
        let document = parse_markdown("> quoted [link](u \"t\")\n\n```sh\nls\n```");

        write_tree(&path, &document).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), tree_to_string(&document).unwrap());
        assert_eq!(read_tree(&path, &KindTable::new()).unwrap(), document);
    }

    #[test]
    fn tree_with_bad_heading_level_is_rejected() {
        let dir = temp_dir();
        let path = dir.path().join("heading.json");
        fs::write(
            &path,
            r#"{"blocks": [
                {"type": "block-quote", "children": [
                    {"type": "heading", "level": 9, "children": [{"text": "h"}]}
                ]}
            ]}"#,
        )
        .unwrap();

        let result = read_tree(&path, &KindTable::new());
        assert!(matches!(result, Err(IoError::InvalidHeadingLevel(9))));
    }

    #[test]
    fn tree_aliases_are_resolved_and_normalized() {
        let dir = temp_dir();
        let path = dir.path().join("host.json");
        fs::write(
            &path,
            r#"[
                {"type": "bulleted", "kind": "unordered", "depth": 3, "children": [
                    {"text": "a"}, {"text": "b"}
                ]}
            ]"#,
        )
        .unwrap();

        let kinds = KindTable::new().with_alias("bulleted", BlockTag::ListItem);
        let document = read_tree(&path, &kinds).unwrap();
        assert_eq!(
            document.blocks(),
            &[Block::list_item(ListKind::Unordered, 0, vec![Leaf::new("ab").into()])]
        );
    }

    #[test]
    fn unknown_kind_is_reported() {
        let dir = temp_dir();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"blocks": [{"type": "table"}]}"#).unwrap();

        let err = read_tree(&path, &KindTable::new()).unwrap_err();
        assert!(matches!(err, IoError::UnknownKind(ref tag) if tag == "table"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = temp_dir();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(
            read_tree(&path, &KindTable::new()),
            Err(IoError::Json(_))
        ));
    }
}
