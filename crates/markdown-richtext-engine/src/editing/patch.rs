use crate::models::BlockPath;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// The block the command targeted, as addressed after the edit
    pub changed: BlockPath,
    pub version: u64,
}
