//! Comment metadata captured during scanning.

use super::position::Position;

/// A comment's raw text paired with the position it was scanned from.
///
/// Produced by the comment-extraction pass and stored on the node the
/// comment belongs to. The annotation approximation reads these to
/// reconstruct annotation source lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Meta {
    /// Comment text without the leading `#` marker.
    pub data: String,
    /// Where the comment itself was scanned from.
    pub position: Position,
}
