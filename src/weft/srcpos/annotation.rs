//! Annotation position approximation.
//!
//! Annotations are recognized structurally rather than scanned token by
//! token, so their positions carry a line number but no captured line
//! text. The helper here rebuilds a plausible rendering of the annotation
//! line from the node it decorates, keeping source excerpts in
//! diagnostics readable.

use super::meta::Meta;
use super::position::Position;

/// Backfill an annotation position's file and line text from the node it
/// decorates.
///
/// The node's captured line supplies the indentation; the node's comments
/// supply the text. A comment matches when it sits on the annotation's
/// line, and the last match in `node_comments` wins. With no match the
/// line text stays empty, which downstream printing treats as "no source
/// available". Returns the populated position.
pub fn populate_annotation_position_from_node(
    mut ann_pos: Position,
    node_pos: &Position,
    node_comments: &[Meta],
) -> Position {
    let mut left_padding = 0;
    if node_pos.is_known() {
        let node_line = node_pos.line();
        left_padding = node_line.len() - node_line.trim_start_matches(' ').len();
    }

    let mut line_string = String::new();
    for comment in node_comments {
        // Line numbers compare as decimal strings, not integers.
        if comment.position.is_known()
            && comment.position.as_int_string() == ann_pos.line_num().to_string()
        {
            line_string = format!("{}#{}", " ".repeat(left_padding), comment.data);
        }
    }

    ann_pos.set_file(node_pos.file());
    ann_pos.set_line(line_string);

    ann_pos
}
