//! Conversion between view carets and logical `(line, column)` positions.
//!
//! This is the only place that understands node/offset addressing; the
//! model and history work purely in [`LogicalPosition`]s.

use super::{NodeKind, RenderedView, ViewCaret};
use crate::model::LogicalPosition;

/// Map a view caret to a logical position.
///
/// The enclosing line is found by walking parent links, so cost is bounded
/// by the caret node's depth plus the line's own leaves.
///
/// # Returns
/// `None` when the caret is not inside any line container (for example on
/// the surface root, or on a node the view does not contain).
pub fn to_logical_position(view: &RenderedView, caret: ViewCaret) -> Option<LogicalPosition> {
    let (line_index, line_node) = view.enclosing_line(caret.node)?;
    let node = view.node(caret.node)?;

    let column = match &node.kind {
        NodeKind::Text { .. } => {
            let mut column = 0usize;
            for leaf in view.text_leaves(line_node) {
                if leaf == caret.node {
                    column += caret.offset.min(view.content_len(leaf));
                    break;
                }
                column += view.content_len(leaf);
            }
            column
        }
        _ => {
            let boundary = caret.offset.min(node.children.len());
            node.children[..boundary]
                .iter()
                .flat_map(|child| view.text_leaves(*child))
                .map(|leaf| view.content_len(leaf))
                .sum::<usize>()
                + preceding_content(view, line_node, caret.node)
        }
    };

    Some(LogicalPosition::new(line_index, column))
}

/// Content chars in `line_node` that precede container `node` itself.
fn preceding_content(
    view: &RenderedView,
    line_node: super::NodeId,
    node: super::NodeId,
) -> usize {
    if node == line_node {
        return 0;
    }
    let inside = view.text_leaves(node);
    let Some(first_inside) = inside.first() else {
        return 0;
    };
    view.text_leaves(line_node)
        .into_iter()
        .take_while(|leaf| leaf != first_inside)
        .map(|leaf| view.content_len(leaf))
        .sum()
}

/// Map a logical position to a caret inside the view.
///
/// Out-of-range lines clamp to the last line and out-of-range columns clamp
/// to the line end. Decoration leaves are skipped; a column on the boundary
/// between two content leaves lands at the end of the earlier one. A line
/// with no content maps to its own container at offset `0`.
///
/// # Returns
/// `None` only when the view has no lines at all.
pub fn to_view_position(view: &RenderedView, position: LogicalPosition) -> Option<ViewCaret> {
    let last_line = view.line_count().checked_sub(1)?;
    let line_node = view.line_node(position.line.min(last_line))?;

    let content_leaves: Vec<_> = view
        .text_leaves(line_node)
        .into_iter()
        .filter(|leaf| view.content_len(*leaf) > 0)
        .collect();
    let Some(last_leaf) = content_leaves.last().copied() else {
        return Some(ViewCaret::new(line_node, 0));
    };

    let mut remaining = position.column;
    for leaf in content_leaves {
        let len = view.content_len(leaf);
        if remaining <= len {
            return Some(ViewCaret::new(leaf, remaining));
        }
        remaining -= len;
    }
    Some(ViewCaret::new(last_leaf, view.content_len(last_leaf)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;
    use crate::view::NodeId;

    fn view_of(source: &str) -> RenderedView {
        RenderedView::render(&Document::parse(source, 4))
    }

    #[test]
    fn heading_column_skips_hidden_hashes() {
        let view = view_of("## Title");
        let line = view.line_node(0).expect("line");
        let content = *view.text_leaves(line).last().expect("content");

        let pos = to_logical_position(&view, ViewCaret::new(content, 2)).expect("position");
        assert_eq!(pos, LogicalPosition::new(0, 2));

        let marker = view.text_leaves(line)[0];
        let at_marker = to_logical_position(&view, ViewCaret::new(marker, 2)).expect("marker");
        assert_eq!(at_marker.column, 0);
    }

    #[test]
    fn container_offsets_count_preceding_children() {
        let view = view_of("  indented");
        let line = view.line_node(0).expect("line");
        let pos = to_logical_position(&view, ViewCaret::new(line, 2)).expect("end");
        assert_eq!(pos, LogicalPosition::new(0, "indented".len()));
        let start = to_logical_position(&view, ViewCaret::new(line, 1)).expect("start");
        assert_eq!(start.column, 0);
    }

    #[test]
    fn view_position_roundtrips_through_split_nodes() {
        let mut view = view_of("# abcdef\nxyz");
        let line = view.line_node(0).expect("line");
        let content = *view.text_leaves(line).last().expect("content");
        let tail = view.split_text(content, 3).expect("split");

        let boundary = to_view_position(&view, LogicalPosition::new(0, 3)).expect("caret");
        assert_eq!(boundary, ViewCaret::new(content, 3));

        let inside_tail = to_view_position(&view, LogicalPosition::new(0, 5)).expect("caret");
        assert_eq!(inside_tail, ViewCaret::new(tail, 2));
        assert_eq!(
            to_logical_position(&view, inside_tail),
            Some(LogicalPosition::new(0, 5))
        );
    }

    #[test]
    fn out_of_range_positions_clamp() {
        let view = view_of("short\nlonger line");
        let caret = to_view_position(&view, LogicalPosition::new(0, 99)).expect("caret");
        assert_eq!(
            to_logical_position(&view, caret),
            Some(LogicalPosition::new(0, 5))
        );

        let caret = to_view_position(&view, LogicalPosition::new(42, 3)).expect("caret");
        assert_eq!(
            to_logical_position(&view, caret),
            Some(LogicalPosition::new(1, 3))
        );
    }

    #[test]
    fn empty_line_maps_to_container() {
        let view = view_of("a\n\nb");
        let empty = view.line_node(1).expect("line");
        let caret = to_view_position(&view, LogicalPosition::new(1, 4)).expect("caret");
        assert_eq!(caret, ViewCaret::new(empty, 0));
        assert_eq!(
            to_logical_position(&view, caret),
            Some(LogicalPosition::new(1, 0))
        );
    }

    #[test]
    fn caret_outside_lines_is_undefined() {
        let view = view_of("a\nb");
        assert_eq!(to_logical_position(&view, ViewCaret::new(view.root(), 1)), None);
        assert_eq!(to_logical_position(&view, ViewCaret::new(NodeId(77), 0)), None);
    }

    #[test]
    fn passthrough_line_columns_cover_raw_text() {
        let view = view_of("a\tb");
        let caret = to_view_position(&view, LogicalPosition::new(0, 2)).expect("caret");
        assert_eq!(
            to_logical_position(&view, caret),
            Some(LogicalPosition::new(0, 2))
        );
    }
}
