//! Content-changing commands applied to the document model.

use crate::constants::MAX_SECTION_LEVEL;
use crate::model::line::char_to_byte;
use crate::model::{Document, Line, LogicalPosition};

/// A content-changing operation issued at the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert text; embedded `\n` splits lines.
    InsertText(String),
    InsertNewline,
    DeleteBackward,
    DeleteForward,
    /// Set the heading level of the caret line; `None` makes it plain.
    SetHeading(Option<u8>),
    Indent,
    Outdent,
}

/// Apply `command` at `at`.
///
/// # Returns
/// The caret position after the edit, or `None` when the command changed
/// nothing (deleting at the document edges, re-applying the same heading).
pub(crate) fn apply(
    document: &mut Document,
    at: LogicalPosition,
    command: &EditCommand,
    indent_width: usize,
) -> Option<LogicalPosition> {
    let at = at.clamped_to(document);
    match command {
        EditCommand::InsertText(text) => insert_text(document, at, text, indent_width),
        EditCommand::InsertNewline => split_line(document, at, indent_width),
        EditCommand::DeleteBackward => delete_backward(document, at, indent_width),
        EditCommand::DeleteForward => delete_forward(document, at, indent_width),
        EditCommand::SetHeading(level) => {
            let line = document.line_mut(at.line)?;
            let wanted = level.filter(|level| *level > 0);
            if line.heading_level() == wanted.map(|level| level.min(MAX_SECTION_LEVEL)) {
                return None;
            }
            line.set_heading(wanted).then_some(at)
        }
        EditCommand::Indent => {
            let line = document.line_mut(at.line)?;
            let indentation = line.indentation.saturating_add(indent_width);
            line.set_indentation(indentation).then_some(at)
        }
        EditCommand::Outdent => {
            let line = document.line_mut(at.line)?;
            if line.indentation == 0 {
                return None;
            }
            let indentation = line.indentation.saturating_sub(indent_width);
            line.set_indentation(indentation).then_some(at)
        }
    }
}

/// Column that leaves `tail_chars` chars of content after the caret.
///
/// Re-reading a line can move leading text into its indentation or marker,
/// but never touches the content after the caret.
fn column_before_tail(line: &Line, tail_chars: usize) -> usize {
    line.len().saturating_sub(tail_chars)
}

fn insert_text(
    document: &mut Document,
    at: LogicalPosition,
    text: &str,
    indent_width: usize,
) -> Option<LogicalPosition> {
    if text.is_empty() {
        return None;
    }
    let mut caret = at;
    for (idx, part) in text.split('\n').enumerate() {
        if idx > 0 {
            caret = split_line(document, caret, indent_width)?;
        }
        caret = insert_in_line(document, caret, part, indent_width);
    }
    Some(caret)
}

fn insert_in_line(
    document: &mut Document,
    at: LogicalPosition,
    part: &str,
    indent_width: usize,
) -> LogicalPosition {
    if part.is_empty() {
        return at;
    }
    let Some(line) = document.line_mut(at.line) else {
        return at;
    };
    let mut content = line.content().to_string();
    let split_at = char_to_byte(&content, at.column);
    let tail_chars = content[split_at..].chars().count();
    content.insert_str(split_at, part);
    line.set_content(&content, indent_width);
    LogicalPosition::new(at.line, column_before_tail(line, tail_chars))
}

/// Split the caret line; the tail keeps the indentation but not the heading.
///
/// At column 0 of a structured line an empty line opens above instead, so
/// a heading keeps its marker.
fn split_line(
    document: &mut Document,
    at: LogicalPosition,
    indent_width: usize,
) -> Option<LogicalPosition> {
    let line = document.line_mut(at.line)?;
    if at.column == 0 && !line.is_format_needed {
        let above = Line::structured("", line.indentation, None);
        document.insert_line(at.line, above);
        return Some(LogicalPosition::new(at.line + 1, 0));
    }
    let content = line.content().to_string();
    let split_at = char_to_byte(&content, at.column);
    let tail = &content[split_at..];
    let mut new_line = if line.is_format_needed {
        Line::passthrough("")
    } else {
        Line::structured("", line.indentation, None)
    };
    new_line.set_content(tail, indent_width);
    let column = column_before_tail(&new_line, tail.chars().count());
    line.set_content(&content[..split_at], indent_width);
    document.insert_line(at.line + 1, new_line);
    Some(LogicalPosition::new(at.line + 1, column))
}

fn remove_char(
    document: &mut Document,
    line_index: usize,
    column: usize,
    indent_width: usize,
) -> Option<LogicalPosition> {
    let line = document.line_mut(line_index)?;
    let mut content = line.content().to_string();
    let start = char_to_byte(&content, column);
    let ch = content[start..].chars().next()?;
    content.replace_range(start..start + ch.len_utf8(), "");
    let tail_chars = content[start..].chars().count();
    line.set_content(&content, indent_width);
    Some(LogicalPosition::new(
        line_index,
        column_before_tail(line, tail_chars),
    ))
}

/// Append line `index + 1` to line `index`, dropping the former's markers.
fn join_with_next(
    document: &mut Document,
    index: usize,
    indent_width: usize,
) -> Option<LogicalPosition> {
    let next = document.remove_line(index + 1)?;
    let line = document.line_mut(index)?;
    let mut content = line.content().to_string();
    content.push_str(next.content());
    line.set_content(&content, indent_width);
    let column = column_before_tail(line, next.len());
    Some(LogicalPosition::new(index, column))
}

fn delete_backward(
    document: &mut Document,
    at: LogicalPosition,
    indent_width: usize,
) -> Option<LogicalPosition> {
    if at.column > 0 {
        return remove_char(document, at.line, at.column - 1, indent_width);
    }
    if at.line == 0 {
        return None;
    }
    join_with_next(document, at.line - 1, indent_width)
}

fn delete_forward(
    document: &mut Document,
    at: LogicalPosition,
    indent_width: usize,
) -> Option<LogicalPosition> {
    if at.column < document.line_len(at.line) {
        return remove_char(document, at.line, at.column, indent_width);
    }
    if at.line + 1 >= document.line_count() {
        return None;
    }
    join_with_next(document, at.line, indent_width)
}
