//! Ordered line sequence with draft and file serializations.

use super::line::Line;
use crate::constants::TEMPLATE_TITLE_PLACEHOLDER;
use serde::{Deserialize, Serialize};

/// A note as an ordered sequence of lines.
///
/// Always holds at least one line. `trailing_newline` records whether the
/// source text ended with `\n` so the file serialization reproduces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    lines: Vec<Line>,
    trailing_newline: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![Line::structured("", 0, None)],
            trailing_newline: false,
        }
    }
}

impl Document {
    /// Parse raw file text into a document.
    ///
    /// One trailing newline is stripped before splitting and restored by
    /// [`Document::file_text`]. Never fails.
    ///
    /// # Arguments
    /// - `source`: Full note text as persisted.
    /// - `indent_width`: Spaces a leading tab expands to.
    pub fn parse(source: &str, indent_width: usize) -> Self {
        let (body, trailing_newline) = match source.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (source, false),
        };
        let lines = body
            .split('\n')
            .map(|raw| Line::parse(raw, indent_width))
            .collect::<Vec<_>>();
        let format_needed = lines.iter().filter(|line| line.is_format_needed).count();
        tracing::debug!(lines = lines.len(), format_needed, "parsed document");
        Self {
            lines,
            trailing_newline,
        }
    }

    /// Build a new note from a template, substituting the title placeholder.
    ///
    /// # Returns
    /// The parsed document for the expanded template text.
    pub fn from_template(template: &str, title: &str, indent_width: usize) -> Self {
        let source = template.replace(TEMPLATE_TITLE_PLACEHOLDER, title.trim());
        Self::parse(&source, indent_width)
    }

    /// Build a document from explicit lines; an empty list yields one empty line.
    pub fn from_lines(lines: Vec<Line>, trailing_newline: bool) -> Self {
        if lines.is_empty() {
            return Self {
                trailing_newline,
                ..Self::default()
            };
        }
        Self {
            lines,
            trailing_newline,
        }
    }

    /// Borrow all lines in order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Borrow one line.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub(crate) fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    pub(crate) fn insert_line(&mut self, index: usize, line: Line) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, line);
    }

    /// Remove a line, refusing to leave the document empty.
    pub(crate) fn remove_line(&mut self, index: usize) -> Option<Line> {
        if self.lines.len() <= 1 || index >= self.lines.len() {
            return None;
        }
        Some(self.lines.remove(index))
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Logical length of a line in chars (`0` for out-of-range lines).
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map(Line::len).unwrap_or(0)
    }

    /// Whether the persisted text ends with a newline.
    pub fn has_trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Text shown to and edited by the user.
    ///
    /// Lines are joined with `\n`, without a trailing newline.
    pub fn draft_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::draft_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text persisted to storage: every line's `file_raw`, verbatim.
    pub fn file_text(&self) -> String {
        let mut out = self
            .lines
            .iter()
            .map(|line| line.file_raw.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}
