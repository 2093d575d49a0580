//! Line-based document model.

pub mod document;
pub mod line;
mod tests;

pub use document::Document;
pub use line::Line;

use serde::{Deserialize, Serialize};

/// Caret position in logical coordinates, both zero-based.
///
/// `column` counts chars of a line's content, never structural markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalPosition {
    pub line: usize,
    pub column: usize,
}

impl LogicalPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Clamp onto a valid position of `document`.
    pub fn clamped_to(self, document: &Document) -> Self {
        let line = self.line.min(document.line_count().saturating_sub(1));
        let column = self.column.min(document.line_len(line));
        Self { line, column }
    }
}
