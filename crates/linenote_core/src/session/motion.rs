//! Caret motions over logical positions.

use crate::ideal_column::IdealColumn;
use crate::model::{Document, LogicalPosition};

/// A caret movement that does not change content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMotion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    /// Explicit placement, as from a click.
    To(LogicalPosition),
}

impl CaretMotion {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Resolve `motion` from `from`.
///
/// Vertical motions read the ideal column (seeding it from `from` when
/// unset) and clamp to the destination line without writing it back. Every
/// other motion records its resulting column as the new ideal column.
pub(crate) fn resolve(
    document: &Document,
    from: LogicalPosition,
    motion: CaretMotion,
    ideal: &mut IdealColumn,
) -> LogicalPosition {
    let from = from.clamped_to(document);
    let target = match motion {
        CaretMotion::Up | CaretMotion::Down => {
            let wanted = ideal.get_or_seed(from.column);
            let line = if motion == CaretMotion::Up {
                match from.line.checked_sub(1) {
                    Some(line) => line,
                    None => return from,
                }
            } else if from.line + 1 < document.line_count() {
                from.line + 1
            } else {
                return from;
            };
            return LogicalPosition::new(line, wanted.min(document.line_len(line)));
        }
        CaretMotion::Left => {
            if from.column > 0 {
                LogicalPosition::new(from.line, from.column - 1)
            } else if from.line > 0 {
                LogicalPosition::new(from.line - 1, document.line_len(from.line - 1))
            } else {
                from
            }
        }
        CaretMotion::Right => {
            if from.column < document.line_len(from.line) {
                LogicalPosition::new(from.line, from.column + 1)
            } else if from.line + 1 < document.line_count() {
                LogicalPosition::new(from.line + 1, 0)
            } else {
                from
            }
        }
        CaretMotion::LineStart => LogicalPosition::new(from.line, 0),
        CaretMotion::LineEnd => LogicalPosition::new(from.line, document.line_len(from.line)),
        CaretMotion::To(position) => position.clamped_to(document),
    };
    ideal.set(target.column);
    target
}
