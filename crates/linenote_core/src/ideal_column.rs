//! Remembered column for vertical caret movement.

/// Last intentionally chosen caret column.
///
/// Vertical motions read it and clamp to the destination line without
/// writing it back; every other caret movement overwrites it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdealColumn {
    column: Option<usize>,
}

impl IdealColumn {
    pub fn get(&self) -> Option<usize> {
        self.column
    }

    pub fn set(&mut self, column: usize) {
        self.column = Some(column);
    }

    pub fn clear(&mut self) {
        self.column = None;
    }

    /// Current value, seeding it with `current` when unset.
    pub(crate) fn get_or_seed(&mut self, current: usize) -> usize {
        *self.column.get_or_insert(current)
    }
}
