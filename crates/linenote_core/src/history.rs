//! Snapshot-based undo/redo history.

use crate::config::Config;
use crate::constants::DEFAULT_HISTORY_LIMIT;
use crate::error::NoteError;
use crate::model::LogicalPosition;
use crate::view::{to_logical_position, to_view_position, RenderedView, ViewCaret};

/// Immutable capture of the rendered surface and caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    markup: String,
    plain_text: String,
    caret: Option<LogicalPosition>,
}

impl Snapshot {
    /// Capture the current view and caret.
    ///
    /// # Errors
    /// Returns [`NoteError::SnapshotEncoding`] if the view cannot be encoded.
    pub fn capture(view: &RenderedView, caret: Option<ViewCaret>) -> Result<Self, NoteError> {
        Ok(Self {
            markup: view.to_markup()?,
            plain_text: view.plain_text(),
            caret: caret.and_then(|caret| to_logical_position(view, caret)),
        })
    }

    /// Serialized rendered content.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    pub fn caret(&self) -> Option<LogicalPosition> {
        self.caret
    }

    /// Equality used for save de-duplication.
    ///
    /// Compares plain text and caret position; markup is ignored because it
    /// can differ for presentation-only reasons.
    ///
    /// An undefined caret (`None`, e.g. the surface reported a position
    /// outside every line) carries no position and matches any caret, defined
    /// or not. Undo with an undefined caret therefore restores the previous
    /// state instead of first recording the present one again with its caret
    /// dropped.
    pub fn same_state(&self, other: &Snapshot) -> bool {
        if self.plain_text != other.plain_text {
            return false;
        }
        match (self.caret, other.caret) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => true,
        }
    }

    /// Rebuild the view and caret this snapshot describes.
    ///
    /// A caret line past the restored content clamps to the last line.
    ///
    /// # Errors
    /// Returns [`NoteError::SnapshotEncoding`] if the markup cannot be decoded.
    pub fn restore(&self) -> Result<Restored, NoteError> {
        let view = RenderedView::from_markup(&self.markup)?;
        let caret = match self.caret {
            Some(position) => {
                if position.line >= view.line_count() {
                    tracing::warn!(
                        line = position.line,
                        lines = view.line_count(),
                        "snapshot caret line out of range; clamping"
                    );
                }
                to_view_position(&view, position)
            }
            None => None,
        };
        let position = caret.and_then(|caret| to_logical_position(&view, caret));
        Ok(Restored {
            view,
            caret,
            position,
        })
    }
}

/// View and caret produced by restoring a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub view: RenderedView,
    pub caret: Option<ViewCaret>,
    pub position: Option<LogicalPosition>,
}

/// Result of an undo or redo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    Restored(Restored),
    /// Nothing to navigate to; state untouched.
    Unchanged,
}

/// Past/present/future snapshot stacks for one session.
#[derive(Debug, Clone)]
pub struct History {
    past: Vec<Snapshot>,
    present: Option<Snapshot>,
    future: Vec<Snapshot>,
    limit: usize,
    trace: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create empty history keeping at most `limit` past snapshots.
    pub fn new(limit: usize) -> Self {
        Self {
            past: Vec::new(),
            present: None,
            future: Vec::new(),
            limit: limit.max(1),
            trace: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            trace: config.trace_history,
            ..Self::new(config.history_limit)
        }
    }

    /// Current snapshot, without mutating anything.
    pub fn peek(&self) -> Option<&Snapshot> {
        self.present.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// `(past, future)` stack depths.
    pub fn depths(&self) -> (usize, usize) {
        (self.past.len(), self.future.len())
    }

    /// Capture the live state and record it unless it matches `present`.
    ///
    /// # Returns
    /// `true` when a new snapshot became `present`.
    ///
    /// # Errors
    /// Propagates snapshot encoding failures.
    pub fn save(
        &mut self,
        view: &RenderedView,
        caret: Option<ViewCaret>,
    ) -> Result<bool, NoteError> {
        let snapshot = Snapshot::capture(view, caret)?;
        Ok(self.push(snapshot))
    }

    /// Record an already captured snapshot, applying the same de-duplication
    /// as [`History::save`].
    pub fn push(&mut self, snapshot: Snapshot) -> bool {
        if self
            .peek()
            .is_some_and(|present| present.same_state(&snapshot))
        {
            if self.trace {
                tracing::trace!("history save skipped: state unchanged");
            }
            return false;
        }
        if let Some(previous) = self.present.take() {
            self.past.push(previous);
            if self.past.len() > self.limit {
                let overflow = self.past.len() - self.limit;
                self.past.drain(..overflow);
            }
        }
        self.future.clear();
        self.present = Some(snapshot);
        if self.trace {
            tracing::trace!(past = self.past.len(), "history save recorded");
        }
        true
    }

    /// Step back one snapshot.
    ///
    /// The live state is saved first so an unsaved edit becomes redoable.
    ///
    /// # Errors
    /// Propagates snapshot encoding or decoding failures.
    pub fn undo(
        &mut self,
        view: &RenderedView,
        caret: Option<ViewCaret>,
    ) -> Result<HistoryOutcome, NoteError> {
        self.save(view, caret)?;
        let Some(previous) = self.past.pop() else {
            return Ok(HistoryOutcome::Unchanged);
        };
        let restored = previous.restore()?;
        if let Some(current) = self.present.replace(previous) {
            self.future.push(current);
        }
        tracing::debug!(
            past = self.past.len(),
            future = self.future.len(),
            "history undo"
        );
        Ok(HistoryOutcome::Restored(restored))
    }

    /// Step forward one snapshot.
    ///
    /// # Errors
    /// Propagates snapshot decoding failures.
    pub fn redo(&mut self) -> Result<HistoryOutcome, NoteError> {
        let Some(next) = self.future.pop() else {
            return Ok(HistoryOutcome::Unchanged);
        };
        let restored = next.restore()?;
        if let Some(current) = self.present.replace(next) {
            self.past.push(current);
        }
        tracing::debug!(
            past = self.past.len(),
            future = self.future.len(),
            "history redo"
        );
        Ok(HistoryOutcome::Restored(restored))
    }
}
