//! Core text-editing engine for linenote (line model, caret mapping, history).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across linenote crates.
pub mod constants;
/// Engine error types.
pub mod error;
/// Remembered column for vertical caret movement.
pub mod ideal_column;
/// Snapshot-based undo/redo history.
pub mod history;
/// Line-based document model and serialization.
pub mod model;
/// Editing session orchestration.
pub mod session;
/// Rendered view tree and the caret position mapper.
pub mod view;

pub use config::Config;
pub use constants::*;
pub use error::NoteError;
pub use history::{History, HistoryOutcome, Snapshot};
pub use ideal_column::IdealColumn;
pub use model::{Document, Line, LogicalPosition};
pub use session::{CaretMotion, EditCommand, EditingSession, ScriptStep, StatusSink};
pub use view::{RenderedView, ViewCaret};
