//! Root crate facade for the linenote editing engine.

pub use linenote_core::{
    config, constants, error, history, ideal_column, model, session, view, CaretMotion, Config,
    Document, EditCommand, EditingSession, History, HistoryOutcome, IdealColumn, Line,
    LogicalPosition, NoteError, RenderedView, ScriptStep, Snapshot, StatusSink, ViewCaret,
};
