//! Editing session: one open note with its view, caret and history.

mod edit;
mod motion;
mod script;

pub use edit::EditCommand;
pub use motion::CaretMotion;
pub use script::ScriptStep;

use crate::config::Config;
use crate::constants::{MSG_NOTHING_TO_REDO, MSG_NOTHING_TO_UNDO, MSG_REDO, MSG_UNDO};
use crate::error::NoteError;
use crate::history::{History, HistoryOutcome, Restored};
use crate::ideal_column::IdealColumn;
use crate::model::{Document, LogicalPosition};
use crate::view::{to_logical_position, to_view_position, RenderedView, ViewCaret};
use uuid::Uuid;

/// Receiver for history status messages.
pub trait StatusSink {
    fn on_history_change(&mut self, message: &str);
}

impl<F> StatusSink for F
where
    F: FnMut(&str),
{
    fn on_history_change(&mut self, message: &str) {
        self(message)
    }
}

/// One open note.
///
/// Owns the document model, the rendered view it is displayed through, the
/// caret, the undo history and the ideal column. Nothing here is shared with
/// other sessions.
pub struct EditingSession {
    id: Uuid,
    config: Config,
    document: Document,
    view: RenderedView,
    caret: Option<ViewCaret>,
    history: History,
    ideal_column: IdealColumn,
    persisted_digest: blake3::Hash,
    status: Option<Box<dyn StatusSink>>,
}

impl std::fmt::Debug for EditingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditingSession")
            .field("id", &self.id)
            .field("lines", &self.document.line_count())
            .field("caret", &self.caret_position())
            .field("history", &self.history.depths())
            .finish()
    }
}

fn digest(text: &str) -> blake3::Hash {
    blake3::hash(text.as_bytes())
}

impl EditingSession {
    /// Open a session over persisted note text.
    ///
    /// The caret starts at the beginning of the note and the initial state is
    /// recorded as the first history snapshot.
    ///
    /// # Errors
    /// Returns [`NoteError::InvalidConfig`] for unusable configuration, or a
    /// snapshot encoding error.
    pub fn load_document(source: &str, config: Config) -> Result<Self, NoteError> {
        config.validate()?;
        let document = Document::parse(source, config.indent_width);
        Self::from_document(document, config)
    }

    /// Open a session over a new note built from the configured template.
    ///
    /// # Errors
    /// Same as [`EditingSession::load_document`].
    pub fn new_note(title: &str, config: Config) -> Result<Self, NoteError> {
        config.validate()?;
        let document = Document::from_template(&config.note_template, title, config.indent_width);
        Self::from_document(document, config)
    }

    fn from_document(document: Document, config: Config) -> Result<Self, NoteError> {
        let view = RenderedView::render(&document);
        let caret = to_view_position(&view, LogicalPosition::default());
        let persisted_digest = digest(&document.file_text());
        let mut session = Self {
            id: Uuid::new_v4(),
            history: History::from_config(&config),
            config,
            document,
            view,
            caret,
            ideal_column: IdealColumn::default(),
            persisted_digest,
            status: None,
        };
        session.history.save(&session.view, session.caret)?;
        tracing::debug!(
            session = %session.id,
            lines = session.document.line_count(),
            "editing session opened"
        );
        Ok(session)
    }

    /// Route history status messages to `sink`.
    pub fn with_status_sink(mut self, sink: impl StatusSink + 'static) -> Self {
        self.status = Some(Box::new(sink));
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn view(&self) -> &RenderedView {
        &self.view
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn ideal_column(&self) -> IdealColumn {
        self.ideal_column
    }

    /// Caret in view coordinates; `None` when it is undefined.
    pub fn caret(&self) -> Option<ViewCaret> {
        self.caret
    }

    /// Caret in logical coordinates; `None` when it is undefined.
    pub fn caret_position(&self) -> Option<LogicalPosition> {
        self.caret
            .and_then(|caret| to_logical_position(&self.view, caret))
    }

    /// Text shown to and edited by the user.
    pub fn draft_text(&self) -> String {
        self.document.draft_text()
    }

    /// Text handed to the save/sync collaborator.
    pub fn file_text(&self) -> String {
        self.document.file_text()
    }

    /// True when the file text differs from what was loaded or last persisted.
    pub fn is_dirty(&self) -> bool {
        digest(&self.file_text()) != self.persisted_digest
    }

    /// Record the current file text as persisted.
    pub fn mark_persisted(&mut self) {
        self.persisted_digest = digest(&self.file_text());
    }

    fn place_logical(&mut self, position: LogicalPosition) {
        self.caret = to_view_position(&self.view, position);
    }

    fn rerender(&mut self, caret: LogicalPosition) {
        self.view = RenderedView::render(&self.document);
        self.place_logical(caret);
    }

    /// Apply a content change at the caret, then record a history snapshot.
    ///
    /// # Returns
    /// `false` when nothing changed, including when the caret is undefined.
    ///
    /// # Errors
    /// Propagates snapshot encoding failures.
    pub fn apply_edit(&mut self, command: EditCommand) -> Result<bool, NoteError> {
        let Some(at) = self.caret_position() else {
            return Ok(false);
        };
        let Some(caret) = edit::apply(&mut self.document, at, &command, self.config.indent_width)
        else {
            return Ok(false);
        };
        self.ideal_column.set(caret.column);
        self.rerender(caret);
        self.history.save(&self.view, self.caret)?;
        Ok(true)
    }

    /// Move the caret without changing content.
    ///
    /// Explicit placement works with an undefined caret; relative motions
    /// do nothing until a caret exists.
    ///
    /// # Returns
    /// The new logical caret, if any.
    pub fn move_caret(&mut self, motion: CaretMotion) -> Option<LogicalPosition> {
        let from = match (self.caret_position(), motion) {
            (Some(from), _) => from,
            (None, CaretMotion::To(_)) => LogicalPosition::default(),
            (None, _) => return None,
        };
        let target = motion::resolve(&self.document, from, motion, &mut self.ideal_column);
        self.place_logical(target);
        self.caret_position()
    }

    /// Accept a caret reported by the surface (a click or selection change).
    ///
    /// A caret outside every line leaves the session caret undefined.
    pub fn place_view_caret(&mut self, caret: ViewCaret) -> Option<LogicalPosition> {
        let Some(position) = to_logical_position(&self.view, caret) else {
            self.caret = None;
            return None;
        };
        self.caret = Some(caret);
        self.ideal_column.set(position.column);
        Some(position)
    }

    /// Record the current state as a history snapshot.
    ///
    /// # Returns
    /// `true` when a new snapshot was recorded.
    ///
    /// # Errors
    /// Propagates snapshot encoding failures.
    pub fn request_save(&mut self) -> Result<bool, NoteError> {
        self.history.save(&self.view, self.caret)
    }

    /// Undo one step and report the outcome to the status sink.
    ///
    /// # Returns
    /// `true` when an earlier state was restored.
    ///
    /// # Errors
    /// Propagates snapshot encoding or decoding failures.
    pub fn request_undo(&mut self) -> Result<bool, NoteError> {
        let outcome = self.history.undo(&self.view, self.caret)?;
        Ok(self.finish_navigation(outcome, MSG_UNDO, MSG_NOTHING_TO_UNDO))
    }

    /// Redo one step and report the outcome to the status sink.
    ///
    /// # Returns
    /// `true` when a later state was restored.
    ///
    /// # Errors
    /// Propagates snapshot decoding failures.
    pub fn request_redo(&mut self) -> Result<bool, NoteError> {
        let outcome = self.history.redo()?;
        Ok(self.finish_navigation(outcome, MSG_REDO, MSG_NOTHING_TO_REDO))
    }

    fn finish_navigation(&mut self, outcome: HistoryOutcome, done: &str, empty: &str) -> bool {
        let restored = match outcome {
            HistoryOutcome::Restored(restored) => {
                self.apply_restored(restored);
                true
            }
            HistoryOutcome::Unchanged => false,
        };
        let message = if restored { done } else { empty };
        if let Some(sink) = self.status.as_mut() {
            sink.on_history_change(message);
        }
        restored
    }

    fn apply_restored(&mut self, restored: Restored) {
        self.document = restored.view.to_document();
        self.view = restored.view;
        self.caret = restored.caret;
        if let Some(position) = restored.position {
            self.ideal_column.set(position.column);
        }
    }

    /// Run one replay step.
    ///
    /// # Errors
    /// Propagates history failures.
    pub fn run_step(&mut self, step: &ScriptStep) -> Result<(), NoteError> {
        match step {
            ScriptStep::Edit(command) => {
                self.apply_edit(command.clone())?;
            }
            ScriptStep::Move(motion) => {
                self.move_caret(*motion);
            }
            ScriptStep::Undo => {
                self.request_undo()?;
            }
            ScriptStep::Redo => {
                self.request_redo()?;
            }
            ScriptStep::Save => {
                self.request_save()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(source: &str) -> EditingSession {
        EditingSession::load_document(source, Config::default()).expect("session")
    }

    #[test]
    fn opens_with_caret_at_start_and_one_snapshot() {
        let session = session("# Title\nbody\n");
        assert_eq!(session.caret_position(), Some(LogicalPosition::new(0, 0)));
        assert!(session.history().peek().is_some());
        assert_eq!(session.history().depths(), (0, 0));
        assert!(!session.is_dirty());
    }

    #[test]
    fn edit_then_undo_restores_text_and_caret() {
        let mut session = session("hello\n");
        session.move_caret(CaretMotion::LineEnd);
        assert!(session
            .apply_edit(EditCommand::InsertText(" world".into()))
            .expect("edit"));
        assert_eq!(session.file_text(), "hello world\n");
        assert!(session.is_dirty());

        assert!(session.request_undo().expect("undo"));
        assert_eq!(session.file_text(), "hello\n");
        assert_eq!(session.caret_position(), Some(LogicalPosition::new(0, 0)));

        assert!(session.request_redo().expect("redo"));
        assert_eq!(session.file_text(), "hello world\n");
        assert_eq!(session.caret_position(), Some(LogicalPosition::new(0, 11)));
    }

    #[test]
    fn status_sink_receives_outcomes() {
        let messages = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&messages);
        let mut session = session("x").with_status_sink(move |message: &str| {
            sink.borrow_mut().push(message.to_string());
        });

        assert!(!session.request_undo().expect("undo"));
        session
            .apply_edit(EditCommand::InsertText("y".into()))
            .expect("edit");
        session.request_undo().expect("undo");
        session.request_redo().expect("redo");
        session.request_redo().expect("redo");

        assert_eq!(
            *messages.borrow(),
            vec![MSG_NOTHING_TO_UNDO, MSG_UNDO, MSG_REDO, MSG_NOTHING_TO_REDO]
        );
    }

    #[test]
    fn undefined_caret_blocks_edits_and_relative_moves() {
        let mut session = session("abc");
        let root = session.view().root();
        assert_eq!(session.place_view_caret(ViewCaret::new(root, 0)), None);
        assert_eq!(session.caret(), None);
        assert!(!session
            .apply_edit(EditCommand::InsertText("z".into()))
            .expect("edit"));
        assert_eq!(session.move_caret(CaretMotion::Right), None);
        assert_eq!(
            session.move_caret(CaretMotion::To(LogicalPosition::new(0, 2))),
            Some(LogicalPosition::new(0, 2))
        );
    }

    #[test]
    fn click_sets_ideal_column() {
        let mut session = session("## abcdef\nxy\nabcdef");
        let line = session.view().line_node(0).expect("line");
        let content = *session.view().text_leaves(line).last().expect("content");
        assert_eq!(
            session.place_view_caret(ViewCaret::new(content, 4)),
            Some(LogicalPosition::new(0, 4))
        );
        assert_eq!(session.ideal_column().get(), Some(4));
        session.move_caret(CaretMotion::Down);
        assert_eq!(
            session.move_caret(CaretMotion::Down),
            Some(LogicalPosition::new(2, 4))
        );
    }

    #[test]
    fn mark_persisted_clears_dirty_flag() {
        let mut session = session("a");
        session
            .apply_edit(EditCommand::InsertNewline)
            .expect("edit");
        assert!(session.is_dirty());
        session.mark_persisted();
        assert!(!session.is_dirty());
    }

    #[test]
    fn new_note_uses_template() {
        let session = EditingSession::new_note("Plans", Config::default()).expect("session");
        assert_eq!(session.file_text(), "# Plans\n");
        assert_eq!(session.draft_text(), "# Plans");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = Config {
            indent_width: 0,
            ..Config::default()
        };
        assert!(matches!(
            EditingSession::load_document("x", config),
            Err(NoteError::InvalidConfig(_))
        ));
    }
}
