//! Shared constants used across linenote crates.

/// Columns a single leading tab expands to when a file line is parsed.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Maximum number of snapshots retained behind the present one.
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Template used for new notes; `{title}` is replaced by the note title.
pub const DEFAULT_NOTE_TEMPLATE: &str = "# {title}\n";

/// Placeholder substituted in note templates.
pub const TEMPLATE_TITLE_PLACEHOLDER: &str = "{title}";

/// Deepest heading level recognized by the line grammar.
pub const MAX_SECTION_LEVEL: u8 = 6;

/// Status text emitted after a successful undo.
pub const MSG_UNDO: &str = "Undo";
/// Status text emitted when there is nothing to undo.
pub const MSG_NOTHING_TO_UNDO: &str = "Nothing to undo";
/// Status text emitted after a successful redo.
pub const MSG_REDO: &str = "Redo";
/// Status text emitted when there is nothing to redo.
pub const MSG_NOTHING_TO_REDO: &str = "Nothing to redo";
