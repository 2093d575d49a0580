//! Compact textual form of session steps, used to replay edits.

use super::edit::EditCommand;
use super::motion::CaretMotion;
use crate::error::NoteError;
use crate::model::LogicalPosition;
use std::str::FromStr;

/// One replayable session step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Edit(EditCommand),
    Move(CaretMotion),
    Undo,
    Redo,
    Save,
}

fn parse_number<T: FromStr>(step: &str, value: &str) -> Result<T, NoteError> {
    value
        .trim()
        .parse()
        .map_err(|_| NoteError::InvalidCommand(format!("'{}': expected a number", step)))
}

impl FromStr for ScriptStep {
    type Err = NoteError;

    /// Parse `insert:TEXT`, `newline`, `backspace`, `delete`, `heading:N`,
    /// `indent`, `outdent`, `left`, `right`, `up`, `down`, `home`, `end`,
    /// `goto:LINE:COLUMN`, `undo`, `redo` or `save`.
    ///
    /// In `insert:` text, `\n` is an escaped newline, `\t` a tab and `\\` a
    /// backslash.
    fn from_str(step: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match step.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (step, None),
        };
        let parsed = match (name.trim().to_ascii_lowercase().as_str(), arg) {
            ("insert", Some(text)) => Self::Edit(EditCommand::InsertText(unescape(text))),
            ("newline", None) => Self::Edit(EditCommand::InsertNewline),
            ("backspace", None) => Self::Edit(EditCommand::DeleteBackward),
            ("delete", None) => Self::Edit(EditCommand::DeleteForward),
            ("heading", Some(level)) => {
                let level: u8 = parse_number(step, level)?;
                Self::Edit(EditCommand::SetHeading((level > 0).then_some(level)))
            }
            ("indent", None) => Self::Edit(EditCommand::Indent),
            ("outdent", None) => Self::Edit(EditCommand::Outdent),
            ("left", None) => Self::Move(CaretMotion::Left),
            ("right", None) => Self::Move(CaretMotion::Right),
            ("up", None) => Self::Move(CaretMotion::Up),
            ("down", None) => Self::Move(CaretMotion::Down),
            ("home", None) => Self::Move(CaretMotion::LineStart),
            ("end", None) => Self::Move(CaretMotion::LineEnd),
            ("goto", Some(position)) => {
                let (line, column) = position.split_once(':').ok_or_else(|| {
                    NoteError::InvalidCommand(format!("'{}': expected goto:LINE:COLUMN", step))
                })?;
                Self::Move(CaretMotion::To(LogicalPosition::new(
                    parse_number(step, line)?,
                    parse_number(step, column)?,
                )))
            }
            ("undo", None) => Self::Undo,
            ("redo", None) => Self::Redo,
            ("save", None) => Self::Save,
            _ => return Err(NoteError::InvalidCommand(format!("unknown step '{}'", step))),
        };
        Ok(parsed)
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
