//! Single-line parsing and serialization.

use crate::constants::MAX_SECTION_LEVEL;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(#{1,6}) (.+)$").expect("heading regex"))
}

/// One line of note content.
///
/// `file_raw` is the verbatim persisted text. The remaining fields are the
/// structured reading of that text; they are ignored for serialization when
/// `is_format_needed` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// User-visible content without structural markers.
    pub inner_text: String,
    /// Text exactly as it appears in the persisted file.
    pub file_raw: String,
    /// Leading layout units of the formatted representation.
    pub indentation: usize,
    pub is_heading: bool,
    /// Number of `#` markers; `0` unless `is_heading`.
    pub section_level: u8,
    /// Line did not fit the structured grammar and passes through verbatim.
    pub is_format_needed: bool,
}

impl Line {
    /// Parse a single raw file line (without its newline).
    ///
    /// Never fails: anything outside the structured grammar becomes a raw
    /// pass-through line.
    ///
    /// # Arguments
    /// - `raw`: Line text as stored in the file.
    /// - `indent_width`: Spaces a leading tab expands to.
    pub fn parse(raw: &str, indent_width: usize) -> Self {
        let mut indentation = 0usize;
        let mut body_start = raw.len();
        for (idx, ch) in raw.char_indices() {
            match ch {
                ' ' => indentation += 1,
                '\t' => indentation += indent_width,
                _ => {
                    body_start = idx;
                    break;
                }
            }
        }
        let body = &raw[body_start..];

        if body.chars().any(char::is_control) {
            tracing::trace!(raw_len = raw.len(), "line kept as raw pass-through");
            return Self::passthrough(raw);
        }

        if let Some(caps) = heading_pattern().captures(body) {
            let level = caps[1].len() as u8;
            return Self {
                inner_text: caps[2].to_string(),
                file_raw: raw.to_string(),
                indentation,
                is_heading: true,
                section_level: level,
                is_format_needed: false,
            };
        }

        Self {
            inner_text: body.to_string(),
            file_raw: raw.to_string(),
            indentation,
            is_heading: false,
            section_level: 0,
            is_format_needed: false,
        }
    }

    /// Build a line that is serialized verbatim.
    pub fn passthrough(raw: &str) -> Self {
        Self {
            inner_text: raw.to_string(),
            file_raw: raw.to_string(),
            indentation: 0,
            is_heading: false,
            section_level: 0,
            is_format_needed: true,
        }
    }

    /// Build a structured line from its fields, deriving `file_raw`.
    pub fn structured(inner_text: &str, indentation: usize, section_level: Option<u8>) -> Self {
        let level = section_level
            .filter(|level| (1..=MAX_SECTION_LEVEL).contains(level))
            .unwrap_or(0);
        let mut line = Self {
            inner_text: inner_text.to_string(),
            file_raw: String::new(),
            indentation,
            is_heading: level > 0,
            section_level: level,
            is_format_needed: false,
        };
        line.refresh_raw();
        line
    }

    /// Heading level when the line is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        self.is_heading.then_some(self.section_level)
    }

    /// Marker text preceding the inner text (`"## "` for a level-2 heading).
    pub fn heading_marker(&self) -> String {
        match self.heading_level() {
            Some(level) => format!("{} ", "#".repeat(level as usize)),
            None => String::new(),
        }
    }

    /// Structured rendering: indentation, heading marker, inner text.
    pub fn formatted(&self) -> String {
        let marker = self.heading_marker();
        let mut out =
            String::with_capacity(self.indentation + marker.len() + self.inner_text.len());
        out.extend(std::iter::repeat(' ').take(self.indentation));
        out.push_str(&marker);
        out.push_str(&self.inner_text);
        out
    }

    /// Text contributed to the draft serialization.
    pub fn draft_text(&self) -> String {
        if self.is_format_needed {
            self.file_raw.clone()
        } else {
            self.formatted()
        }
    }

    /// Logical content the caret moves through.
    pub fn content(&self) -> &str {
        if self.is_format_needed {
            &self.file_raw
        } else {
            &self.inner_text
        }
    }

    /// Logical length in chars.
    pub fn len(&self) -> usize {
        self.content().chars().count()
    }

    /// True when the line has no logical content.
    pub fn is_empty(&self) -> bool {
        self.content().is_empty()
    }

    /// Re-derive `file_raw` after the structured fields changed.
    ///
    /// Raw pass-through lines are left untouched.
    pub fn refresh_raw(&mut self) {
        if !self.is_format_needed {
            self.file_raw = self.formatted();
        }
    }

    /// Replace the logical content and re-read the line through the grammar.
    ///
    /// The new content is placed after the current indentation and heading
    /// marker, then the whole text is parsed again. Typing `# ` or leading
    /// spaces therefore produces structure, removing a heading's title leaves
    /// a plain line, and a control character turns the line raw. A raw line
    /// that loses its control characters becomes structured with the same
    /// bytes.
    ///
    /// # Arguments
    /// - `content`: New logical content (see [`Line::content`]).
    /// - `indent_width`: Spaces a leading tab expands to.
    pub fn set_content(&mut self, content: &str, indent_width: usize) {
        let text = if self.is_format_needed {
            content.to_string()
        } else {
            let mut text = self.formatted();
            text.truncate(text.len() - self.inner_text.len());
            text.push_str(content);
            text
        };
        *self = Self::parse(&text, indent_width);
    }

    /// Change the heading level; `None` or `Some(0)` makes a plain line.
    ///
    /// Returns `false` for raw pass-through lines, which carry no structure,
    /// and when the result would not read back as the requested structure
    /// (a heading needs a title; clearing a heading whose title starts with
    /// a space or another marker would change the indentation or level).
    pub fn set_heading(&mut self, level: Option<u8>) -> bool {
        if self.is_format_needed {
            return false;
        }
        let level = level
            .map(|level| level.min(MAX_SECTION_LEVEL))
            .filter(|level| *level > 0);
        let mut candidate = self.clone();
        candidate.is_heading = level.is_some();
        candidate.section_level = level.unwrap_or(0);
        candidate.refresh_raw();
        if !candidate.reads_back() {
            return false;
        }
        *self = candidate;
        true
    }

    /// Change the indentation. Returns `false` for raw pass-through lines.
    pub fn set_indentation(&mut self, indentation: usize) -> bool {
        if self.is_format_needed {
            return false;
        }
        self.indentation = indentation;
        self.refresh_raw();
        true
    }

    /// True when `file_raw` parses back to exactly these fields.
    fn reads_back(&self) -> bool {
        // Derived raw text is indented with spaces, so no tab width applies.
        Self::parse(&self.file_raw, 0) == *self
    }
}

/// Byte offset of the `column`-th char of `text`, clamped to its end.
pub(crate) fn char_to_byte(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
