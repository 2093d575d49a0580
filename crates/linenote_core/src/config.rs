//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_INDENT_WIDTH, DEFAULT_NOTE_TEMPLATE};
use crate::error::NoteError;
use serde::Deserialize;
use std::env;

/// Environment variable overriding [`Config::indent_width`].
pub const ENV_INDENT_WIDTH: &str = "LINENOTE_INDENT_WIDTH";
/// Environment variable overriding [`Config::history_limit`].
pub const ENV_HISTORY_LIMIT: &str = "LINENOTE_HISTORY_LIMIT";
/// Environment variable overriding [`Config::note_template`].
pub const ENV_NOTE_TEMPLATE: &str = "LINENOTE_NOTE_TEMPLATE";
/// Environment flag enabling per-save history trace logging.
pub const ENV_TRACE_HISTORY: &str = "LINENOTE_TRACE_HISTORY";

/// Runtime configuration for an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub indent_width: usize,
    pub history_limit: usize,
    pub note_template: String,
    #[serde(default)]
    pub trace_history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            history_limit: DEFAULT_HISTORY_LIMIT,
            note_template: DEFAULT_NOTE_TEMPLATE.to_string(),
            trace_history: false,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing or unparsable values fall back to their defaults.
    ///
    /// # Arguments
    /// - `lookup`: Returns the raw value for a variable name, if set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            indent_width: lookup(ENV_INDENT_WIDTH)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.indent_width),
            history_limit: lookup(ENV_HISTORY_LIMIT)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.history_limit),
            note_template: lookup(ENV_NOTE_TEMPLATE)
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.note_template),
            trace_history: lookup(ENV_TRACE_HISTORY)
                .and_then(|v| parse_env_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Reject values the engine cannot operate with.
    ///
    /// # Errors
    /// Returns [`NoteError::InvalidConfig`] when `indent_width` or
    /// `history_limit` is zero.
    pub fn validate(&self) -> Result<(), NoteError> {
        if self.indent_width == 0 {
            return Err(NoteError::InvalidConfig(
                "indent_width must be at least 1".to_string(),
            ));
        }
        if self.history_limit == 0 {
            return Err(NoteError::InvalidConfig(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag(" off "), Some(false));
    }

    #[test]
    fn missing_vars_use_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn overrides_are_applied_and_garbage_ignored() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_INDENT_WIDTH, " 2 "),
            (ENV_HISTORY_LIMIT, "lots"),
            (ENV_NOTE_TEMPLATE, "## {title}\n\n"),
            (ENV_TRACE_HISTORY, "yes"),
        ]));
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.note_template, "## {title}\n\n");
        assert!(config.trace_history);
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.history_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(NoteError::InvalidConfig(_))
        ));
    }
}
