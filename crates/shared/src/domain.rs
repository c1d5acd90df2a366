use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidationError};

/// Shown in place of a space splitter so the value stays visible and editable.
pub const SPACE_PLACEHOLDER: &str = "[SPACE]";

pub fn validate_state(candidate: &str) -> Result<(), ValidationError> {
    if candidate.is_empty() {
        return Err(ValidationError::EmptyState);
    }
    Ok(())
}

/// The single character the service splits the state on. Never NUL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Splitter(char);

impl Splitter {
    pub fn new(value: char) -> Result<Self, ValidationError> {
        if value == '\0' {
            return Err(ValidationError::NullSplitter);
        }
        Ok(Self(value))
    }

    /// Parses splitter input as typed by the user, mapping `[SPACE]` back to a space.
    pub fn from_input(text: &str) -> Result<Self, ValidationError> {
        let substituted = text.replace(SPACE_PLACEHOLDER, " ");
        let mut chars = substituted.chars();
        match (chars.next(), chars.next()) {
            (Some(value), None) => Self::new(value),
            _ => Err(ValidationError::SplitterLength {
                len: substituted.chars().count(),
            }),
        }
    }

    /// Parses the service's quoted splitter response, e.g. `"l"` or `" "`.
    pub fn from_response(body: &str) -> Result<Self, ParseError> {
        let text = match serde_json::from_str::<String>(body.trim()) {
            Ok(text) => text,
            Err(_) => body
                .trim_end_matches(['\r', '\n'])
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(body)
                .to_string(),
        };

        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(value), None) if value != '\0' => Ok(Self(value)),
            _ => Err(ParseError::Splitter {
                body: body.to_string(),
            }),
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn display_text(self) -> String {
        if self.0 == ' ' {
            SPACE_PLACEHOLDER.to_string()
        } else {
            self.0.to_string()
        }
    }
}

/// Properties of the current state as computed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringProperties {
    pub original_string: String,
    /// The fifth character, or `None` when the service has none to report.
    #[serde(default)]
    pub fifth_char: Option<String>,
    pub is_palindrome: bool,
    pub reversed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoPropObject {
    pub prop1: String,
    pub prop2: i32,
}
