//! REST contract of the string service: paths, methods and wire helpers.

use crate::error::ParseError;

pub const STRINGS_PATH: &str = "/strings";
pub const STATE_PATH: &str = "/state";
pub const SPLITTER_PATH: &str = "/splitter";
pub const SPLIT_PATH: &str = "/split";
pub const PROPERTIES_PATH: &str = "/properties";
pub const TWO_PROP_PATH: &str = "/twoProp";
pub const CRASH_PATH: &str = "/crash";

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    State,
    Splitter,
    SplitState,
    StateProperties,
    TwoProp,
    Crash,
}

impl Endpoint {
    pub fn path(self) -> String {
        match self {
            Self::State => format!("{STRINGS_PATH}{STATE_PATH}"),
            Self::Splitter => format!("{STRINGS_PATH}{STATE_PATH}{SPLITTER_PATH}"),
            Self::SplitState => format!("{STRINGS_PATH}{STATE_PATH}{SPLIT_PATH}"),
            Self::StateProperties => format!("{STRINGS_PATH}{STATE_PATH}{PROPERTIES_PATH}"),
            Self::TwoProp => format!("{STRINGS_PATH}{TWO_PROP_PATH}"),
            Self::Crash => CRASH_PATH.to_string(),
        }
    }
}

/// Encodes a value as the JSON string literal the service expects in PUT bodies.
pub fn json_string_body(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Decodes a JSON string response into its text.
pub fn decode_json_string(body: &str) -> Result<String, ParseError> {
    Ok(serde_json::from_str::<String>(body.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_match_service_routes() {
        assert_eq!(Endpoint::State.path(), "/strings/state");
        assert_eq!(Endpoint::Splitter.path(), "/strings/state/splitter");
        assert_eq!(Endpoint::SplitState.path(), "/strings/state/split");
        assert_eq!(Endpoint::StateProperties.path(), "/strings/state/properties");
        assert_eq!(Endpoint::TwoProp.path(), "/strings/twoProp");
        assert_eq!(Endpoint::Crash.path(), "/crash");
    }

    #[test]
    fn json_string_body_quotes_and_escapes() {
        assert_eq!(json_string_body("hello"), "\"hello\"");
        assert_eq!(json_string_body(" "), "\" \"");
        assert_eq!(json_string_body("say \"hi\""), r#""say \"hi\"""#);
    }

    #[test]
    fn decode_json_string_rejects_bare_text() {
        assert_eq!(decode_json_string("\"racecar\"\n").expect("decode"), "racecar");
        assert!(decode_json_string("racecar").is_err());
    }
}
