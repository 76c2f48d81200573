//! Structured error types for the galley layout engine.
//!
//! Layout itself never fails — all layout conditions are reported in the
//! result objects. Errors cover the two real failure sources around it:
//! JSON request parsing and font loading.

use thiserror::Error;

/// The unified error type returned by fallible public API functions.
#[derive(Debug, Error)]
pub enum GalleyError {
    /// JSON input failed to parse as a valid layout request.
    #[error("failed to parse layout request: {source}{hint}")]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// A font face could not be parsed or measured.
    #[error("font error: {0}")]
    Font(String),
}

impl From<serde_json::Error> for GalleyError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "\n  Hint: check for trailing commas, missing quotes, or unescaped characters."
            }
            serde_json::error::Category::Data => {
                "\n  Hint: the JSON is valid but doesn't match the request schema. Check field names and types."
            }
            serde_json::error::Category::Eof => {
                "\n  Hint: unexpected end of input — is the JSON truncated?"
            }
            serde_json::error::Category::Io => "",
        };
        GalleyError::Parse {
            source: e,
            hint: hint.to_string(),
        }
    }
}
