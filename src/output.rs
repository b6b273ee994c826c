//! The structured extraction result and its JSON emission.
//!
//! The host process parses stdout as JSON, so this module guarantees that
//! whatever happened upstream the caller receives exactly one well-formed
//! object. Three shapes exist:
//!
//! * normal — `{"text": <string>, "error": <string>}` with `error` empty
//!   when extraction succeeded;
//! * empty input — `{"text": ""}` with **no** `error` key. The asymmetry is
//!   deliberate: it lets the host distinguish "nothing was sent" from
//!   "something was sent but yielded nothing";
//! * serializer failure — the hardcoded literal [`JSON_FALLBACK`]. String
//!   data cannot normally fail to serialize; the literal is a last-resort
//!   invariant, not a normal path.

use serde::{Deserialize, Serialize};
use tracing::error;

/// Emitted verbatim if JSON serialization itself fails.
pub const JSON_FALLBACK: &str = r#"{"text": "", "error": "json_output_error"}"#;

/// The sole externally visible output of an extraction run.
///
/// `text` is always a string, defaulting to empty on any failure. `error`
/// is `None` only for the empty-input short circuit; the normal path always
/// carries `Some` (possibly empty) so the key is present in the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted plain text; empty when nothing could be extracted.
    pub text: String,

    /// Top-level failure message, empty when extraction succeeded.
    /// Omitted from the JSON entirely for the empty-input case.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Successful extraction: `error` is present but empty.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: Some(String::new()),
        }
    }

    /// Fatal top-level failure: empty text, non-empty `error`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            error: Some(message.into()),
        }
    }

    /// The empty-input short circuit: `{"text": ""}`, no `error` key.
    pub fn empty_input() -> Self {
        Self {
            text: String::new(),
            error: None,
        }
    }

    /// Serialize to a single JSON line (no trailing newline).
    ///
    /// Never fails: a serialization error degrades to [`JSON_FALLBACK`]
    /// after logging the cause to the diagnostic channel.
    pub fn to_json_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(line) => line,
            Err(e) => {
                error!(stage = "serialize", "JSON output error: {e}");
                JSON_FALLBACK.to_string()
            }
        }
    }
}
