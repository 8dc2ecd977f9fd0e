//! Wire protocol between the CLI and the devion backend.
//!
//! The backend is invoked as `<interpreter> -m devion.main <command>
//! <options-json>` and answers with exactly one JSON document on stdout:
//!
//! ```json
//! {"success": bool, "data": any, "message": string|null, "errors": [string]}
//! ```
//!
//! Decoding is strict: anything that is not a single document with a boolean
//! top-level `success` is a [`BridgeError::Decode`] carrying the raw stdout
//! verbatim. The codec never guesses which line of a mixed stdout is the
//! payload; precision over helpfulness.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entry-point module passed to the interpreter via `-m`.
pub const ENTRY_POINT: &str = "devion.main";

/// One CLI-triggered request to the backend.
///
/// Immutable once constructed by the command router and consumed by exactly
/// one bridge call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    command: String,
    options: Map<String, Value>,
}

impl Invocation {
    /// Build an invocation for `command` with the given options.
    ///
    /// `command` must be a non-empty identifier naming a backend operation;
    /// the router guarantees this by construction.
    #[must_use]
    pub fn new(command: impl Into<String>, options: Map<String, Value>) -> Self {
        Self {
            command: command.into(),
            options,
        }
    }

    /// The backend operation name.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The options mapping forwarded to the backend.
    #[must_use]
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Encode this invocation as the argument vector for the resolved
    /// interpreter: `-m devion.main <command> <options-json>`.
    ///
    /// The options mapping is serialized as one canonical UTF-8 JSON object
    /// in a single argument. `serde_json::Value` trees are always
    /// serializable, so encoding is infallible.
    #[must_use]
    pub fn encode_request(&self) -> Vec<String> {
        vec![
            "-m".to_string(),
            ENTRY_POINT.to_string(),
            self.command.clone(),
            Value::Object(self.options.clone()).to_string(),
        ]
    }
}

/// Structured result of a backend run, decoded from its stdout.
///
/// When `success` is true, `errors` is conventionally empty; this is not
/// enforced, and the presentation layer does not assume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Decode the backend's captured stdout into a [`Response`].
///
/// Accepts exactly one JSON document conforming to the response shape.
/// A parse failure, trailing data, or a document without a boolean `success`
/// field yields [`BridgeError::Decode`] with the raw text preserved for
/// diagnostics, never a partial or best-effort response.
pub fn decode_response(raw_stdout: &str) -> Result<Response, BridgeError> {
    serde_json::from_str(raw_stdout).map_err(|e| BridgeError::Decode {
        raw: raw_stdout.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn encode_produces_fixed_argument_shape() {
        let inv = Invocation::new("status", options(&[("verbose", json!(true))]));
        let argv = inv.encode_request();
        assert_eq!(argv.len(), 4);
        assert_eq!(argv[0], "-m");
        assert_eq!(argv[1], "devion.main");
        assert_eq!(argv[2], "status");
        assert_eq!(argv[3], r#"{"verbose":true}"#);
    }

    #[test]
    fn encode_with_empty_options_is_an_empty_object() {
        let inv = Invocation::new("scan", Map::new());
        assert_eq!(inv.encode_request()[3], "{}");
    }

    #[test]
    fn options_json_is_a_single_parseable_document() {
        let inv = Invocation::new(
            "deploy",
            options(&[
                ("target", json!("staging")),
                ("steps", json!(["zip", "upload"])),
            ]),
        );
        let argv = inv.encode_request();
        let parsed: Value = serde_json::from_str(&argv[3]).unwrap();
        assert_eq!(parsed, json!({"target": "staging", "steps": ["zip", "upload"]}));
    }

    #[test]
    fn decode_full_response() {
        let resp = decode_response(
            r#"{"success":true,"data":{"x":1},"message":null,"errors":[]}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.data, Some(json!({"x": 1})));
        assert_eq!(resp.message, None);
        assert!(resp.errors.is_empty());
    }

    #[test]
    fn decode_fills_missing_optional_fields() {
        let resp = decode_response(r#"{"success":false}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.data, None);
        assert_eq!(resp.message, None);
        assert!(resp.errors.is_empty());
    }

    #[test]
    fn decode_rejects_non_json_and_preserves_raw() {
        let err = decode_response("not json").unwrap_err();
        match err {
            BridgeError::Decode { raw, .. } => assert_eq!(raw, "not json"),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_trailing_data() {
        let raw = "{\"success\":true}\n{\"success\":false}";
        let err = decode_response(raw).unwrap_err();
        match err {
            BridgeError::Decode { raw: preserved, .. } => assert_eq!(preserved, raw),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_missing_success_field() {
        assert!(matches!(
            decode_response(r#"{"data":{"x":1}}"#),
            Err(BridgeError::Decode { .. })
        ));
    }

    #[test]
    fn decode_rejects_non_boolean_success() {
        assert!(matches!(
            decode_response(r#"{"success":"yes"}"#),
            Err(BridgeError::Decode { .. })
        ));
    }

    #[test]
    fn decode_rejects_diagnostics_interleaved_with_payload() {
        // A backend print statement before the payload must not be skipped
        // over; the whole stdout is surfaced as raw text instead.
        let raw = "warming up...\n{\"success\":true}";
        assert!(matches!(
            decode_response(raw),
            Err(BridgeError::Decode { .. })
        ));
    }

    #[test]
    fn success_with_errors_is_representable() {
        let resp =
            decode_response(r#"{"success":true,"errors":["leftover warning"]}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.errors, vec!["leftover warning".to_string()]);
    }
}
