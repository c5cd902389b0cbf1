//! Response decoding and outcome classification.
//!
//! Everything here is pure: the engine hands over a status code and the raw
//! body text, and gets back one of the [`Outcome`] variants.

use serde_json::{Map, Value};

use crate::error::ApiError;

/// What a single HTTP response means to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A usable payload. Non-object bodies are already wrapped as `{"data": ...}`.
    Success(Map<String, Value>),
    /// The server answered with status >= 400. May be retried.
    Failure(ApiError),
    /// A non-error status carrying `"success": false`. Never retried.
    Rejected(ApiError),
}

/// Decode a response body as JSON.
///
/// Never fails: an empty body decodes to `null`, and text that is not JSON
/// becomes `{"message": <text>}`.
pub fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| {
        let mut map = Map::new();
        map.insert("message".to_string(), Value::String(text.to_string()));
        Value::Object(map)
    })
}

/// Classify a response into an [`Outcome`].
pub fn classify(status: u16, body: &str) -> Outcome {
    if status == 204 {
        return Outcome::Success(Map::new());
    }

    let payload = decode_body(body);

    if status >= 400 {
        return Outcome::Failure(ApiError::from_payload(status, &payload));
    }

    match payload {
        Value::Object(map) if map.get("success") == Some(&Value::Bool(false)) => {
            Outcome::Rejected(ApiError::from_payload(status, &Value::Object(map)))
        }
        Value::Object(map) => Outcome::Success(map),
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            Outcome::Success(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn success(outcome: Outcome) -> Value {
        match outcome {
            Outcome::Success(map) => Value::Object(map),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_no_content_is_empty_object() {
        assert_eq!(success(classify(204, "")), json!({}));
        assert_eq!(success(classify(204, "{\"ignored\": true}")), json!({}));
        assert_eq!(success(classify(204, "not json")), json!({}));
    }

    #[test]
    fn test_object_is_returned_as_is() {
        let body = r#"{"success": true, "data": {"id": "lnk_abc123"}}"#;
        assert_eq!(
            success(classify(200, body)),
            json!({"success": true, "data": {"id": "lnk_abc123"}})
        );
    }

    #[test]
    fn test_non_object_is_wrapped() {
        assert_eq!(success(classify(200, "[1, 2]")), json!({"data": [1, 2]}));
        assert_eq!(success(classify(200, "42")), json!({"data": 42}));
        assert_eq!(success(classify(200, "")), json!({"data": null}));
    }

    #[test]
    fn test_invalid_json_becomes_message() {
        assert_eq!(decode_body("<html>oops</html>"), json!({"message": "<html>oops</html>"}));
        assert_eq!(
            success(classify(200, "plain text")),
            json!({"message": "plain text"})
        );

        match classify(502, "Bad Gateway") {
            Outcome::Failure(err) => {
                assert_eq!(err.status, 502);
                assert_eq!(err.message, "Bad Gateway");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_error_status_is_failure() {
        let body = r#"{"success": false, "code": "SLUG_EXISTS", "message": "The slug is already in use."}"#;
        match classify(409, body) {
            Outcome::Failure(err) => {
                assert_eq!(err.status, 409);
                assert_eq!(err.code.as_deref(), Some("SLUG_EXISTS"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_success_false_is_rejected() {
        let body = r#"{"success": false, "error": {"code": "QUOTA", "message": "Quota exceeded"}}"#;
        match classify(200, body) {
            Outcome::Rejected(err) => {
                assert_eq!(err.status, 200);
                assert_eq!(err.message, "Quota exceeded");
                assert_eq!(err.code.as_deref(), Some("QUOTA"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_success_must_be_literal_false() {
        assert_eq!(
            success(classify(200, r#"{"success": null}"#)),
            json!({"success": null})
        );
        assert_eq!(
            success(classify(200, r#"{"success": 0}"#)),
            json!({"success": 0})
        );
    }
}
