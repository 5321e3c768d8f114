//! Response envelope classification.
//!
//! Every Gumroad endpoint answers with a JSON object carrying a `success`
//! flag plus either a payload or an error description. This module turns a
//! status code and body into either a usable [`Envelope`] or the matching
//! [`GumroadError`]. It does no I/O.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GumroadError, Result, UNKNOWN_ERROR_MESSAGE};

/// Statuses whose body is never inspected.
const NETWORK_ERROR_STATUSES: [u16; 3] = [403, 404, 500];

/// A response envelope that declared success.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Envelope(Value);

impl Envelope {
    /// Classify a response body received with `status`.
    ///
    /// The status check must already have passed; see [`check_status`].
    pub(crate) fn parse(status: u16, body: &str) -> Result<Self> {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(status, error = %e, "response body is not JSON");
                return Err(GumroadError::Network {
                    status: Some(status),
                });
            }
        };

        if !is_truthy(&value) {
            tracing::warn!(status, "response body is empty");
            return Err(GumroadError::Network {
                status: Some(status),
            });
        }

        let succeeded = value.get("success").is_some_and(is_truthy);
        if !succeeded {
            let message = error_message(&value);
            tracing::warn!(status, %message, "request rejected by API");
            return Err(GumroadError::Api { message });
        }

        Ok(Self(value))
    }

    /// Remove `key` from the envelope and decode it.
    ///
    /// A missing key is a decode error, not a default.
    pub(crate) fn take<T: DeserializeOwned>(&mut self, key: &'static str) -> Result<T> {
        let value = self
            .0
            .as_object_mut()
            .and_then(|map| map.remove(key))
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field(key))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Like [`take`](Self::take), but a missing or `null` key is `None`.
    pub(crate) fn take_optional<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        match self.0.as_object_mut().and_then(|map| map.remove(key)) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(None),
        }
    }
}

/// Fail fast on the statuses that are reported as plain network errors.
pub(crate) fn check_status(status: u16) -> Result<()> {
    if NETWORK_ERROR_STATUSES.contains(&status) {
        tracing::warn!(status, "network error status");
        return Err(GumroadError::Network {
            status: Some(status),
        });
    }
    Ok(())
}

/// Loose truthiness as used by the service: `null`, `false`, zero, `""`,
/// `"0"` and `[]` are false; objects are always true.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Pick the message out of a failed envelope: `error.message`, then
/// `message`, then a fixed fallback.
fn error_message(envelope: &Value) -> String {
    envelope
        .get("error")
        .and_then(|error| error.get("message"))
        .filter(|m| !m.is_null())
        .or_else(|| envelope.get("message").filter(|m| !m.is_null()))
        .map(|m| match m {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn api_message(body: &str) -> String {
        match Envelope::parse(200, body) {
            Err(GumroadError::Api { message }) => message,
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_status() {
        for status in [403, 404, 500] {
            let err = check_status(status).unwrap_err();
            assert!(matches!(err, GumroadError::Network { status: Some(s) } if s == status));
        }
        for status in [200, 201, 400, 401, 422, 502, 503] {
            assert!(check_status(status).is_ok());
        }
    }

    #[test]
    fn test_success_envelope() {
        let mut envelope = Envelope::parse(200, r#"{"success": true, "token": "abc123"}"#).unwrap();
        let token: String = envelope.take("token").unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn test_unparseable_body_is_network_error() {
        for body in ["", "<html>oops</html>", "{\"success\": tru"] {
            let err = Envelope::parse(200, body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Network);
        }
    }

    #[test]
    fn test_falsy_body_is_network_error() {
        for body in ["null", "false", "0", "\"\"", "\"0\"", "[]"] {
            let err = Envelope::parse(200, body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Network, "body {body}");
        }
    }

    #[test]
    fn test_message_precedence() {
        assert_eq!(
            api_message(r#"{"success": false, "error": {"message": "nested"}, "message": "flat"}"#),
            "nested"
        );
        assert_eq!(
            api_message(r#"{"success": false, "message": "Invalid credentials"}"#),
            "Invalid credentials"
        );
        assert_eq!(api_message(r#"{"success": false}"#), "Unknown Error");
        assert_eq!(
            api_message(r#"{"success": false, "error": "flat string", "message": "flat"}"#),
            "flat"
        );
        assert_eq!(api_message(r#"{"success": false, "message": 42}"#), "42");
    }

    #[test]
    fn test_missing_or_falsy_success_is_api_error() {
        assert_eq!(api_message("{}"), "Unknown Error");
        assert_eq!(api_message(r#"{"success": 0}"#), "Unknown Error");
        assert_eq!(api_message(r#"{"success": "0"}"#), "Unknown Error");
        assert!(Envelope::parse(200, r#"{"success": 1}"#).is_ok());
    }

    #[test]
    fn test_take_missing_key_is_decode_error() {
        let mut envelope = Envelope::parse(200, r#"{"success": true}"#).unwrap();
        let err = envelope.take::<Vec<u32>>("links").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!(0.5)));
        assert!(!is_truthy(&json!(0.0)));
    }
}
