//! Response envelope of the backend's action functions.
//!
//! Every action answers `{ success?, error?, data?, message? }`. A response
//! is a failure when `success` is `false` or `error` is set (either `true`
//! or an error string). HTTP failure statuses are failures regardless of
//! the body, but still carry the envelope's message when there is one.

use estatedesk_application::ActionError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The `error` member: a flag, a message, or an error object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Flag(bool),
    Message(String),
    Detail(Value),
}

impl ErrorField {
    fn is_set(&self) -> bool {
        match self {
            ErrorField::Flag(flag) => *flag,
            ErrorField::Message(m) => !m.trim().is_empty(),
            ErrorField::Detail(v) => !v.is_null(),
        }
    }

    fn message(&self) -> Option<String> {
        match self {
            ErrorField::Message(m) if !m.trim().is_empty() => Some(m.clone()),
            ErrorField::Detail(v) => v.get("message").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<ErrorField>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl RawEnvelope {
    fn failed(&self) -> bool {
        self.success == Some(false) || self.error.as_ref().is_some_and(ErrorField::is_set)
    }

    fn failure_message(&self) -> Option<String> {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.as_ref().and_then(ErrorField::message))
    }
}

/// A successful action response
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    /// `None` when the backend sent no `data` (or `null`)
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Decode an action response from its HTTP status and body
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<Decoded<T>, ActionError> {
    let envelope = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str::<RawEnvelope>(body).ok()
    };

    if !(200..300).contains(&status) {
        let message = envelope.as_ref().and_then(RawEnvelope::failure_message);
        return Err(match status {
            404 => ActionError::NotFound(message.unwrap_or_else(|| "resource".to_string())),
            _ => ActionError::Http { status, message },
        });
    }

    let envelope = envelope.ok_or_else(|| {
        ActionError::Decode(format!("expected a JSON envelope, got: {}", preview(body)))
    })?;
    if envelope.failed() {
        return Err(ActionError::Rejected(envelope.failure_message()));
    }

    let data = match envelope.data {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value(value).map_err(|e| ActionError::Decode(e.to_string()))?,
        ),
    };
    Ok(Decoded {
        data,
        message: envelope.message,
    })
}

fn preview(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(80) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estatedesk_domain::Project;

    #[test]
    fn test_success_with_data() {
        let body = r#"{"success": true, "data": [{"id": 1, "name": "Green Valley", "has_blocks": true}]}"#;
        let decoded: Decoded<Vec<Project>> = decode(200, body).unwrap();
        let projects = decoded.data.unwrap();
        assert_eq!(projects[0].name, "Green Valley");
        assert!(projects[0].has_blocks);
    }

    #[test]
    fn test_success_flag_false_is_rejected() {
        let body = r#"{"success": false, "message": "Unit A-101 is already booked"}"#;
        let err = decode::<Value>(200, body).unwrap_err();
        assert_eq!(
            err,
            ActionError::Rejected(Some("Unit A-101 is already booked".to_string()))
        );
    }

    #[test]
    fn test_error_member_variants() {
        let err = decode::<Value>(200, r#"{"error": "Buyer not found"}"#).unwrap_err();
        assert_eq!(err.server_message(), Some("Buyer not found"));

        let err = decode::<Value>(200, r#"{"error": true}"#).unwrap_err();
        assert_eq!(err, ActionError::Rejected(None));

        let err = decode::<Value>(200, r#"{"error": {"message": "Invalid date"}}"#).unwrap_err();
        assert_eq!(err.server_message(), Some("Invalid date"));

        // a cleared error member is not a failure
        assert!(decode::<Value>(200, r#"{"error": false, "data": 1}"#).is_ok());
    }

    #[test]
    fn test_http_status_keeps_envelope_message() {
        let err = decode::<Value>(500, r#"{"error": true, "message": "Database unavailable"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::Http {
                status: 500,
                message: Some("Database unavailable".to_string())
            }
        );

        let err = decode::<Value>(502, "<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err, ActionError::Http { status: 502, message: None });

        assert!(matches!(
            decode::<Value>(404, ""),
            Err(ActionError::NotFound(_))
        ));
    }

    #[test]
    fn test_null_data_and_bad_shapes() {
        let decoded: Decoded<Vec<Project>> =
            decode(200, r#"{"success": true, "data": null, "message": "ok"}"#).unwrap();
        assert!(decoded.data.is_none());
        assert_eq!(decoded.message.as_deref(), Some("ok"));

        assert!(matches!(
            decode::<Vec<Project>>(200, r#"{"success": true, "data": {"id": "x"}}"#),
            Err(ActionError::Decode(_))
        ));
        assert!(matches!(
            decode::<Value>(200, "not json"),
            Err(ActionError::Decode(_))
        ));
    }
}
