//! Response envelope handling.
//!
//! Every 2xx response from the VibeQueue backend (except login and the
//! payout history) is wrapped as `{"success": bool, "message": ...}`
//! where `message` is usually a JSON-encoded *string* holding the real
//! payload, and occasionally a plain JSON object.

use crate::error::{ClientError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: serde_json::Value,
}

impl ApiEnvelope {
    /// The server's message as display text (for rejection errors).
    fn message_text(&self) -> String {
        match &self.message {
            serde_json::Value::String(s) if !s.is_empty() => s.clone(),
            serde_json::Value::Null => "Unknown error occurred".to_string(),
            other => other.to_string(),
        }
    }

    /// Decode the payload carried in `message`.
    fn into_payload<T: DeserializeOwned>(self) -> Result<T> {
        match self.message {
            serde_json::Value::String(s) => serde_json::from_str(&s)
                .map_err(|e| ClientError::Parse(format!("invalid payload in envelope: {e}"))),
            other => serde_json::from_value(other)
                .map_err(|e| ClientError::Parse(format!("invalid payload in envelope: {e}"))),
        }
    }
}

/// Map transport-level failures, distinguishing unreachable hosts.
pub(crate) fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::Unreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Turn a non-2xx response body into a `ClientError`.
fn status_error(status: reqwest::StatusCode, body: &str) -> ClientError {
    if status.as_u16() == 401 {
        return ClientError::AuthRequired;
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                "Unknown error occurred".to_string()
            } else {
                body.to_string()
            }
        });

    ClientError::Server {
        status: status.as_u16(),
        message,
    }
}

/// Read an enveloped response and decode the payload inside `message`.
pub(crate) async fn read_payload<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(status_error(status, &body));
    }

    let envelope: ApiEnvelope = serde_json::from_str(&body)
        .map_err(|e| ClientError::Parse(format!("invalid envelope: {e}")))?;

    if !envelope.success {
        return Err(ClientError::Rejected(envelope.message_text()));
    }

    envelope.into_payload()
}

/// Read an enveloped response where only the success flag matters.
pub(crate) async fn read_ack(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(status_error(status, &body));
    }

    let envelope: ApiEnvelope = serde_json::from_str(&body)
        .map_err(|e| ClientError::Parse(format!("invalid envelope: {e}")))?;

    if !envelope.success {
        return Err(ClientError::Rejected(envelope.message_text()));
    }

    Ok(())
}

/// Read a bare (non-enveloped) JSON response.
pub(crate) async fn read_bare<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(status_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Parse(format!("invalid response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_string_payload() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success": true, "message": "{\"a\": 1}"}"#).unwrap();
        assert!(envelope.success);

        #[derive(Deserialize)]
        struct Payload {
            a: i64,
        }
        let payload: Payload = envelope.into_payload().unwrap();
        assert_eq!(payload.a, 1);
    }

    #[test]
    fn envelope_with_object_payload() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success": true, "message": {"url": "https://x"}}"#).unwrap();

        #[derive(Deserialize)]
        struct Payload {
            url: String,
        }
        let payload: Payload = envelope.into_payload().unwrap();
        assert_eq!(payload.url, "https://x");
    }

    #[test]
    fn failed_envelope_message_text() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success": false, "message": "no such event"}"#).unwrap();
        assert_eq!(envelope.message_text(), "no such event");
    }

    #[test]
    fn empty_message_falls_back() {
        let envelope: ApiEnvelope = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(envelope.message_text(), "Unknown error occurred");
    }
}
