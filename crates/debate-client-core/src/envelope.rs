use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

const MESSAGE_FALLBACK: &str = "request rejected";

/// Outcome of decoding one response body against the
/// `{success, message, data}` wire contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedBody {
    /// Body matched the envelope shape and reported success.
    Enveloped { message: String, data: Value },
    /// Legacy-compatibility branch: some endpoints return the payload
    /// without an envelope. The body passes through untouched.
    Bare(Value),
}

impl DecodedBody {
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Enveloped { data, .. } => data,
            Self::Bare(value) => value,
        }
    }
}

/// Decodes a parsed response body. A JSON object carrying a `data` key is
/// treated as an envelope whether or not `success` is present; `success`
/// explicitly false is a failure carrying the server message. Anything
/// else is a bare payload. Exactly one level is unwrapped; a nested
/// `data.data` stays wrapped for the caller.
pub fn decode_body(body: Value) -> Result<DecodedBody, ClientError> {
    match body {
        Value::Object(mut map) => {
            if !map.contains_key("data") {
                return Ok(DecodedBody::Bare(Value::Object(map)));
            }
            let success = map
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if !success {
                let message = if message.is_empty() {
                    MESSAGE_FALLBACK.to_string()
                } else {
                    message
                };
                return Err(ClientError::Protocol { message });
            }
            let data = map.remove("data").unwrap_or(Value::Null);
            Ok(DecodedBody::Enveloped { message, data })
        }
        other => Ok(DecodedBody::Bare(other)),
    }
}

/// Convenience form of [`decode_body`]: envelopes yield their `data`,
/// bare bodies pass through unchanged.
pub fn unwrap_envelope(body: Value) -> Result<Value, ClientError> {
    decode_body(body).map(DecodedBody::into_value)
}

/// Typed unwrap. A body that fails to deserialize into `T` where a
/// payload was required is a protocol error.
pub fn unwrap_payload<T: DeserializeOwned>(body: Value) -> Result<T, ClientError> {
    let payload = unwrap_envelope(body)?;
    serde_json::from_value(payload).map_err(|error| ClientError::Protocol {
        message: format!("unexpected response shape: {error}"),
    })
}
