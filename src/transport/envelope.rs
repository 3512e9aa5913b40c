//! The `{status, data, message}` envelope wrapped around every API response
//! except `/health`.

use crate::{Error, Result, error::DEFAULT_API_ERROR_MESSAGE};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    #[serde(alias = "success")]
    Ok,
    Error,
    /// Any literal other than the known ones. Handled like `Error`.
    #[serde(other)]
    Unknown,
}

impl EnvelopeStatus {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Payload stays untyped until the status is known, so an error envelope
// with odd `data` still surfaces as `Error::Api`.
#[derive(Deserialize)]
struct RawEnvelope {
    status: EnvelopeStatus,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Ok,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Unwraps the payload, turning an error-shaped envelope into
    /// `Error::Api` so callers never branch on `status` themselves.
    pub fn into_result(self) -> Result<T> {
        match self.status {
            EnvelopeStatus::Ok => self
                .data
                .ok_or_else(|| Error::decode("envelope status is ok but data is missing")),
            EnvelopeStatus::Error | EnvelopeStatus::Unknown => Err(Error::api(
                self.message
                    .unwrap_or_else(|| DEFAULT_API_ERROR_MESSAGE.to_string()),
            )),
        }
    }
}

/// Decodes raw response bytes into an envelope.
///
/// Structural problems (invalid JSON, missing `status`, `data` not matching
/// `T` on an ok envelope) yield `Error::Decode`. An error envelope decodes
/// successfully with `data` dropped.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<ApiResponse<T>> {
    let raw: RawEnvelope = serde_json::from_slice(bytes)
        .map_err(|e| Error::decode(format!("invalid response envelope: {e}")))?;

    let data = match (raw.status, raw.data) {
        (EnvelopeStatus::Ok, Some(Value::Null)) | (EnvelopeStatus::Ok, None) => None,
        (EnvelopeStatus::Ok, Some(value)) => Some(
            serde_json::from_value(value)
                .map_err(|e| Error::decode(format!("invalid response data: {e}")))?,
        ),
        _ => None,
    };

    Ok(ApiResponse {
        status: raw.status,
        data,
        message: raw.message,
    })
}

/// Serializes an outgoing request body. Unset optional fields are expected
/// to be skipped by the body type itself rather than sent as `null`.
pub fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(body)?)
}

/// Best-effort read of an error envelope's message from a non-2xx body.
pub(crate) fn error_message(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<RawEnvelope>(bytes)
        .ok()
        .filter(|raw| !raw.status.is_ok())
        .and_then(|raw| raw.message)
}
