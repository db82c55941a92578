//! JSON error body exchanged between peers.
//!
//! ```json
//! {"code": "unavailable", "message": "...", "details": [{"type": "google.rpc.RetryInfo", "value": "<base64>"}]}
//! ```
//!
//! Metadata is not part of the body; transports carry it as headers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::detail::ErrorDetail;
use crate::error::CodecError;
use crate::metadata::decode_base64;
use crate::status::Error;
use crate::type_url::type_url_for;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    pub code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<WireDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDetail {
    /// Bare type name, or a full type URL from peers that send one.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Payload bytes as standard base64, unpadded when we produce it.
    pub value: String,
    /// Human-readable rendering of the payload. Ignored on decode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
}

impl From<&Error> for WireError {
    fn from(err: &Error) -> Self {
        Self {
            code: err.code().as_str().to_string(),
            message: err.message(),
            details: err.details().iter().map(WireDetail::from).collect(),
        }
    }
}

impl From<&ErrorDetail> for WireDetail {
    fn from(detail: &ErrorDetail) -> Self {
        Self {
            type_name: detail.type_name().to_string(),
            value: STANDARD_NO_PAD.encode(detail.bytes()),
            debug: None,
        }
    }
}

impl WireDetail {
    pub fn into_detail(self) -> Result<ErrorDetail, CodecError> {
        let bytes = decode_base64(&self.value)?;
        let type_url = if self.type_name.contains('/') {
            self.type_name
        } else {
            type_url_for(&self.type_name)
        };
        Ok(ErrorDetail::from_parts(type_url, bytes))
    }
}

impl WireError {
    /// Rebuilds the peer's error, flagged as a wire error.
    ///
    /// Codes this side does not recognize become [`Code::Unknown`].
    pub fn into_error(self) -> Result<Error, CodecError> {
        let code = self.code.parse::<Code>().unwrap_or_else(|_| {
            tracing::warn!(code = %self.code, "peer sent unrecognized code, using unknown");
            Code::Unknown
        });
        let err = if self.message.is_empty() {
            Error::from_code(code)
        } else {
            Error::with_message(code, self.message)
        };
        let mut err = err.into_wire();
        for detail in self.details {
            err.add_detail(detail.into_detail()?);
        }
        Ok(err)
    }
}

impl Error {
    pub fn to_json(&self) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(&WireError::from(self))?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice::<WireError>(bytes)?.into_error()
    }
}
