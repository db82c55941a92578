/// Failures raised while encoding, decoding, or reconstructing status values.
///
/// These never carry a status [`Code`](crate::Code) themselves; convert with
/// `Error::from` when a handler needs to surface one to a peer.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("encode error for {type_name}: {source}")]
    Encode {
        type_name: String,
        #[source]
        source: prost::EncodeError,
    },

    #[error("decode error for {type_name}: {source}")]
    Decode {
        type_name: String,
        #[source]
        source: prost::DecodeError,
    },

    #[error("unknown detail type: {type_name}")]
    UnknownType { type_name: String },

    #[error("detail type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("invalid code: {code}")]
    InvalidCode { code: u32 },

    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
