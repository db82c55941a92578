use std::borrow::Cow;

use crate::error::CodecError;

/// Status code attached to every RPC failure.
///
/// The numeric values match the gRPC and Connect protocols. The canonical
/// string form is lowercase snake_case and is what peers exchange in error
/// bodies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
    strum_macros::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum Code {
    Canceled = 1,
    #[default]
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl Code {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Transient conditions a caller may retry, provided the RPC is idempotent.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::Unavailable | Self::ResourceExhausted | Self::Aborted
        )
    }
}

impl TryFrom<u32> for Code {
    type Error = CodecError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_u32(value).ok_or(CodecError::InvalidCode { code: value })
    }
}

impl From<Code> for u32 {
    fn from(code: Code) -> Self {
        code.as_u32()
    }
}

/// Name for a numeric code received from a peer.
///
/// Values outside the known set render as `code_<n>` instead of failing.
pub fn code_name(raw: u32) -> Cow<'static, str> {
    match Code::from_u32(raw) {
        Some(code) => Cow::Borrowed(code.as_str()),
        None => Cow::Owned(format!("code_{raw}")),
    }
}
