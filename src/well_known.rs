//! Common detail messages.
//!
//! `Empty` and `Duration` are the protobuf well-known types; the rest mirror
//! `google/rpc/error_details.proto` field for field, so peers in other
//! languages decode the same bytes.

use std::collections::BTreeMap;

use crate::detail::DetailMessage;

pub use prost_types::Duration;

/// `google.protobuf.Empty`; prost-types maps it to `()`, so it is declared here.
#[derive(Clone, Copy, PartialEq, Eq, prost::Message)]
pub struct Empty {}

impl DetailMessage for Empty {
    const TYPE_NAME: &'static str = "google.protobuf.Empty";
}

impl DetailMessage for Duration {
    const TYPE_NAME: &'static str = "google.protobuf.Duration";
}

/// Machine-readable cause of an error.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct ErrorInfo {
    #[prost(string, tag = "1")]
    pub reason: String,
    #[prost(string, tag = "2")]
    pub domain: String,
    #[prost(btree_map = "string, string", tag = "3")]
    pub metadata: BTreeMap<String, String>,
}

impl DetailMessage for ErrorInfo {
    const TYPE_NAME: &'static str = "google.rpc.ErrorInfo";
}

/// How long a client should wait before retrying.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RetryInfo {
    #[prost(message, optional, tag = "1")]
    pub retry_delay: Option<Duration>,
}

impl DetailMessage for RetryInfo {
    const TYPE_NAME: &'static str = "google.rpc.RetryInfo";
}

#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct FieldViolation {
    #[prost(string, tag = "1")]
    pub field: String,
    #[prost(string, tag = "2")]
    pub description: String,
}

/// Invalid fields in a client request.
#[derive(Clone, PartialEq, prost::Message)]
pub struct BadRequest {
    #[prost(message, repeated, tag = "1")]
    pub field_violations: Vec<FieldViolation>,
}

impl DetailMessage for BadRequest {
    const TYPE_NAME: &'static str = "google.rpc.BadRequest";
}

#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct LocalizedMessage {
    #[prost(string, tag = "1")]
    pub locale: String,
    #[prost(string, tag = "2")]
    pub message: String,
}

impl DetailMessage for LocalizedMessage {
    const TYPE_NAME: &'static str = "google.rpc.LocalizedMessage";
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use prost::Message;

    use super::*;
    use crate::detail::Registry;

    #[test]
    fn retry_info_matches_protobuf_encoding() {
        let retry = RetryInfo {
            retry_delay: Some(Duration {
                seconds: 1,
                nanos: 0,
            }),
        };
        // field 1 (len 2) holding Duration field 1 = 1
        assert_eq!(retry.encode_to_vec(), [0x0a_u8, 0x02, 0x08, 0x01]);
        assert_eq!(RetryInfo::decode(&[0x0a_u8, 0x02, 0x08, 0x01][..]).unwrap(), retry);
    }

    #[test]
    fn bad_request_decodes_repeated_violations() {
        let bad = BadRequest {
            field_violations: vec![
                FieldViolation {
                    field: "name".into(),
                    description: "required".into(),
                },
                FieldViolation {
                    field: "age".into(),
                    description: "must be positive".into(),
                },
            ],
        };
        let decoded = BadRequest::decode(bad.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.field_violations.len(), 2);
        assert_eq!(decoded.field_violations[0].field, "name");
        assert_eq!(decoded.field_violations[1].description, "must be positive");
    }

    #[test]
    fn missing_fields_default() {
        // only field 1 (reason) = "QUOTA"
        let info = ErrorInfo::decode(&b"\x0a\x05QUOTA"[..]).unwrap();
        assert_eq!(info.reason, "QUOTA");
        assert!(info.domain.is_empty());
        assert!(info.metadata.is_empty());
    }

    #[test]
    fn empty_encodes_to_no_bytes() {
        assert!(Empty {}.encode_to_vec().is_empty());
        assert_eq!(Empty::decode(b"".as_slice()).unwrap(), Empty {});
    }

    #[test]
    fn well_known_registry_covers_every_message() {
        let registry = Registry::with_well_known();
        for name in [
            Empty::TYPE_NAME,
            Duration::TYPE_NAME,
            ErrorInfo::TYPE_NAME,
            RetryInfo::TYPE_NAME,
            BadRequest::TYPE_NAME,
            LocalizedMessage::TYPE_NAME,
        ] {
            assert!(registry.contains(name), "{name} not registered");
        }
        assert_eq!(registry.len(), 6);
    }
}
