use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::CodecError;
use crate::type_url::{type_name_from_url, type_url_for};
use crate::well_known;

/// A protobuf message that can travel as an error detail.
///
/// `TYPE_NAME` is the fully-qualified schema name (e.g. `google.rpc.RetryInfo`).
pub trait DetailMessage: prost::Message + Default + 'static {
    const TYPE_NAME: &'static str;
}

/// Type-erased view of a decoded detail message.
pub trait DetailValue: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

impl<M: DetailMessage> DetailValue for M {
    fn type_name(&self) -> &'static str {
        M::TYPE_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn DetailValue {
    pub fn downcast_ref<M: DetailMessage>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }
}

/// An opaque typed payload carried alongside an [`Error`](crate::Error).
///
/// Immutable once built. Clones share the underlying byte buffer.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    type_url: String,
    bytes: Arc<[u8]>,
}

impl ErrorDetail {
    /// Encodes `message` and records its type URL.
    pub fn new<M: DetailMessage>(message: &M) -> Result<Self, CodecError> {
        let mut buf = Vec::with_capacity(message.encoded_len());
        message.encode(&mut buf).map_err(|source| CodecError::Encode {
            type_name: M::TYPE_NAME.to_string(),
            source,
        })?;
        Ok(Self {
            type_url: type_url_for(M::TYPE_NAME),
            bytes: buf.into(),
        })
    }

    /// Rebuilds a detail from a type URL and bytes received from a peer.
    pub fn from_parts(type_url: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            type_url: type_url.into(),
            bytes: bytes.into(),
        }
    }

    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    /// Bare type name, with any resolver prefix stripped.
    pub fn type_name(&self) -> &str {
        type_name_from_url(&self.type_url)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decodes the payload with the decoder `registry` holds for [`type_name`](Self::type_name).
    pub fn value(&self, registry: &Registry) -> Result<Box<dyn DetailValue>, CodecError> {
        registry.decode(self.type_name(), &self.bytes)
    }

    /// Decodes the payload as `M`, failing if the recorded type is not `M`.
    pub fn decode<M: DetailMessage>(&self) -> Result<M, CodecError> {
        let found = self.type_name();
        if found != M::TYPE_NAME {
            return Err(CodecError::TypeMismatch {
                expected: M::TYPE_NAME,
                found: found.to_string(),
            });
        }
        M::decode(&self.bytes[..]).map_err(|source| CodecError::Decode {
            type_name: found.to_string(),
            source,
        })
    }
}

type DecodeFn = fn(&[u8]) -> Result<Box<dyn DetailValue>, prost::DecodeError>;

fn decode_boxed<M: DetailMessage>(
    bytes: &[u8],
) -> Result<Box<dyn DetailValue>, prost::DecodeError> {
    Ok(Box::new(M::decode(bytes)?))
}

/// Decoders for detail messages, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    decoders: HashMap<&'static str, DecodeFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the messages in [`well_known`].
    pub fn with_well_known() -> Self {
        let mut registry = Self::new();
        registry
            .register::<well_known::Empty>()
            .register::<well_known::Duration>()
            .register::<well_known::ErrorInfo>()
            .register::<well_known::RetryInfo>()
            .register::<well_known::BadRequest>()
            .register::<well_known::LocalizedMessage>();
        registry
    }

    pub fn register<M: DetailMessage>(&mut self) -> &mut Self {
        self.decoders.insert(M::TYPE_NAME, decode_boxed::<M>);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.decoders.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    pub fn decode(
        &self,
        type_name: &str,
        bytes: &[u8],
    ) -> Result<Box<dyn DetailValue>, CodecError> {
        let Some(decode) = self.decoders.get(type_name) else {
            tracing::debug!(type_name, "no decoder registered for detail type");
            return Err(CodecError::UnknownType {
                type_name: type_name.to_string(),
            });
        };
        decode(bytes).map_err(|source| {
            tracing::debug!(type_name, error = %source, "detail payload failed to decode");
            CodecError::Decode {
                type_name: type_name.to_string(),
                source,
            }
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use prost::Message;

    use super::*;
    use crate::type_url::DEFAULT_TYPE_URL_PREFIX;
    use crate::well_known::{Duration, Empty, RetryInfo};

    #[derive(Clone, PartialEq, prost::Message)]
    struct QuotaFailure {
        #[prost(string, tag = "1")]
        subject: String,
        #[prost(uint64, tag = "2")]
        limit: u64,
    }

    impl DetailMessage for QuotaFailure {
        const TYPE_NAME: &'static str = "acme.billing.v1.QuotaFailure";
    }

    #[test]
    fn new_records_prefixed_type_url() {
        let detail = ErrorDetail::new(&Empty {}).unwrap();
        assert_eq!(
            detail.type_url(),
            format!("{DEFAULT_TYPE_URL_PREFIX}google.protobuf.Empty")
        );
        assert_eq!(detail.type_name(), "google.protobuf.Empty");
        assert!(detail.bytes().is_empty());
    }

    #[test]
    fn bytes_match_direct_encoding() {
        let quota = QuotaFailure {
            subject: "project:42".into(),
            limit: 100,
        };
        let detail = ErrorDetail::new(&quota).unwrap();
        assert_eq!(detail.bytes(), quota.encode_to_vec().as_slice());

        let second = Duration {
            seconds: 1,
            nanos: 0,
        };
        let detail = ErrorDetail::new(&second).unwrap();
        assert_eq!(detail.bytes(), [0x08_u8, 0x01]);
    }

    #[test]
    fn value_decodes_registered_types() {
        let second = Duration {
            seconds: 1,
            nanos: 0,
        };
        let detail = ErrorDetail::new(&second).unwrap();
        let registry = Registry::with_well_known();

        let value = detail.value(&registry).unwrap();
        assert_eq!(value.type_name(), "google.protobuf.Duration");
        assert_eq!(value.downcast_ref::<Duration>(), Some(&second));
        assert_eq!(value.downcast_ref::<Empty>(), None);
    }

    #[test]
    fn value_fails_for_unregistered_type() {
        let detail = ErrorDetail::new(&QuotaFailure {
            subject: "s".into(),
            limit: 1,
        })
        .unwrap();

        let err = detail.value(&Registry::with_well_known()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownType { ref type_name } if type_name == "acme.billing.v1.QuotaFailure"
        ));

        let mut registry = Registry::new();
        registry.register::<QuotaFailure>();
        assert!(registry.contains("acme.billing.v1.QuotaFailure"));
        let value = detail.value(&registry).unwrap();
        assert_eq!(value.downcast_ref::<QuotaFailure>().unwrap().subject, "s");
    }

    #[test]
    fn value_fails_for_corrupt_bytes() {
        // Field 1, length-delimited, claims 5 bytes but only 1 follows.
        let detail = ErrorDetail::from_parts(
            "type.googleapis.com/google.rpc.RetryInfo",
            vec![0x0a, 0x05, 0x08],
        );
        let err = detail.value(&Registry::with_well_known()).unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
        assert!(matches!(
            detail.decode::<RetryInfo>(),
            Err(CodecError::Decode { .. })
        ));
    }

    #[test]
    fn typed_decode_checks_type_name() {
        let detail = ErrorDetail::new(&Empty {}).unwrap();
        assert_eq!(detail.decode::<Empty>().unwrap(), Empty {});
        let err = detail.decode::<Duration>().unwrap_err();
        assert!(matches!(
            err,
            CodecError::TypeMismatch { expected: "google.protobuf.Duration", ref found }
                if found == "google.protobuf.Empty"
        ));
    }

    #[test]
    fn clones_share_bytes() {
        let detail = ErrorDetail::new(&Duration {
            seconds: 1,
            nanos: 500_000_000,
        })
        .unwrap();
        let copy = detail.clone();
        assert!(std::ptr::eq(detail.bytes(), copy.bytes()));
    }
}
