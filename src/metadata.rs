use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

use crate::error::CodecError;

/// Suffix marking a key whose values carry base64-encoded binary data.
pub const BINARY_KEY_SUFFIX: &str = "-bin";

/// Ordered multi-value key/value annotations attached to an error.
///
/// Keys compare ASCII case-insensitively, like HTTP header names. A key keeps
/// the spelling it was first inserted with, and keys iterate in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, Vec<String>)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    /// Replaces every value stored under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = vec![value],
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Appends a value, keeping any already stored under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// First value for `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.values(key).first().map_or("", String::as_str)
    }

    pub fn values(&self, key: &str) -> &[String] {
        match self.position(key) {
            Some(idx) => &self.entries[idx].1,
            None => &[],
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Every `(key, value)` pair, in key insertion order then value order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Appends all of `other`'s values to this map.
    pub fn extend(&mut self, other: &Metadata) {
        for (key, value) in other.iter() {
            self.add(key, value);
        }
    }

    /// Stores `value` as unpadded base64. `key` should end in [`BINARY_KEY_SUFFIX`].
    pub fn set_binary(&mut self, key: impl Into<String>, value: &[u8]) {
        self.set(key, STANDARD_NO_PAD.encode(value));
    }

    /// Decodes the first value under `key`, accepting padded or unpadded base64.
    pub fn get_binary(&self, key: &str) -> Result<Option<Vec<u8>>, CodecError> {
        match self.values(key).first() {
            Some(value) => decode_base64(value).map(Some),
            None => Ok(None),
        }
    }
}

pub fn is_binary_key(key: &str) -> bool {
    let suffix = BINARY_KEY_SUFFIX.as_bytes();
    key.len() >= suffix.len()
        && key.as_bytes()[key.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

pub(crate) fn decode_base64(value: &str) -> Result<Vec<u8>, CodecError> {
    let decoded = if value.len().is_multiple_of(4) {
        STANDARD.decode(value)?
    } else {
        STANDARD_NO_PAD.decode(value)?
    };
    Ok(decoded)
}
