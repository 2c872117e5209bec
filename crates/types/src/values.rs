//! Flat name-value pair maps, the wire format used for both NVP requests and replies.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

/// Reasons a body is not a well-formed NVP string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NvpParseError {
    /// `;` is not accepted as a pair separator
    #[error("invalid semicolon separator in {0:?}")]
    SemicolonSeparator(String),

    /// `%` not followed by two hex digits
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
}

fn check_escapes(segment: &str) -> Result<(), NvpParseError> {
    let bytes = segment.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        if *byte != b'%' {
            continue;
        }
        let valid = bytes
            .get(index + 1..index + 3)
            .is_some_and(|hex| hex.iter().all(|b| b.is_ascii_hexdigit()));
        if !valid {
            let escape: String = String::from_utf8_lossy(&bytes[index..])
                .chars()
                .take(3)
                .collect();
            return Err(NvpParseError::InvalidEscape(escape));
        }
    }
    Ok(())
}

/// Ordered multimap of NVP fields
///
/// Keys keep their first-insertion order. A key may carry several values,
/// like a parsed query string; [`NvpValues::get`] returns the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NvpValues {
    inner: IndexMap<String, Vec<String>>,
}

impl NvpValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL-encoded body (`KEY=value&OTHER=value`), leniently.
    ///
    /// Never fails: invalid percent-escapes are decoded lossily and empty
    /// segments are skipped. Use [`NvpValues::parse_strict`] for replies
    /// coming off the wire.
    pub fn parse(body: &str) -> Self {
        Self::decode_pairs(body.trim())
    }

    /// Parse a URL-encoded body, rejecting anything that is not a
    /// well-formed NVP string.
    ///
    /// Fails on `;` inside a pair and on `%` not followed by two hex
    /// digits. An empty body is an empty map.
    pub fn parse_strict(body: &str) -> Result<Self, NvpParseError> {
        for segment in body.split('&') {
            if segment.contains(';') {
                return Err(NvpParseError::SemicolonSeparator(segment.to_string()));
            }
            check_escapes(segment)?;
        }
        Ok(Self::decode_pairs(body))
    }

    fn decode_pairs(body: &str) -> Self {
        let mut values = Self::new();
        for (key, value) in form_urlencoded::parse(body.as_bytes()) {
            values.add(key.into_owned(), value.into_owned());
        }
        values
    }

    /// First value for `key`, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value for `key`, or the empty string
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// All values stored under `key`
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Append a value, keeping any existing ones
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Replace every value of `key` with `value`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Flattened `(key, value)` pairs in insertion order
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.inner
            .iter()
            .flat_map(|(key, values)| {
                values
                    .iter()
                    .map(move |value| (key.as_str(), value.as_str()))
            })
            .collect()
    }

    /// Encode as an `application/x-www-form-urlencoded` string
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(self.pairs());
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for NvpValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (key, value) in iter {
            values.add(key, value);
        }
        values
    }
}
