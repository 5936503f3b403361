//! Content-type label attached to exported audio

use std::fmt;

/// Content type used when the caller does not supply one
pub const DEFAULT_CONTENT_TYPE: &str = "audio/wav";

/// Free-form MIME label carried alongside the encoded bytes.
///
/// The label is not interpreted; callers may tag the WAV bytes with any
/// type their consumer expects (e.g. `audio/x-wav`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType(String);

impl ContentType {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Use `value` when present and non-blank, the default otherwise
    pub fn or_default(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Self::new(v),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ContentType {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_TYPE)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
