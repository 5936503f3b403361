//! Exported WAV document value object

use super::ContentType;

/// Encoded WAV bytes together with their content-type label.
///
/// An empty document means nothing was captured; it carries no header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavDocument {
    bytes: Vec<u8>,
    content_type: ContentType,
}

impl WavDocument {
    pub fn new(bytes: Vec<u8>, content_type: ContentType) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    /// Get the encoded bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume and return the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Exact length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.len();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the bytes as standard base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}
