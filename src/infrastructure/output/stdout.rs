//! Stdout sink adapter

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{DeliveryError, WavSink};
use crate::domain::audio::WavDocument;

#[derive(Debug, Serialize)]
struct Payload<'a> {
    content_type: &'a str,
    size: usize,
    /// Base64 (standard alphabet) of the WAV bytes
    data: String,
}

/// Prints the document as one JSON line on stdout
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }

    fn render(document: &WavDocument) -> Result<String, DeliveryError> {
        let payload = Payload {
            content_type: document.content_type().as_str(),
            size: document.len(),
            data: document.to_base64(),
        };
        serde_json::to_string(&payload).map_err(|e| DeliveryError::WriteFailed(e.to_string()))
    }
}

#[async_trait]
impl WavSink for StdoutSink {
    async fn deliver(&self, document: &WavDocument) -> Result<String, DeliveryError> {
        if document.is_empty() {
            return Err(DeliveryError::EmptyDocument);
        }

        let mut line = Self::render(document)?;
        line.push('\n');

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(line.as_bytes())
            .await
            .map_err(|e| DeliveryError::WriteFailed(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| DeliveryError::WriteFailed(e.to_string()))?;

        Ok("stdout".to_string())
    }
}
