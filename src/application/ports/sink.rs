//! Delivery port for exported WAV documents

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::WavDocument;

/// Delivery errors
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    #[error("Nothing to deliver: the recording is empty")]
    EmptyDocument,

    #[error("Failed to write recording: {0}")]
    WriteFailed(String),

    #[error("Upload request failed: {0}")]
    RequestFailed(String),

    #[error("Upload rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Port for handing an exported document to storage or the network
#[async_trait]
pub trait WavSink: Send + Sync {
    /// Deliver the document.
    ///
    /// # Returns
    /// A short human-readable receipt (file path, server response, ...)
    async fn deliver(&self, document: &WavDocument) -> Result<String, DeliveryError>;
}

#[async_trait]
impl<T: WavSink + ?Sized> WavSink for Box<T> {
    async fn deliver(&self, document: &WavDocument) -> Result<String, DeliveryError> {
        (**self).deliver(document).await
    }
}
