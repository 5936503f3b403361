//! HTTP upload sink adapter
//!
//! Posts the recording as `multipart/form-data` with a single `file` part,
//! the shape expected by upload endpoints such as `/transcribir-audio`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::application::ports::{DeliveryError, WavSink};
use crate::domain::audio::WavDocument;

/// Form field carrying the audio
const FILE_FIELD: &str = "file";

/// File name sent with the audio part; servers commonly check the `.wav` suffix
const FILE_NAME: &str = "recording.wav";

/// Uploads the document to an HTTP endpoint
pub struct HttpUploadSink {
    url: String,
    session_id: Option<String>,
    client: reqwest::Client,
}

impl HttpUploadSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            session_id: None,
            client: reqwest::Client::new(),
        }
    }

    /// Attach a `session_id` query parameter to every upload
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    fn build_form(document: &WavDocument) -> Result<Form, DeliveryError> {
        let part = Part::bytes(document.bytes().to_vec())
            .file_name(FILE_NAME)
            .mime_str(document.content_type().as_str())
            .map_err(|e| DeliveryError::RequestFailed(format!("Invalid content type: {}", e)))?;
        Ok(Form::new().part(FILE_FIELD, part))
    }
}

#[async_trait]
impl WavSink for HttpUploadSink {
    async fn deliver(&self, document: &WavDocument) -> Result<String, DeliveryError> {
        if document.is_empty() {
            return Err(DeliveryError::EmptyDocument);
        }

        let mut request = self
            .client
            .post(&self.url)
            .multipart(Self::build_form(document)?);
        if let Some(ref session_id) = self.session_id {
            request = request.query(&[("session_id", session_id)]);
        }

        debug!(url = %self.url, bytes = document.len(), "uploading recording");
        let response = request
            .send()
            .await
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
