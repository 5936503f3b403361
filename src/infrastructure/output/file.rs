//! File sink adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{DeliveryError, WavSink};
use crate::domain::audio::WavDocument;

/// Writes the document to a path, creating parent directories as needed
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl WavSink for FileSink {
    async fn deliver(&self, document: &WavDocument) -> Result<String, DeliveryError> {
        if document.is_empty() {
            return Err(DeliveryError::EmptyDocument);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DeliveryError::WriteFailed(e.to_string()))?;
        }

        fs::write(&self.path, document.bytes())
            .await
            .map_err(|e| DeliveryError::WriteFailed(format!("{}: {}", self.path.display(), e)))?;

        Ok(self.path.display().to_string())
    }
}
