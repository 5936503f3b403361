//! Audio source port

use thiserror::Error;

use crate::domain::recording::SampleBlock;

/// Audio source errors
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("No audio input device available")]
    NoInputDevice,

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Audio stream failed: {0}")]
    StreamFailed(String),
}

/// Receives each captured block, in order, from the source's delivery thread.
/// Deliveries never overlap.
pub type BlockCallback = Box<dyn FnMut(SampleBlock) + Send>;

/// Port for a live mono audio source delivering fixed-size blocks
pub trait AudioSource: Send {
    /// Sample rate of the delivered blocks, in Hz
    fn sample_rate(&self) -> u32;

    /// Samples per delivered block (the last block may be shorter)
    fn buffer_len(&self) -> usize;

    /// Begin delivering blocks to `on_block`.
    fn start(&mut self, on_block: BlockCallback) -> Result<(), SourceError>;

    /// Stop delivering. Any partially filled block is delivered before this returns.
    fn stop(&mut self) -> Result<(), SourceError>;
}
