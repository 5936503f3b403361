//! Recorder facade
//!
//! `Recorder` owns the block store and the recording flag. `SharedRecorder`
//! wraps it in a mutex so an audio callback thread and the controlling task
//! can both reach it; every store access goes through that one lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::domain::audio::{wav_encoder, ContentType, WavDocument};
use crate::domain::recording::{BlockStore, RecordingState, SampleBlock};

use super::ports::BlockCallback;

/// Buffers blocks while recording and exports them as WAV on demand
#[derive(Debug, Clone)]
pub struct Recorder {
    store: BlockStore,
    state: RecordingState,
    sample_rate: u32,
}

impl Recorder {
    /// Create an idle recorder with an empty store for audio at `sample_rate`
    pub fn new(sample_rate: u32) -> Self {
        Self {
            store: BlockStore::new(),
            state: RecordingState::Idle,
            sample_rate,
        }
    }

    /// Start accepting blocks. Idempotent.
    pub fn record(&mut self) {
        self.state = RecordingState::Recording;
    }

    /// Stop accepting blocks. Idempotent; buffered audio is kept.
    pub fn stop(&mut self) {
        self.state = RecordingState::Idle;
    }

    /// Discard all buffered audio, whatever the state
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Hand a block from the audio source to the recorder.
    ///
    /// Returns whether the block was stored; blocks arriving while idle are dropped.
    pub fn push_block(&mut self, block: SampleBlock) -> bool {
        if !self.state.accepts_blocks() {
            trace!(len = block.len(), "dropping block while idle");
            return false;
        }
        self.store.append(block);
        true
    }

    /// Encode everything buffered so far.
    ///
    /// Uses `audio/wav` when `content_type` is `None`. With no buffered samples
    /// the document is empty. The store is left untouched.
    pub fn export(&self, content_type: Option<&str>) -> WavDocument {
        let content_type = ContentType::or_default(content_type);
        let bytes = if self.store.total_samples() == 0 {
            Vec::new()
        } else {
            wav_encoder::encode(self.store.view(), self.sample_rate)
        };
        debug!(
            samples = self.store.total_samples(),
            blocks = self.store.block_count(),
            bytes = bytes.len(),
            %content_type,
            "exported recording"
        );
        WavDocument::new(bytes, content_type)
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn total_samples(&self) -> usize {
        self.store.total_samples()
    }

    /// Read-only view of the buffered blocks
    pub fn blocks(&self) -> &[SampleBlock] {
        self.store.view()
    }
}

/// Thread-safe handle to a single `Recorder`
#[derive(Debug, Clone)]
pub struct SharedRecorder {
    inner: Arc<Mutex<Recorder>>,
}

impl SharedRecorder {
    pub fn new(sample_rate: u32) -> Self {
        Self::from_recorder(Recorder::new(sample_rate))
    }

    pub fn from_recorder(recorder: Recorder) -> Self {
        Self {
            inner: Arc::new(Mutex::new(recorder)),
        }
    }

    /// Lock the recorder. A panic on another holder does not leave the
    /// store half-written, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Recorder> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self) {
        self.lock().record();
    }

    pub fn stop(&self) {
        self.lock().stop();
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn push_block(&self, block: SampleBlock) -> bool {
        self.lock().push_block(block)
    }

    pub fn export(&self, content_type: Option<&str>) -> WavDocument {
        self.lock().export(content_type)
    }

    pub fn state(&self) -> RecordingState {
        self.lock().state()
    }

    pub fn sample_rate(&self) -> u32 {
        self.lock().sample_rate()
    }

    pub fn total_samples(&self) -> usize {
        self.lock().total_samples()
    }

    /// Callback for an audio source that feeds blocks into this recorder
    pub fn block_callback(&self) -> BlockCallback {
        let recorder = self.clone();
        Box::new(move |block| {
            recorder.push_block(block);
        })
    }
}
