//! Splits device callback buffers into fixed-size mono blocks
//!
//! Device callbacks hand over interleaved frames of whatever size the host
//! picks. Only channel 0 of each frame is kept; samples are regrouped into
//! blocks of exactly `buffer_len` before they reach the recorder.

use crate::application::ports::BlockCallback;
use crate::domain::recording::SampleBlock;

pub struct BlockAssembler {
    buffer_len: usize,
    pending: Vec<f32>,
    on_block: BlockCallback,
}

impl BlockAssembler {
    /// `buffer_len` of 0 is treated as 1.
    pub fn new(buffer_len: usize, on_block: BlockCallback) -> Self {
        let buffer_len = buffer_len.max(1);
        Self {
            buffer_len,
            pending: Vec::with_capacity(buffer_len),
            on_block,
        }
    }

    /// Take channel 0 of every frame in `data`, emitting each block as it fills
    pub fn push_interleaved<T, F>(&mut self, data: &[T], channels: usize, convert: F)
    where
        T: Copy,
        F: Fn(T) -> f32,
    {
        for frame in data.chunks(channels.max(1)) {
            self.pending.push(convert(frame[0]));
            if self.pending.len() == self.buffer_len {
                self.emit();
            }
        }
    }

    /// Emit the partially filled block, if any
    pub fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.emit();
        }
    }

    /// Samples waiting for the current block to fill
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn emit(&mut self) {
        let samples = std::mem::replace(&mut self.pending, Vec::with_capacity(self.buffer_len));
        (self.on_block)(SampleBlock::new(samples));
    }
}
