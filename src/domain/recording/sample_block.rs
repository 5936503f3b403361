//! Sample block value object

use std::ops::Deref;

/// One block of mono `f32` samples as delivered by an audio source.
///
/// Samples are nominally in `[-1.0, 1.0]` but are stored as received;
/// clamping happens only when the block is encoded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBlock {
    samples: Box<[f32]>,
}

impl SampleBlock {
    /// Create a block that takes ownership of the given samples
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples: samples.into_boxed_slice(),
        }
    }

    /// Create a block by copying a borrowed slice
    pub fn from_slice(samples: &[f32]) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    /// Create a block of `len` zero-valued samples
    pub fn silence(len: usize) -> Self {
        Self::new(vec![0.0; len])
    }

    /// Get the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples in the block
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the block holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Vec<f32>> for SampleBlock {
    fn from(samples: Vec<f32>) -> Self {
        Self::new(samples)
    }
}

impl Deref for SampleBlock {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_order() {
        let block = SampleBlock::new(vec![0.1, -0.2, 0.3]);
        assert_eq!(block.samples(), &[0.1, -0.2, 0.3]);
        assert_eq!(block.len(), 3);
    }

    #[test]
    fn out_of_range_values_are_kept() {
        let block = SampleBlock::from_slice(&[1.5, -2.0]);
        assert_eq!(block.samples(), &[1.5, -2.0]);
    }

    #[test]
    fn silence_is_all_zero() {
        let block = SampleBlock::silence(16);
        assert_eq!(block.len(), 16);
        assert!(block.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn default_is_empty() {
        assert!(SampleBlock::default().is_empty());
    }
}
