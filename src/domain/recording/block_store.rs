//! Ordered, append-only store of captured sample blocks

use super::SampleBlock;

/// Accumulates sample blocks in arrival order.
///
/// Blocks are never reordered or merged. The running sample total is kept
/// in step with the stored blocks so `total_samples` is O(1).
#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    blocks: Vec<SampleBlock>,
    total_samples: usize,
}

impl BlockStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block at the end. Zero-length blocks are retained.
    pub fn append(&mut self, block: SampleBlock) {
        self.total_samples += block.len();
        self.blocks.push(block);
    }

    /// Drop every stored block
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.total_samples = 0;
    }

    /// Sum of the lengths of all stored blocks
    pub fn total_samples(&self) -> usize {
        self.total_samples
    }

    /// Number of stored blocks, including empty ones
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Read-only view over the stored blocks, in insertion order
    pub fn view(&self) -> &[SampleBlock] {
        &self.blocks
    }

    /// Whether the store holds no blocks at all
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
