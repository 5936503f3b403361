//! Recording domain module

mod block_store;
mod duration;
mod sample_block;
mod state;

pub use block_store::BlockStore;
pub use duration::{Duration, DEFAULT_DURATION_SECS};
pub use sample_block::SampleBlock;
pub use state::RecordingState;
