//! Domain layer - Core capture and encoding logic
//!
//! Contains the block store, recording state, WAV encoder and value objects.
//! This layer has no dependencies on audio devices, files or the network.

pub mod audio;
pub mod config;
pub mod error;
pub mod recording;

// Re-export common types
pub use audio::{ContentType, WavDocument};
pub use config::AppConfig;
pub use error::*;
pub use recording::{BlockStore, Duration, RecordingState, SampleBlock};
