//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_source;
pub mod config;
pub mod sink;

// Re-export common types
pub use audio_source::{AudioSource, BlockCallback, SourceError};
pub use config::ConfigStore;
pub use sink::{DeliveryError, WavSink};
