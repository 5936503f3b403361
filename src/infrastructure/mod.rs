//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the port interfaces: microphone capture
//! through cpal, file/HTTP/stdout delivery and the TOML config store.

pub mod capture;
pub mod config;
pub mod output;

// Re-export adapters
pub use capture::{BlockAssembler, CpalSource};
pub use config::XdgConfigStore;
pub use output::{FileSink, HttpUploadSink, StdoutSink};
