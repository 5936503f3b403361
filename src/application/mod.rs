//! Application layer - Recorder facade, use cases and port interfaces

pub mod capture;
pub mod ports;
pub mod recorder;

// Re-export use cases
pub use capture::{
    CaptureCallbacks, CaptureError, CaptureInput, CaptureOutput, CaptureRecordingUseCase,
    ProgressCallback,
};
pub use recorder::{Recorder, SharedRecorder};
