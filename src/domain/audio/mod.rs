//! Audio encoding domain module

mod content_type;
mod wav_document;
pub mod wav_encoder;

pub use content_type::{ContentType, DEFAULT_CONTENT_TYPE};
pub use wav_document::WavDocument;
