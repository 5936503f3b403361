//! Delivery adapters for exported recordings

mod file;
mod http;
mod stdout;

pub use file::FileSink;
pub use http::HttpUploadSink;
pub use stdout::StdoutSink;
