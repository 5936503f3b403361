//! wav-recorder - microphone capture to 16-bit mono PCM WAV
//!
//! This crate records mono audio from the default input device into an
//! in-memory block store and exports it as a canonical 44-byte-header WAV
//! document, which can be written to a file, uploaded or printed.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Sample blocks, the block store, the WAV encoder, config and errors
//! - **Application**: The recorder facade, the capture use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal capture, file/HTTP/stdout sinks, TOML config)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
