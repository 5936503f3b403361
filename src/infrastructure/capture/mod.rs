//! Capture infrastructure module
//!
//! Microphone input through cpal, regrouped into fixed-size mono blocks.

mod block_assembler;
mod cpal_source;

pub use block_assembler::BlockAssembler;
pub use cpal_source::CpalSource;
