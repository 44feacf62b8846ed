// src/ingest/mod.rs

//! Receive path: bytes to frames to decoded readings.

pub mod assembler;
pub mod decoder;

#[cfg(feature = "use_heapless")]
pub mod queue;

pub use assembler::{FrameAssembler, FrameState, FrameStats};
pub use decoder::decode;

#[cfg(feature = "use_heapless")]
pub use queue::{push_all, RxQueue};
