// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod common;
pub mod driver;
pub mod ingest;

// Re-export key types for convenience
pub use common::{ImuSerial, ImuTimer, Jy901sError, Reading};
pub use driver::{Jy901s, SettleStep, Watchdog, WatchdogEvent};
pub use ingest::{FrameState, FrameStats};
