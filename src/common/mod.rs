// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod reading;
pub mod register;
pub mod timing;
pub mod types;

// --- Re-export key types/traits for easier access ---

pub use command::{Command, CommandBuffer};
pub use error::Jy901sError;
pub use frame::{Frame, PacketType};
pub use hal_traits::{ImuSerial, ImuTimer, Split};
pub use reading::Reading;
pub use register::Register;
pub use types::{Bandwidth, BaudCode, CalibrationMode, ContentMask, ManualCalibration, OutputRate};

// Native HAL integration (from hal_traits.rs)
#[cfg(feature = "impl-hal")]
pub use hal_traits::HalTimer;
