// src/driver/mod.rs

use crate::common::{
    error::Jy901sError,
    hal_traits::{ImuSerial, ImuTimer},
    reading::Reading,
    timing,
};
use crate::ingest::{
    assembler::{FrameAssembler, FrameState, FrameStats},
    decoder,
};
use log::{debug, info};

mod baud_scan;
mod config;
mod io_helpers;
mod watchdog;

#[cfg(test)]
pub(crate) mod mock;

pub use config::SettleStep;
pub use watchdog::{Watchdog, WatchdogEvent};

/// A JY901S attached to one serial channel.
///
/// The driver exclusively owns its interface. Ingestion (`feed`), configuration
/// commands and `watchdog_check` all take `&mut self`; hosts that receive bytes
/// in an interrupt should hand them over through a queue rather than calling
/// `feed` from two contexts.
#[derive(Debug)]
pub struct Jy901s<IF>
where
    IF: ImuSerial + ImuTimer,
{
    interface: IF,
    timeout_ms: u32,
    reading: Reading,
    assembler: FrameAssembler,
    enabled: bool,
    watchdog: Watchdog,
}

impl<IF> Jy901s<IF>
where
    IF: ImuSerial + ImuTimer,
{
    /// Creates an enabled driver. A `timeout_ms` of zero selects the default.
    ///
    /// The watchdog starts disabled; see [`Jy901s::watchdog_init`].
    pub fn new(interface: IF, timeout_ms: u32) -> Self {
        let timeout_ms = if timeout_ms == 0 {
            timing::DEFAULT_RESPONSE_TIMEOUT_MS
        } else {
            timeout_ms
        };
        let now = interface.now_ms();
        info!("jy901s: driver created (response timeout {} ms)", timeout_ms);
        Jy901s {
            interface,
            timeout_ms,
            reading: Reading::default(),
            assembler: FrameAssembler::new(),
            enabled: true,
            watchdog: Watchdog::new(now),
        }
    }

    /// Enables or disables ingestion and accessors.
    ///
    /// Disabling zeroes the reading and drops any partial frame. Watchdog
    /// configuration is left as it is; enabling restarts its silence window.
    pub fn enable(&mut self, enable: bool) {
        self.enabled = enable;
        if enable {
            let now = self.interface.now_ms();
            self.watchdog.feed(now);
        } else {
            self.reading.clear();
            self.assembler.reset();
        }
        debug!("jy901s: {}", if enable { "enabled" } else { "disabled" });
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current frame buffer state.
    #[inline]
    pub fn state(&self) -> FrameState {
        self.assembler.state()
    }

    /// Frame and checksum-error counters since creation.
    #[inline]
    pub fn frame_stats(&self) -> FrameStats {
        self.assembler.stats()
    }

    #[inline]
    pub fn response_timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    /// Consumes the driver and returns the interface.
    pub fn release(self) -> IF {
        self.interface
    }

    // --- Ingestion ---

    /// Processes newly received bytes.
    ///
    /// Call this from the context that owns byte delivery. Checksum failures
    /// are absorbed here and never reported; the assembler resynchronises on
    /// the next header.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), Jy901sError<IF::Error>> {
        if bytes.is_empty() {
            return Err(Jy901sError::EmptyInput);
        }
        if !self.enabled {
            return Err(Jy901sError::Disabled);
        }
        for &byte in bytes {
            self.ingest_byte(byte);
        }
        Ok(())
    }

    pub(crate) fn ingest_byte(&mut self, byte: u8) {
        if let Some(frame) = self.assembler.push(byte) {
            let now = self.interface.now_ms();
            self.watchdog.feed(now);
            decoder::decode(&frame, &mut self.reading, now);
        }
    }

    // --- Accessors ---

    /// The whole snapshot, if at least one packet was decoded since the last reset.
    pub fn reading(&self) -> Option<&Reading> {
        if self.enabled && self.reading.valid {
            Some(&self.reading)
        } else {
            None
        }
    }

    fn field<T>(&self, f: impl FnOnce(&Reading) -> T) -> Option<T> {
        self.reading().map(f)
    }

    pub fn gyro_x(&self) -> Option<f32> {
        self.field(|r| r.gyro_x)
    }

    pub fn gyro_y(&self) -> Option<f32> {
        self.field(|r| r.gyro_y)
    }

    pub fn gyro_z(&self) -> Option<f32> {
        self.field(|r| r.gyro_z)
    }

    pub fn roll(&self) -> Option<f32> {
        self.field(|r| r.roll)
    }

    pub fn pitch(&self) -> Option<f32> {
        self.field(|r| r.pitch)
    }

    pub fn yaw(&self) -> Option<f32> {
        self.field(|r| r.yaw)
    }

    pub fn acc_x(&self) -> Option<f32> {
        self.field(|r| r.acc_x)
    }

    pub fn acc_y(&self) -> Option<f32> {
        self.field(|r| r.acc_y)
    }

    pub fn acc_z(&self) -> Option<f32> {
        self.field(|r| r.acc_z)
    }

    pub fn mag_x(&self) -> Option<f32> {
        self.field(|r| r.mag_x)
    }

    pub fn mag_y(&self) -> Option<f32> {
        self.field(|r| r.mag_y)
    }

    pub fn mag_z(&self) -> Option<f32> {
        self.field(|r| r.mag_z)
    }

    pub fn temperature(&self) -> Option<f32> {
        self.field(|r| r.temperature)
    }

    pub fn version(&self) -> Option<u16> {
        self.field(|r| r.version)
    }

    /// Tick (ms) of the last successful decode.
    pub fn timestamp(&self) -> Option<u32> {
        self.field(|r| r.timestamp)
    }

    fn ensure_enabled(&self) -> Result<(), Jy901sError<IF::Error>> {
        if self.enabled {
            Ok(())
        } else {
            Err(Jy901sError::Disabled)
        }
    }
}
