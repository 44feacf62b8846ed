// src/common/reading.rs

/// Latest decoded measurements.
///
/// Each packet type owns a group of fields and overwrites only that group, so
/// while `valid` is true the angle fields may be older than the acceleration
/// fields (or the other way round). Temperature is shared by the acceleration
/// and magnetic field packets.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Reading {
    /// Angular rate, °/s.
    pub gyro_x: f32,
    pub gyro_y: f32,
    pub gyro_z: f32,
    /// Orientation, degrees in -180..180.
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    /// Acceleration, g.
    pub acc_x: f32,
    pub acc_y: f32,
    pub acc_z: f32,
    /// Magnetic field, raw count (mGauss).
    pub mag_x: f32,
    pub mag_y: f32,
    pub mag_z: f32,
    /// Die temperature, °C.
    pub temperature: f32,
    /// Version word carried by the angle packet.
    pub version: u16,
    /// Tick (ms) of the last successful decode.
    pub timestamp: u32,
    /// Set by every successful decode, cleared by disable and link recovery.
    pub valid: bool,
}

impl Reading {
    /// Zeroes every field, including the validity flag.
    pub fn clear(&mut self) {
        *self = Reading::default();
    }
}
