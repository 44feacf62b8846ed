// src/ingest/decoder.rs

use crate::common::{
    frame::{Frame, PacketType},
    reading::Reading,
};

// Full-scale ranges from the module's protocol documentation.
const RAW_FULL_SCALE: f32 = 32768.0;
const GYRO_RANGE_DPS: f32 = 2000.0;
const ANGLE_RANGE_DEG: f32 = 180.0;
const ACC_RANGE_G: f32 = 16.0;
const TEMP_SCALE: f32 = 340.0;
const TEMP_OFFSET_C: f32 = 36.25;

#[inline]
fn gyro_dps(raw: i16) -> f32 {
    raw as f32 / RAW_FULL_SCALE * GYRO_RANGE_DPS
}

#[inline]
fn angle_deg(raw: i16) -> f32 {
    raw as f32 / RAW_FULL_SCALE * ANGLE_RANGE_DEG
}

#[inline]
fn acc_g(raw: i16) -> f32 {
    raw as f32 / RAW_FULL_SCALE * ACC_RANGE_G
}

#[inline]
fn temperature_c(raw: i16) -> f32 {
    raw as f32 / TEMP_SCALE + TEMP_OFFSET_C
}

/// Writes the physically scaled contents of a checksum-valid frame into `reading`.
///
/// Returns the packet type that was decoded, or `None` for tags this driver
/// does not decode. Unknown frames leave `reading` untouched. A successful
/// decode stamps `now` and marks the reading valid; fields owned by other
/// packet types keep their previous values.
pub fn decode(frame: &Frame, reading: &mut Reading, now: u32) -> Option<PacketType> {
    let packet_type = frame.packet_type()?;
    match packet_type {
        PacketType::Gyroscope => {
            reading.gyro_x = gyro_dps(frame.i16_at(0));
            reading.gyro_y = gyro_dps(frame.i16_at(2));
            reading.gyro_z = gyro_dps(frame.i16_at(4));
        }
        PacketType::Angle => {
            reading.roll = angle_deg(frame.i16_at(0));
            reading.pitch = angle_deg(frame.i16_at(2));
            reading.yaw = angle_deg(frame.i16_at(4));
            reading.version = frame.u16_at(6);
        }
        PacketType::Acceleration => {
            reading.acc_x = acc_g(frame.i16_at(0));
            reading.acc_y = acc_g(frame.i16_at(2));
            reading.acc_z = acc_g(frame.i16_at(4));
            reading.temperature = temperature_c(frame.i16_at(6));
        }
        PacketType::MagneticField => {
            reading.mag_x = frame.i16_at(0) as f32;
            reading.mag_y = frame.i16_at(2) as f32;
            reading.mag_z = frame.i16_at(4) as f32;
            reading.temperature = temperature_c(frame.i16_at(6));
        }
        _ => return None,
    }

    reading.timestamp = now;
    reading.valid = true;
    Some(packet_type)
}
