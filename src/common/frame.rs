// src/common/frame.rs

/// Bytes in one wire frame: header, type tag, 8 payload bytes, checksum.
pub const FRAME_LEN: usize = 11;
/// Every frame starts with this byte.
pub const FRAME_HEADER: u8 = 0x55;
/// Payload bytes between the type tag and the checksum.
pub const PAYLOAD_LEN: usize = 8;

/// Packet type tags documented for the module's output stream.
///
/// Only acceleration, gyroscope, angle and magnetic field are decoded.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum PacketType {
    Time = 0x50,
    Acceleration = 0x51,
    Gyroscope = 0x52,
    Angle = 0x53,
    MagneticField = 0x54,
    PortState = 0x55,
    Pressure = 0x56,
    LonLat = 0x57,
    GroundSpeed = 0x58,
    Quaternion = 0x59,
    GpsAccuracy = 0x5A,
    RegisterRead = 0x5F,
}

impl PacketType {
    /// Tries to convert a type tag into a PacketType.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x50 => Some(PacketType::Time),
            0x51 => Some(PacketType::Acceleration),
            0x52 => Some(PacketType::Gyroscope),
            0x53 => Some(PacketType::Angle),
            0x54 => Some(PacketType::MagneticField),
            0x55 => Some(PacketType::PortState),
            0x56 => Some(PacketType::Pressure),
            0x57 => Some(PacketType::LonLat),
            0x58 => Some(PacketType::GroundSpeed),
            0x59 => Some(PacketType::Quaternion),
            0x5A => Some(PacketType::GpsAccuracy),
            0x5F => Some(PacketType::RegisterRead),
            _ => None,
        }
    }
}

/// Sum of `data` truncated to 8 bits.
#[inline]
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// One checksum-valid frame as handed from the assembler to the decoder.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Wraps raw bytes if the header and checksum are correct.
    pub fn new(bytes: [u8; FRAME_LEN]) -> Option<Self> {
        if bytes[0] == FRAME_HEADER && checksum(&bytes[..FRAME_LEN - 1]) == bytes[FRAME_LEN - 1] {
            Some(Frame(bytes))
        } else {
            None
        }
    }

    /// Builds a frame around a payload, filling in header and checksum.
    pub fn encode(tag: u8, payload: [u8; PAYLOAD_LEN]) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = FRAME_HEADER;
        bytes[1] = tag;
        bytes[2..FRAME_LEN - 1].copy_from_slice(&payload);
        bytes[FRAME_LEN - 1] = checksum(&bytes[..FRAME_LEN - 1]);
        Frame(bytes)
    }

    #[inline]
    pub fn tag(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_u8(self.tag())
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.0[2..FRAME_LEN - 1]
    }

    /// Little-endian signed word at `offset` within the payload.
    #[inline]
    pub fn i16_at(&self, offset: usize) -> i16 {
        let p = self.payload();
        i16::from_le_bytes([p[offset], p[offset + 1]])
    }

    /// Little-endian unsigned word at `offset` within the payload.
    #[inline]
    pub fn u16_at(&self, offset: usize) -> u16 {
        let p = self.payload();
        u16::from_le_bytes([p[offset], p[offset + 1]])
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }
}
