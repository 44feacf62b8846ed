// src/common/types.rs

use super::error::Jy901sError;
use core::convert::TryFrom;

// --- Baud rate (BAUD register, 0x04) ---

/// Serial baud rates the module can be switched to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum BaudCode {
    B4800 = 1,
    B9600 = 2,
    B19200 = 3,
    B38400 = 4,
    B57600 = 5,
    B115200 = 6,
    B230400 = 7,
}

impl BaudCode {
    /// Tries to convert a register code into a BaudCode.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(BaudCode::B4800),
            2 => Some(BaudCode::B9600),
            3 => Some(BaudCode::B19200),
            4 => Some(BaudCode::B38400),
            5 => Some(BaudCode::B57600),
            6 => Some(BaudCode::B115200),
            7 => Some(BaudCode::B230400),
            _ => None,
        }
    }

    /// Register code written to BAUD.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Line rate in bit/s.
    pub fn bps(self) -> u32 {
        match self {
            BaudCode::B4800 => 4800,
            BaudCode::B9600 => 9600,
            BaudCode::B19200 => 19_200,
            BaudCode::B38400 => 38_400,
            BaudCode::B57600 => 57_600,
            BaudCode::B115200 => 115_200,
            BaudCode::B230400 => 230_400,
        }
    }
}

impl TryFrom<u8> for BaudCode {
    type Error = Jy901sError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(Jy901sError::InvalidBaudCode(value))
    }
}

/// Rates probed by the automatic baud scan, slowest first.
pub const SCAN_BAUD_RATES: [u32; 9] = [
    4800, 9600, 19_200, 38_400, 57_600, 115_200, 230_400, 460_800, 921_600,
];

// --- Output rate (RRATE register, 0x03) ---

/// Data stream output rates. Code 10 is reserved by the module.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum OutputRate {
    Hz0_2 = 1,
    Hz0_5 = 2,
    Hz1 = 3,
    Hz2 = 4,
    Hz5 = 5,
    Hz10 = 6,
    Hz20 = 7,
    Hz50 = 8,
    Hz100 = 9,
    Hz200 = 11,
    Hz500 = 12,
    Hz1000 = 13,
}

impl OutputRate {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(OutputRate::Hz0_2),
            2 => Some(OutputRate::Hz0_5),
            3 => Some(OutputRate::Hz1),
            4 => Some(OutputRate::Hz2),
            5 => Some(OutputRate::Hz5),
            6 => Some(OutputRate::Hz10),
            7 => Some(OutputRate::Hz20),
            8 => Some(OutputRate::Hz50),
            9 => Some(OutputRate::Hz100),
            11 => Some(OutputRate::Hz200),
            12 => Some(OutputRate::Hz500),
            13 => Some(OutputRate::Hz1000),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Nominal output frequency in Hz.
    pub fn hz(self) -> f32 {
        match self {
            OutputRate::Hz0_2 => 0.2,
            OutputRate::Hz0_5 => 0.5,
            OutputRate::Hz1 => 1.0,
            OutputRate::Hz2 => 2.0,
            OutputRate::Hz5 => 5.0,
            OutputRate::Hz10 => 10.0,
            OutputRate::Hz20 => 20.0,
            OutputRate::Hz50 => 50.0,
            OutputRate::Hz100 => 100.0,
            OutputRate::Hz200 => 200.0,
            OutputRate::Hz500 => 500.0,
            OutputRate::Hz1000 => 1000.0,
        }
    }
}

impl TryFrom<u8> for OutputRate {
    type Error = Jy901sError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(Jy901sError::InvalidOutputRate(value))
    }
}

// --- Output content (RSW register, 0x02) ---

/// Bitmask selecting which packet types the module streams.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ContentMask(u8);

impl ContentMask {
    pub const TIME: ContentMask = ContentMask(0x01);
    pub const ACC: ContentMask = ContentMask(0x02);
    pub const GYRO: ContentMask = ContentMask(0x04);
    pub const ANGLE: ContentMask = ContentMask(0x08);
    pub const MAG: ContentMask = ContentMask(0x10);
    pub const PORT: ContentMask = ContentMask(0x20);
    pub const PRESS: ContentMask = ContentMask(0x40);
    pub const GPS: ContentMask = ContentMask(0x80);

    /// Validates a raw RSW value: non-zero and at most 8 bits wide.
    pub fn new(bits: u16) -> Result<Self, Jy901sError<()>> {
        if bits == 0 || bits > 0xFF {
            return Err(Jy901sError::InvalidContentMask(bits));
        }
        Ok(ContentMask(bits as u8))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: ContentMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for ContentMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        ContentMask(self.0 | rhs.0)
    }
}

impl From<ContentMask> for u16 {
    fn from(mask: ContentMask) -> u16 {
        mask.0 as u16
    }
}

// --- Digital filter bandwidth (BANDWIDTH register, 0x1F) ---

/// Lower bandwidth is quieter but slower to respond.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Bandwidth {
    Hz256 = 0,
    Hz184 = 1,
    Hz94 = 2,
    Hz44 = 3,
    Hz21 = 4,
    Hz10 = 5,
    Hz5 = 6,
}

impl Bandwidth {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Bandwidth::Hz256),
            1 => Some(Bandwidth::Hz184),
            2 => Some(Bandwidth::Hz94),
            3 => Some(Bandwidth::Hz44),
            4 => Some(Bandwidth::Hz21),
            5 => Some(Bandwidth::Hz10),
            6 => Some(Bandwidth::Hz5),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn hz(self) -> u16 {
        match self {
            Bandwidth::Hz256 => 256,
            Bandwidth::Hz184 => 184,
            Bandwidth::Hz94 => 94,
            Bandwidth::Hz44 => 44,
            Bandwidth::Hz21 => 21,
            Bandwidth::Hz10 => 10,
            Bandwidth::Hz5 => 5,
        }
    }
}

impl TryFrom<u8> for Bandwidth {
    type Error = Jy901sError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(Jy901sError::InvalidBandwidth(value))
    }
}

// --- Calibration (CALSW 0x01, MANUALCALI 0xA6) ---

/// Values written to the CALSW register.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u16)]
pub enum CalibrationMode {
    Normal = 0x0000,
    AccGyro = 0x0001,
    Magnetometer = 0x0007,
}

/// Values written to the MANUALCALI register.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u16)]
pub enum ManualCalibration {
    Enter = 0x0001,
    Exit = 0x0004,
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baud_code_range() {
        assert_eq!(BaudCode::from_u8(0), None);
        assert_eq!(BaudCode::from_u8(1), Some(BaudCode::B4800));
        assert_eq!(BaudCode::from_u8(7), Some(BaudCode::B230400));
        assert_eq!(BaudCode::from_u8(8), None);
        assert!(matches!(BaudCode::try_from(9), Err(Jy901sError::InvalidBaudCode(9))));
        assert_eq!(BaudCode::B115200.bps(), 115_200);
        assert_eq!(BaudCode::B115200.code(), 6);
    }

    #[test]
    fn test_output_rate_skips_reserved_code() {
        assert_eq!(OutputRate::from_u8(9), Some(OutputRate::Hz100));
        assert_eq!(OutputRate::from_u8(10), None);
        assert_eq!(OutputRate::from_u8(11), Some(OutputRate::Hz200));
        assert_eq!(OutputRate::from_u8(0), None);
        assert_eq!(OutputRate::from_u8(14), None);
        assert!(matches!(OutputRate::try_from(10), Err(Jy901sError::InvalidOutputRate(10))));
        assert_eq!(OutputRate::Hz1000.hz(), 1000.0);
    }

    #[test]
    fn test_content_mask_validation() {
        assert!(matches!(ContentMask::new(0), Err(Jy901sError::InvalidContentMask(0))));
        assert!(matches!(ContentMask::new(0x100), Err(Jy901sError::InvalidContentMask(0x100))));
        assert_eq!(ContentMask::new(0xFF).unwrap().bits(), 0xFF);

        let mask = ContentMask::ACC | ContentMask::GYRO | ContentMask::ANGLE;
        assert_eq!(mask.bits(), 0x0E);
        assert!(mask.contains(ContentMask::GYRO));
        assert!(!mask.contains(ContentMask::MAG));
        assert_eq!(u16::from(mask), 0x000E);
    }

    #[test]
    fn test_bandwidth_range() {
        assert_eq!(Bandwidth::from_u8(0), Some(Bandwidth::Hz256));
        assert_eq!(Bandwidth::from_u8(6), Some(Bandwidth::Hz5));
        assert_eq!(Bandwidth::from_u8(7), None);
        assert_eq!(Bandwidth::Hz184.hz(), 184);
    }

    #[test]
    fn test_calibration_register_values() {
        assert_eq!(CalibrationMode::Normal as u16, 0x0000);
        assert_eq!(CalibrationMode::AccGyro as u16, 0x0001);
        assert_eq!(CalibrationMode::Magnetometer as u16, 0x0007);
        assert_eq!(ManualCalibration::Enter as u16, 0x0001);
        assert_eq!(ManualCalibration::Exit as u16, 0x0004);
    }

    #[test]
    fn test_scan_list_is_ascending() {
        assert!(SCAN_BAUD_RATES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(SCAN_BAUD_RATES[0], 4800);
        assert_eq!(SCAN_BAUD_RATES[8], 921_600);
    }
}
