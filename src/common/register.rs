// src/common/register.rs

/// Register addresses of the module's configuration map.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Register {
    /// Persist current configuration.
    Save = 0x00,
    /// Calibration mode.
    CalSw = 0x01,
    /// Output content bitmask.
    Rsw = 0x02,
    /// Output rate.
    RRate = 0x03,
    /// Serial baud rate.
    Baud = 0x04,
    /// Accelerometer X zero offset, `AXOFFSET / 10000` g.
    AxOffset = 0x05,
    AyOffset = 0x06,
    AzOffset = 0x07,
    /// Gyroscope X zero offset, `GXOFFSET / 10000` °/s.
    GxOffset = 0x08,
    GyOffset = 0x09,
    GzOffset = 0x0A,
    /// Magnetometer X zero offset.
    HxOffset = 0x0B,
    HyOffset = 0x0C,
    HzOffset = 0x0D,
    /// Magnetometer calibration ranges.
    MagRangeX = 0x1C,
    MagRangeY = 0x1D,
    MagRangeZ = 0x1E,
    /// Digital filter bandwidth.
    Bandwidth = 0x1F,
    GyroRange = 0x20,
    AccRange = 0x21,
    Sleep = 0x22,
    /// Installation orientation.
    Orient = 0x23,
    /// 6-axis / 9-axis algorithm selection.
    Axis6 = 0x24,
    /// K-value filter.
    FiltK = 0x25,
    /// Register-read request selector.
    ReadAddr = 0x27,
    /// Raw acceleration X, used as the baud-scan probe.
    Ax = 0x34,
    Roll = 0x3D,
    Pitch = 0x3E,
    Yaw = 0x3F,
    /// Zero the yaw angle.
    CaliYaw = 0x76,
    /// Manual calibration enter/exit.
    ManualCali = 0xA6,
    /// Automatic calibration switch.
    NoAutoCali = 0xA7,
}

impl Register {
    #[inline]
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}
