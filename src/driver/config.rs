// src/driver/config.rs

use super::Jy901s;
use crate::common::{
    command::Command,
    error::Jy901sError,
    hal_traits::{ImuSerial, ImuTimer},
    register::Register,
    timing,
    types::{Bandwidth, BaudCode, CalibrationMode, ContentMask, ManualCalibration, OutputRate},
};
use core::time::Duration;
use log::info;

/// Named waits inside a configuration sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SettleStep {
    Unlock,
    /// Additional wait after unlock for RSW, BANDWIDTH and CALSW.
    UnlockExtra,
    Write,
    Save,
    Apply,
    /// Calibration start, manual calibration and yaw zeroing.
    ApplyLong,
}

impl SettleStep {
    pub fn duration(self) -> Duration {
        match self {
            SettleStep::Unlock => timing::UNLOCK_SETTLE,
            SettleStep::UnlockExtra => timing::UNLOCK_EXTRA_SETTLE,
            SettleStep::Write => timing::WRITE_SETTLE,
            SettleStep::Save => timing::SAVE_SETTLE,
            SettleStep::Apply => timing::APPLY_SETTLE,
            SettleStep::ApplyLong => timing::APPLY_SETTLE_LONG,
        }
    }
}

/// One unlock / write / save sequence.
#[derive(Debug, Copy, Clone)]
struct RegisterWrite {
    register: Register,
    value: u16,
    extra_unlock_settle: bool,
    apply: SettleStep,
}

impl RegisterWrite {
    fn new(register: Register, value: u16) -> Self {
        RegisterWrite {
            register,
            value,
            extra_unlock_settle: false,
            apply: SettleStep::Apply,
        }
    }

    fn with_extra_unlock_settle(mut self) -> Self {
        self.extra_unlock_settle = true;
        self
    }

    fn long_apply(mut self) -> Self {
        self.apply = SettleStep::ApplyLong;
        self
    }
}

impl<IF> Jy901s<IF>
where
    IF: ImuSerial + ImuTimer,
{
    fn run_register_write(&mut self, write: RegisterWrite) -> Result<(), Jy901sError<IF::Error>> {
        self.send_command(&Command::Unlock)?;
        self.settle(SettleStep::Unlock);
        if write.extra_unlock_settle {
            self.settle(SettleStep::UnlockExtra);
        }

        self.send_command(&Command::write(write.register, write.value))?;
        self.settle(SettleStep::Write);

        self.send_command(&Command::Save)?;
        self.settle(SettleStep::Save);

        self.settle(write.apply);
        Ok(())
    }

    /// Switches the module's serial rate (BAUD, 0x04). Accepts codes 1..=7.
    ///
    /// Only the module changes rate; reconfigure the host side afterwards,
    /// e.g. with `interface_mut().set_baud_rate(code.bps())`.
    pub fn set_baud_rate(&mut self, code: u8) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        let baud = BaudCode::from_u8(code).ok_or(Jy901sError::InvalidBaudCode(code))?;
        self.run_register_write(RegisterWrite::new(Register::Baud, baud.code() as u16))?;
        info!("jy901s: module baud rate set to {}", baud.bps());
        Ok(())
    }

    /// Sets the data stream rate (RRATE, 0x03). Code 10 is reserved.
    pub fn set_output_rate(&mut self, code: u8) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        let rate = OutputRate::from_u8(code).ok_or(Jy901sError::InvalidOutputRate(code))?;
        self.run_register_write(RegisterWrite::new(Register::RRate, rate.code() as u16))
    }

    /// Selects the streamed packet types (RSW, 0x02). See [`ContentMask`].
    pub fn set_content(&mut self, mask: u16) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        let mask = ContentMask::new(mask).map_err(|_| Jy901sError::InvalidContentMask(mask))?;
        self.run_register_write(
            RegisterWrite::new(Register::Rsw, mask.into()).with_extra_unlock_settle(),
        )
    }

    pub fn set_bandwidth(&mut self, code: u8) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        let bandwidth = Bandwidth::from_u8(code).ok_or(Jy901sError::InvalidBandwidth(code))?;
        self.run_register_write(
            RegisterWrite::new(Register::Bandwidth, bandwidth.code() as u16)
                .with_extra_unlock_settle(),
        )
    }

    // --- Calibration ---

    fn write_calibration_mode(&mut self, mode: CalibrationMode) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        let write = RegisterWrite::new(Register::CalSw, mode as u16).with_extra_unlock_settle();
        let write = if mode == CalibrationMode::Normal {
            write
        } else {
            write.long_apply()
        };
        self.run_register_write(write)?;
        info!("jy901s: calibration mode {:?}", mode);
        Ok(())
    }

    /// Starts accelerometer/gyroscope calibration. Keep the module still and level.
    pub fn start_acc_calibration(&mut self) -> Result<(), Jy901sError<IF::Error>> {
        self.write_calibration_mode(CalibrationMode::AccGyro)
    }

    pub fn stop_acc_calibration(&mut self) -> Result<(), Jy901sError<IF::Error>> {
        self.write_calibration_mode(CalibrationMode::Normal)
    }

    /// Starts magnetometer calibration. Rotate the module through every axis
    /// before stopping.
    pub fn start_mag_calibration(&mut self) -> Result<(), Jy901sError<IF::Error>> {
        self.write_calibration_mode(CalibrationMode::Magnetometer)
    }

    pub fn stop_mag_calibration(&mut self) -> Result<(), Jy901sError<IF::Error>> {
        self.write_calibration_mode(CalibrationMode::Normal)
    }

    fn write_manual_calibration(&mut self, step: ManualCalibration) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        self.run_register_write(RegisterWrite::new(Register::ManualCali, step as u16).long_apply())?;
        info!("jy901s: manual calibration {:?}", step);
        Ok(())
    }

    pub fn start_manual_calibration(&mut self) -> Result<(), Jy901sError<IF::Error>> {
        self.write_manual_calibration(ManualCalibration::Enter)
    }

    pub fn stop_manual_calibration(&mut self) -> Result<(), Jy901sError<IF::Error>> {
        self.write_manual_calibration(ManualCalibration::Exit)
    }

    /// Zeroes the yaw angle (CALIYAW, 0x76).
    pub fn reset_yaw(&mut self) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        self.run_register_write(RegisterWrite::new(Register::CaliYaw, 0).long_apply())?;
        info!("jy901s: yaw zeroed");
        Ok(())
    }

    // --- Raw access ---

    /// Writes any register with the standard unlock/write/save sequence.
    ///
    /// No range checking is done on `value`.
    pub fn write_register(&mut self, register: Register, value: u16) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        self.run_register_write(RegisterWrite::new(register, value))
    }

    /// Persists the current configuration on its own.
    pub fn save_config(&mut self) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        self.send_command(&Command::Save)?;
        self.settle(SettleStep::Save);
        Ok(())
    }

    /// Requests a register dump. The reply arrives through `feed` like any
    /// other packet; this does not wait for it.
    pub fn read_register(&mut self, register: u8) -> Result<(), Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        self.send_command(&Command::Read { register })
    }
}
