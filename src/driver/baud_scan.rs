// src/driver/baud_scan.rs

use super::Jy901s;
use crate::common::{
    error::Jy901sError,
    hal_traits::{ImuSerial, ImuTimer},
    register::Register,
    timing,
    types::SCAN_BAUD_RATES,
};
use log::{debug, info, warn};

impl<IF> Jy901s<IF>
where
    IF: ImuSerial + ImuTimer,
{
    /// Finds the rate the module is talking at.
    ///
    /// For each candidate rate the host port is reconfigured and a register
    /// read is sent; any checksum-valid, decodable reply within the window
    /// counts as a hit. Rates the host refuses are skipped. Returns the rate
    /// the port is left at, or `None` after restoring the original rate.
    ///
    /// Bytes are pulled with [`ImuSerial::read_byte`] while scanning, so the
    /// host must not also deliver them through `feed`.
    pub fn auto_scan_baud_rate(&mut self) -> Result<Option<u32>, Jy901sError<IF::Error>> {
        self.ensure_enabled()?;
        let original = self.interface.baud_rate();
        let window = timing::as_ms(timing::SCAN_REPLY_WINDOW);

        for &rate in SCAN_BAUD_RATES.iter() {
            if let Err(e) = self.interface.set_baud_rate(rate) {
                debug!("jy901s: scan skipping {} bps: {:?}", rate, e);
                continue;
            }

            for attempt in 0..timing::SCAN_RETRIES {
                self.assembler.reset();
                self.reading.valid = false;

                if let Err(e) = self.read_register(Register::Ax.addr()) {
                    debug!("jy901s: scan probe at {} bps failed: {}", rate, e);
                    continue;
                }
                self.collect_for(window);

                if self.reading.valid {
                    info!("jy901s: module found at {} bps (attempt {})", rate, attempt + 1);
                    return Ok(Some(rate));
                }
            }
        }

        warn!("jy901s: no reply at any baud rate, restoring {} bps", original);
        if let Err(e) = self.interface.set_baud_rate(original) {
            warn!("jy901s: failed to restore {} bps: {:?}", original, e);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::mock::MockInterface;

    const PROBE: [u8; 5] = [0xFF, 0xAA, 0x27, 0x34, 0x00];

    #[test]
    fn test_scan_finds_responding_rate() {
        let mut mock = MockInterface::new();
        mock.answers_at_baud = Some(115_200);
        let mut imu = Jy901s::new(mock, 0);

        assert_eq!(imu.auto_scan_baud_rate().unwrap(), Some(115_200));
        assert_eq!(imu.interface().baud, 115_200);
        // Five slower rates, two probes each, then one hit.
        let probes = imu.interface().commands();
        assert_eq!(probes.len(), 11);
        assert!(probes.iter().all(|c| *c == PROBE));
        assert_eq!(imu.acc_x(), Some(1.0));
    }

    #[test]
    fn test_scan_restores_original_rate() {
        let mut mock = MockInterface::new();
        mock.baud = 38_400;
        mock.noise = vec![0x55, 0x51, 0x00, 0x13, 0x55];
        let mut imu = Jy901s::new(mock, 0);

        assert_eq!(imu.auto_scan_baud_rate().unwrap(), None);
        assert_eq!(imu.interface().baud, 38_400);
        assert_eq!(imu.interface().commands().len(), SCAN_BAUD_RATES.len() * timing::SCAN_RETRIES);
        assert_eq!(imu.reading(), None);
        // Each probe waits out its reply window.
        assert!(imu.interface().delayed_ms >= 100 * 18);
    }

    #[test]
    fn test_scan_skips_unsupported_rates() {
        let mut mock = MockInterface::new();
        mock.unsupported_bauds = vec![4800, 9600, 460_800, 921_600];
        mock.answers_at_baud = Some(9600);
        let mut imu = Jy901s::new(mock, 0);

        assert_eq!(imu.auto_scan_baud_rate().unwrap(), None);
        assert!(!imu.interface().baud_history.contains(&4800));
        assert_eq!(imu.interface().commands().len(), 5 * timing::SCAN_RETRIES);
        // 9600 is refused on the way back too, so the port stays at the last rate tried.
        assert_eq!(imu.interface().baud, 230_400);
    }

    #[test]
    fn test_scan_discards_earlier_readings() {
        let mut mock = MockInterface::new();
        mock.answers_at_baud = Some(4800);
        let mut imu = Jy901s::new(mock, 0);
        imu.feed(crate::driver::tests::frame(0x53, [0, 0, 16384, 0]).as_bytes()).unwrap();

        assert_eq!(imu.auto_scan_baud_rate().unwrap(), Some(4800));
        assert_eq!(imu.interface().commands().len(), 1);
    }

    #[test]
    fn test_scan_rejected_while_disabled() {
        let mut imu = Jy901s::new(MockInterface::new(), 0);
        imu.enable(false);
        assert!(matches!(imu.auto_scan_baud_rate(), Err(Jy901sError::Disabled)));
        assert!(imu.interface().baud_history.is_empty());
    }
}
