// src/driver/io_helpers.rs

use super::{config::SettleStep, Jy901s};
use crate::common::{
    command::Command,
    error::Jy901sError,
    hal_traits::{ImuSerial, ImuTimer},
    timing,
};
use log::{debug, trace};
use nb::Result as NbResult;

// Poll spacing while the transport reports WouldBlock.
const POLL_INTERVAL_MS: u32 = 1;

impl<IF> Jy901s<IF>
where
    IF: ImuSerial + ImuTimer,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout_ms: u32,
        mut f: FN,
    ) -> Result<T, Jy901sError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let start = self.interface.now_ms();

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now_ms().wrapping_sub(start) >= timeout_ms {
                        return Err(Jy901sError::Timeout);
                    }
                    self.interface.delay_ms(POLL_INTERVAL_MS);
                }
                Err(nb::Error::Other(e)) => return Err(Jy901sError::Io(e)),
            }
        }
    }

    /// Writes one five-byte command and flushes it.
    ///
    /// Each byte and the flush get the full response timeout.
    pub(super) fn send_command(&mut self, command: &Command) -> Result<(), Jy901sError<IF::Error>> {
        if command.requires_response() {
            debug!("jy901s: -> {} (reply via data stream)", command);
        } else {
            debug!("jy901s: -> {}", command);
        }
        let timeout = self.timeout_ms;
        for byte in command.format_into() {
            self.execute_blocking_io_with_timeout(timeout, |iface| iface.write_byte(byte))?;
        }
        self.execute_blocking_io_with_timeout(timeout, |iface| iface.flush())?;
        Ok(())
    }

    /// Blocks for one of the named settle waits.
    pub(super) fn settle(&mut self, step: SettleStep) {
        let ms = timing::as_ms(step.duration());
        trace!("jy901s: settle {:?} ({} ms)", step, ms);
        self.interface.delay_ms(ms);
    }

    /// Pulls already-received bytes through the ingest path for `window_ms`.
    ///
    /// Transport errors are expected here (a wrong line rate shows up as
    /// framing errors) and only logged.
    pub(super) fn collect_for(&mut self, window_ms: u32) {
        let start = self.interface.now_ms();
        while self.interface.now_ms().wrapping_sub(start) < window_ms {
            match self.interface.read_byte() {
                Ok(byte) => self.ingest_byte(byte),
                Err(nb::Error::WouldBlock) => self.interface.delay_ms(POLL_INTERVAL_MS),
                Err(nb::Error::Other(e)) => {
                    trace!("jy901s: receive error while collecting: {:?}", e);
                    self.interface.delay_ms(POLL_INTERVAL_MS);
                }
            }
        }
    }
}
