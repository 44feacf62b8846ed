// src/driver/watchdog.rs

use super::Jy901s;
use crate::common::{
    error::Jy901sError,
    hal_traits::{ImuSerial, ImuTimer},
    timing,
};
use core::fmt::Debug;
use log::{error, info, warn};

/// Data-silence watchdog state.
///
/// Times are ticks from [`ImuTimer::now_ms`]; all comparisons use wrapping
/// subtraction so a tick rollover never fires or masks a timeout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Watchdog {
    timeout_ms: u32,
    last_feed_ms: u32,
    enabled: bool,
    restart_count: u32,
}

/// Result of one [`Jy901s::watchdog_check`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WatchdogEvent {
    /// Watchdog disarmed, driver disabled, or data is still arriving.
    Idle,
    /// The link was silent and the transport was restarted.
    Recovered,
    /// The link was silent and restarting the transport failed.
    RecoveryFailed,
}

impl Watchdog {
    pub fn new(now_ms: u32) -> Self {
        Watchdog {
            timeout_ms: timing::WATCHDOG_DEFAULT_TIMEOUT_MS,
            last_feed_ms: now_ms,
            enabled: false,
            restart_count: 0,
        }
    }

    /// Sets the timeout, disarms the watchdog and resets the restart counter.
    pub fn init<E: Debug>(&mut self, timeout_ms: u32, now_ms: u32) -> Result<(), Jy901sError<E>> {
        if !(timing::WATCHDOG_TIMEOUT_MIN_MS..=timing::WATCHDOG_TIMEOUT_MAX_MS).contains(&timeout_ms) {
            return Err(Jy901sError::InvalidWatchdogTimeout(timeout_ms));
        }
        self.timeout_ms = timeout_ms;
        self.last_feed_ms = now_ms;
        self.enabled = false;
        self.restart_count = 0;
        Ok(())
    }

    /// Arming and disarming both restart the silence window.
    pub fn set_enabled(&mut self, enable: bool, now_ms: u32) {
        self.enabled = enable;
        self.last_feed_ms = now_ms;
    }

    #[inline]
    pub fn feed(&mut self, now_ms: u32) {
        self.last_feed_ms = now_ms;
    }

    #[inline]
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_feed_ms)
    }

    pub fn is_expired(&self, now_ms: u32) -> bool {
        self.enabled && self.elapsed(now_ms) > self.timeout_ms
    }

    fn record_restart(&mut self, now_ms: u32) {
        self.restart_count = self.restart_count.saturating_add(1);
        self.last_feed_ms = now_ms;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    #[inline]
    pub fn restart_count(&self) -> u32 {
        self.restart_count
    }
}

impl<IF> Jy901s<IF>
where
    IF: ImuSerial + ImuTimer,
{
    /// Configures the watchdog with a timeout in 500..=30000 ms.
    ///
    /// Leaves it disarmed and zeroes the restart counter.
    pub fn watchdog_init(&mut self, timeout_ms: u32) -> Result<(), Jy901sError<IF::Error>> {
        let now = self.interface.now_ms();
        self.watchdog.init::<IF::Error>(timeout_ms, now)?;
        info!("jy901s: watchdog configured, timeout {} ms", timeout_ms);
        Ok(())
    }

    pub fn watchdog_enable(&mut self, enable: bool) {
        let now = self.interface.now_ms();
        self.watchdog.set_enabled(enable, now);
        info!("jy901s: watchdog {}", if enable { "armed" } else { "disarmed" });
    }

    pub fn watchdog(&self) -> &Watchdog {
        &self.watchdog
    }

    /// Number of transport restarts since the last `watchdog_init`.
    pub fn restart_count(&self) -> u32 {
        self.watchdog.restart_count()
    }

    /// Restarts the transport if no valid frame arrived within the timeout.
    ///
    /// Poll this periodically from the main loop (see
    /// [`timing::WATCHDOG_CHECK_INTERVAL`]). After a restart, accessors return
    /// `None` until the next packet decodes. The restart counter is bumped even
    /// when the restart fails.
    pub fn watchdog_check(&mut self) -> WatchdogEvent {
        if !self.enabled {
            return WatchdogEvent::Idle;
        }
        let now = self.interface.now_ms();
        if !self.watchdog.is_expired(now) {
            return WatchdogEvent::Idle;
        }

        warn!(
            "jy901s: no valid frame for {} ms, restarting serial link",
            self.watchdog.elapsed(now)
        );
        let result = self.restart_link();

        self.assembler.reset();
        self.reading.valid = false;
        let now = self.interface.now_ms();
        self.watchdog.record_restart(now);

        match result {
            Ok(()) => {
                info!("jy901s: serial link restarted ({} total)", self.watchdog.restart_count());
                WatchdogEvent::Recovered
            }
            Err(e) => {
                error!("jy901s: serial link restart failed: {:?}", e);
                WatchdogEvent::RecoveryFailed
            }
        }
    }

    fn restart_link(&mut self) -> Result<(), IF::Error> {
        self.interface.abort_receive();
        if let Err(e) = self.interface.deinit() {
            warn!("jy901s: deinit failed during restart: {:?}", e);
        }
        self.interface.delay_ms(timing::as_ms(timing::RESTART_PAUSE));
        self.interface.init()?;
        self.interface.start_receive()
    }
}
