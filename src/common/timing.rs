// src/common/timing.rs

use core::time::Duration;

// The module needs time to apply and persist register writes. The values below
// are the nominal waits that keep a configuration sequence reliable.

// === Command settle waits ===

/// Wait after the unlock frame before the write frame.
pub const UNLOCK_SETTLE: Duration = Duration::from_millis(100);
/// Extra wait after unlocking for RSW, BANDWIDTH and CALSW writes.
pub const UNLOCK_EXTRA_SETTLE: Duration = Duration::from_millis(20);
/// Wait after a register write frame.
pub const WRITE_SETTLE: Duration = Duration::from_millis(100);
/// Wait after the save frame.
pub const SAVE_SETTLE: Duration = Duration::from_millis(100);
/// Final wait for a register change to take effect.
pub const APPLY_SETTLE: Duration = Duration::from_millis(200);
/// Final wait for calibration, manual calibration and yaw zeroing.
pub const APPLY_SETTLE_LONG: Duration = Duration::from_millis(500);

// === Driver defaults ===

/// Response timeout used when the caller passes zero.
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u32 = 1000;

// === Watchdog ===

/// Watchdog timeout applied at construction.
pub const WATCHDOG_DEFAULT_TIMEOUT_MS: u32 = 1000;
/// Shortest accepted watchdog window.
pub const WATCHDOG_TIMEOUT_MIN_MS: u32 = 500;
/// Longest accepted watchdog window.
pub const WATCHDOG_TIMEOUT_MAX_MS: u32 = 30_000;
/// Suggested polling period for `watchdog_check`.
pub const WATCHDOG_CHECK_INTERVAL: Duration = Duration::from_millis(100);
/// Pause between tearing the transport down and bringing it back.
pub const RESTART_PAUSE: Duration = Duration::from_millis(10);

// === Baud scan ===

/// Time allowed for a register-read reply at each candidate rate.
pub const SCAN_REPLY_WINDOW: Duration = Duration::from_millis(100);
/// Attempts per candidate rate.
pub const SCAN_RETRIES: usize = 2;

/// Converts one of the waits above into the whole milliseconds the timer takes.
#[inline]
pub fn as_ms(d: Duration) -> u32 {
    d.as_millis() as u32
}
