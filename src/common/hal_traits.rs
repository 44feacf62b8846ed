// src/common/hal_traits.rs

use core::fmt::Debug;

/// Abstraction for the millisecond clock and blocking delays the driver needs.
///
/// `now_ms` is a free-running tick that is allowed to wrap; every consumer
/// uses wrapping subtraction.
pub trait ImuTimer {
    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Current monotonic tick in milliseconds.
    fn now_ms(&self) -> u32;
}

/// Abstraction for the serial channel the JY901S is attached to.
///
/// Received bytes normally reach the driver through [`crate::Jy901s::feed`],
/// called from the host's receive-complete context. `read_byte` is only used
/// by the baud-rate scan, which has to pull bytes while it owns the driver.
pub trait ImuSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to write a single byte.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the transmit buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;

    /// Attempts to take one already-received byte from the host's receive buffer.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` when nothing is pending.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Aborts any in-flight asynchronous receive.
    fn abort_receive(&mut self);

    /// Tears the peripheral down.
    fn deinit(&mut self) -> Result<(), Self::Error>;

    /// Brings the peripheral back up at the current baud rate.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Re-arms asynchronous reception (interrupt or DMA) after `init`.
    fn start_receive(&mut self) -> Result<(), Self::Error>;

    /// Currently configured baud rate in bit/s.
    fn baud_rate(&self) -> u32;

    /// Reconfigures the peripheral to a new baud rate.
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error>;
}

/// Joins a separate serial peripheral and timer into one driver interface.
#[derive(Debug)]
pub struct Split<S, T> {
    pub serial: S,
    pub timer: T,
}

impl<S, T> Split<S, T> {
    pub fn new(serial: S, timer: T) -> Self {
        Split { serial, timer }
    }

    /// Returns the two halves.
    pub fn into_parts(self) -> (S, T) {
        (self.serial, self.timer)
    }
}

impl<S: ImuSerial, T> ImuSerial for Split<S, T> {
    type Error = S::Error;

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.serial.write_byte(byte)
    }
    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.serial.flush()
    }
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.serial.read_byte()
    }
    fn abort_receive(&mut self) {
        self.serial.abort_receive()
    }
    fn deinit(&mut self) -> Result<(), Self::Error> {
        self.serial.deinit()
    }
    fn init(&mut self) -> Result<(), Self::Error> {
        self.serial.init()
    }
    fn start_receive(&mut self) -> Result<(), Self::Error> {
        self.serial.start_receive()
    }
    fn baud_rate(&self) -> u32 {
        self.serial.baud_rate()
    }
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        self.serial.set_baud_rate(baud)
    }
}

impl<S, T: ImuTimer> ImuTimer for Split<S, T> {
    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay_ms(ms)
    }
    fn now_ms(&self) -> u32 {
        self.timer.now_ms()
    }
}

/// Adapts an `embedded_hal::delay::DelayNs` and a tick source into [`ImuTimer`].
///
/// Requires `embedded-hal` v1.0.
#[cfg(feature = "impl-hal")]
pub struct HalTimer<D, F>
where
    D: embedded_hal::delay::DelayNs,
    F: Fn() -> u32,
{
    delay: D,
    ticks: F,
}

#[cfg(feature = "impl-hal")]
impl<D, F> HalTimer<D, F>
where
    D: embedded_hal::delay::DelayNs,
    F: Fn() -> u32,
{
    pub fn new(delay: D, ticks: F) -> Self {
        HalTimer { delay, ticks }
    }
}

#[cfg(feature = "impl-hal")]
impl<D, F> ImuTimer for HalTimer<D, F>
where
    D: embedded_hal::delay::DelayNs,
    F: Fn() -> u32,
{
    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn now_ms(&self) -> u32 {
        (self.ticks)()
    }
}
