// src/common/error.rs

#[derive(Debug, thiserror::Error)]
pub enum Jy901sError<E = ()>
where
    E: core::fmt::Debug, // Needed for the generic Io error message
{
    /// Underlying I/O error from the host transport.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// A transmit or flush stayed blocked past the response timeout.
    #[error("Operation timed out")]
    Timeout,

    /// The driver entity is disabled; nothing was attempted against the transport.
    #[error("Driver is disabled")]
    Disabled,

    /// `feed` was called with an empty byte slice.
    #[error("Empty input buffer")]
    EmptyInput,

    /// Baud code outside 1..=7.
    #[error("Invalid baud code: {0}")]
    InvalidBaudCode(u8),

    /// Output rate code outside 1..=13, or the reserved code 10.
    #[error("Invalid output rate code: {0}")]
    InvalidOutputRate(u8),

    /// Output content mask is zero or wider than 8 bits.
    #[error("Invalid output content mask: {0:#06x}")]
    InvalidContentMask(u16),

    /// Bandwidth code outside 0..=6.
    #[error("Invalid bandwidth code: {0}")]
    InvalidBandwidth(u8),

    /// Watchdog timeout outside the accepted window.
    #[error("Watchdog timeout out of range: {0} ms")]
    InvalidWatchdogTimeout(u32),
}

impl<E: core::fmt::Debug> Jy901sError<E> {
    /// Numeric status for hosts that report errors as negative codes.
    ///
    /// Parameter errors share -1, caller misuse is -2, transport errors are -3 and -4.
    pub fn code(&self) -> i8 {
        match self {
            Jy901sError::InvalidBaudCode(_)
            | Jy901sError::InvalidOutputRate(_)
            | Jy901sError::InvalidContentMask(_)
            | Jy901sError::InvalidBandwidth(_)
            | Jy901sError::InvalidWatchdogTimeout(_)
            | Jy901sError::EmptyInput => -1,
            Jy901sError::Disabled => -2,
            Jy901sError::Io(_) => -3,
            Jy901sError::Timeout => -4,
        }
    }

    /// True for errors raised before any byte reached the transport.
    pub fn is_parameter_error(&self) -> bool {
        self.code() == -1
    }
}

// Allow mapping from the underlying transport error
impl<E: core::fmt::Debug> From<E> for Jy901sError<E> {
    fn from(e: E) -> Self {
        Jy901sError::Io(e)
    }
}
