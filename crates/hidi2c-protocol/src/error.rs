//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when building request frames or decoding response
/// frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Response frame is too short to carry a status byte.
    #[error("response too short: expected at least {expected} bytes, got {actual}")]
    ResponseTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Response declares more payload bytes than the frame contains.
    #[error("declared payload length {declared} exceeds the {available} bytes present")]
    PayloadTruncated {
        /// Payload length declared in the frame.
        declared: usize,
        /// Payload bytes actually present.
        available: usize,
    },

    /// I2C address outside the 7-bit range.
    #[error("I2C address 0x{0:02X} outside the 7-bit range")]
    AddressOutOfRange(u8),

    /// Write payload does not fit in the bridge's report buffer.
    #[error("write payload too large: maximum {max} bytes, got {actual}")]
    PayloadTooLarge {
        /// Maximum allowed payload.
        max: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// Read length outside the 1..=255 range a single report can request.
    #[error("read length {0} outside the 1..=255 range")]
    InvalidReadLength(usize),
}
