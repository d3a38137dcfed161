//! Driver error types.

use thiserror::Error;

use hidi2c_protocol::{FrameError, HwFault};

use crate::transport::TransportError;

/// Errors that can occur when driving the bridge.
#[derive(Error, Debug)]
pub enum Error {
    /// No bridge with the requested IDs is attached.
    #[error("no HIDI2C bridge found with VID=0x{vid:04X}, PID=0x{pid:04X}")]
    DeviceNotFound {
        /// USB vendor ID searched for.
        vid: u16,
        /// USB product ID searched for.
        pid: u16,
    },

    /// The bridge is already held by another driver instance.
    #[error("bridge is already open by another driver instance")]
    DeviceBusy,

    /// An operation was attempted before opening the bridge.
    #[error("bridge is not open")]
    NotOpen,

    /// The bridge did not respond within the configured timeout.
    #[error("timed out waiting for a response report")]
    Timeout,

    /// A request could not be built or a response could not be decoded.
    #[error("malformed frame: {0}")]
    Frame(#[from] FrameError),

    /// The bus transaction failed at the hardware level. The caller may
    /// retry after a bus reset.
    #[error("I2C transaction failed: {0}")]
    Transaction(HwFault),

    /// The bridge did not recognize the request opcode.
    #[error("bridge rejected the request: invalid command")]
    InvalidCommand,

    /// The bridge reported a protocol error in the request shape.
    #[error("bridge rejected the request: protocol error")]
    ProtocolError,

    /// The bridge firmware does not support the request.
    #[error("bridge rejected the request: not supported")]
    NotSupported,

    /// The bridge refused to change the bus speed.
    #[error("failed to set bus speed to {khz} kHz")]
    SpeedChange {
        /// Requested speed in kHz.
        khz: u32,
    },

    /// The bridge returned a status byte this driver does not recognize.
    #[error("unknown status byte 0x{0:02X}")]
    UnknownStatus(u8),

    /// HID-level I/O failure.
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Error {
        match err {
            TransportError::Timeout => Error::Timeout,
            TransportError::Hid(err) => Error::Hid(err),
        }
    }
}
