//! Transport abstraction over the HID report stream.
//!
//! The bridge speaks whole HID reports: one outgoing report per request,
//! one incoming report per response. These traits are the seam between the
//! bus driver and the actual HID plumbing, so the driver can be exercised
//! against an in-memory transport in tests.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a transport implementation.
#[derive(Error, Debug)]
pub enum TransportError {
    /// No input report arrived within the configured timeout.
    #[error("timed out waiting for an input report")]
    Timeout,

    /// HID-level I/O failure.
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),
}

/// An open report stream to a bridge.
///
/// Implementations block for at most the timeout the stream was opened
/// with and surface its expiry as [`TransportError::Timeout`], never as a
/// generic I/O error.
pub trait Transport {
    /// Send one outgoing report.
    fn send_report(&mut self, report: &[u8]) -> Result<(), TransportError>;

    /// Receive one incoming report.
    fn recv_report(&mut self) -> Result<Vec<u8>, TransportError>;
}

/// A bridge device that can be opened into a report stream.
///
/// Opening is exclusive: while one stream exists for a physical device,
/// further opens return `Ok(None)` until that stream is dropped.
pub trait Bridge {
    /// The stream type produced by [`Bridge::open`].
    type Stream: Transport;

    /// Open the device with the given per-report timeout. Returns
    /// `Ok(None)` if another driver instance already holds it.
    fn open(&self, timeout: Duration) -> Result<Option<Self::Stream>, TransportError>;
}
