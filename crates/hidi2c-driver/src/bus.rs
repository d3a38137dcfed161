//! The I2C bus driver.
//!
//! One logical bus operation is one round trip: build the request frame,
//! send it, receive the response report, classify the status byte. The
//! driver keeps no state across calls beyond the open stream, the
//! configured timeout, and the last applied bus speed.

use std::time::Duration;

use log::{debug, trace};

use hidi2c_protocol::{BusSpeed, HwFault, Request, Response, Status, DEFAULT_TIMEOUT_MS};

use crate::error::Error;
use crate::transport::{Bridge, Transport};

/// Driver for one attached bridge.
///
/// Owns the bridge handle exclusively. Callers that need to share a bus
/// across threads serialize above this type; there is no internal locking.
pub struct I2cBus<B: Bridge> {
    bridge: B,
    stream: Option<B::Stream>,
    timeout: Duration,
    speed: BusSpeed,
}

impl<B: Bridge> I2cBus<B> {
    /// Create a driver with the default timeout.
    pub fn new(bridge: B) -> Self {
        I2cBus::with_timeout(bridge, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    /// Create a driver with an explicit per-call timeout.
    pub fn with_timeout(bridge: B, timeout: Duration) -> Self {
        I2cBus {
            bridge,
            stream: None,
            timeout,
            speed: BusSpeed::default(),
        }
    }

    /// The configured per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Change the per-call timeout. Takes effect at the next open.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The last bus speed applied through [`I2cBus::set_speed`], or the
    /// firmware default.
    pub fn speed(&self) -> BusSpeed {
        self.speed
    }

    /// Whether the bridge is currently open.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the bridge. Idempotent: returns `Ok(true)` if already open or
    /// opened now, `Ok(false)` if another driver instance holds the device.
    pub fn try_open(&mut self) -> Result<bool, Error> {
        if self.stream.is_some() {
            return Ok(true);
        }
        match self.bridge.open(self.timeout)? {
            Some(stream) => {
                self.stream = Some(stream);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Open the bridge, treating a busy device as a hard error.
    pub fn open(&mut self) -> Result<(), Error> {
        if self.try_open()? {
            Ok(())
        } else {
            Err(Error::DeviceBusy)
        }
    }

    /// Close the bridge, releasing it for other driver instances. Safe to
    /// call when already closed.
    pub fn close(&mut self) {
        self.stream = None;
    }

    /// Probe an address for an acknowledge.
    ///
    /// This is the only operation where a negative hardware signal is a
    /// normal result: a bare no-acknowledge means "no device here" and
    /// returns `Ok(false)`. Every other failure propagates as an error.
    pub fn detect(&mut self, addr: u8) -> Result<bool, Error> {
        let raw = self.transact(&Request::scan(addr)?)?;
        let response = Response::decode(&raw)?;
        if response.status == Status::NoAcknowledge {
            return Ok(false);
        }
        check(response.status)?;
        Ok(true)
    }

    /// Read `len` bytes from the device at `addr`.
    pub fn read(&mut self, addr: u8, len: usize) -> Result<Vec<u8>, Error> {
        let raw = self.transact(&Request::read(addr, len)?)?;
        let response = Response::decode_read(&raw)?;
        check(response.status)?;
        Ok(response.payload.unwrap_or_default())
    }

    /// Write `data` to the device at `addr`.
    pub fn write(&mut self, addr: u8, data: &[u8]) -> Result<(), Error> {
        let raw = self.transact(&Request::write(addr, data)?)?;
        let response = Response::decode(&raw)?;
        check(response.status)
    }

    /// Reset the bridge's I2C module.
    pub fn reset(&mut self) -> Result<(), Error> {
        let raw = self.transact(&Request::bus_reset())?;
        let response = Response::decode(&raw)?;
        check(response.status)
    }

    /// Change the bus clock speed.
    ///
    /// The requested rate is quantized down to the nearest supported tier
    /// before it goes on the wire; the applied tier is readable through
    /// [`I2cBus::speed`] afterwards.
    pub fn set_speed(&mut self, khz: u32) -> Result<(), Error> {
        let tier = BusSpeed::quantize_down(khz);
        debug!("setting bus speed: requested {} kHz, applying {}", khz, tier);
        let raw = self.transact(&Request::set_speed(tier.khz()))?;
        let response = Response::decode(&raw)?;
        if !response.status.is_ok() {
            return Err(Error::SpeedChange { khz });
        }
        self.speed = tier;
        Ok(())
    }

    /// One request/response round trip. Exactly one write followed by
    /// exactly one read; a transport timeout leaves the open state
    /// untouched.
    fn transact(&mut self, request: &Request) -> Result<Vec<u8>, Error> {
        let stream = self.stream.as_mut().ok_or(Error::NotOpen)?;
        let frame = request.encode();
        trace!("-> {:02X?}", frame);
        stream.send_report(&frame)?;
        let raw = stream.recv_report()?;
        trace!("<- {:02X?}", raw);
        Ok(raw)
    }
}

/// Map a non-ok status to its driver error. Every operation funnels
/// through this one mapping; only `detect` special-cases no-acknowledge
/// before calling it.
fn check(status: Status) -> Result<(), Error> {
    match status {
        Status::Ok => Ok(()),
        Status::NoAcknowledge => Err(Error::Transaction(HwFault::ACKNOWLEDGE)),
        Status::Hardware(fault) => Err(Error::Transaction(fault)),
        Status::InvalidCommand => Err(Error::InvalidCommand),
        Status::ProtocolError => Err(Error::ProtocolError),
        Status::NotSupported => Err(Error::NotSupported),
        Status::Unknown(byte) => Err(Error::UnknownStatus(byte)),
    }
}
