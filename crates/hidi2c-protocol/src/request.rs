//! Requests that can be sent to the bridge.

use crate::constants::*;
use crate::error::FrameError;

/// Requests that can be sent to the bridge.
///
/// Construct through the validating constructors; `encode` is then
/// infallible and produces exactly one outgoing report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Write a payload to an addressed device.
    Write {
        /// 7-bit device address.
        addr: u8,
        /// Payload bytes, at most [`MAX_WRITE_PAYLOAD`].
        data: Vec<u8>,
    },

    /// Read bytes from an addressed device.
    Read {
        /// 7-bit device address.
        addr: u8,
        /// Number of bytes to read, 1..=255.
        len: u8,
    },

    /// Probe an address for an acknowledge. Encodes as a one-byte read;
    /// the result is only ever inspected for the acknowledge bit.
    Scan {
        /// 7-bit device address.
        addr: u8,
    },

    /// Reset the bridge's I2C module.
    BusReset,

    /// Change the bus clock speed. The value goes on the wire as-is;
    /// quantize to a supported tier first (see
    /// [`BusSpeed`](crate::BusSpeed)).
    SetSpeed {
        /// Clock rate in kHz.
        khz: u16,
    },
}

impl Request {
    /// Build a write request. Fails if the address is out of range or the
    /// payload exceeds the bridge's report buffer.
    pub fn write(addr: u8, data: &[u8]) -> Result<Request, FrameError> {
        check_address(addr)?;
        if data.len() > MAX_WRITE_PAYLOAD {
            return Err(FrameError::PayloadTooLarge {
                max: MAX_WRITE_PAYLOAD,
                actual: data.len(),
            });
        }
        Ok(Request::Write {
            addr,
            data: data.to_vec(),
        })
    }

    /// Build a read request for `len` bytes. Fails if the address is out of
    /// range or `len` does not fit a single report.
    pub fn read(addr: u8, len: usize) -> Result<Request, FrameError> {
        check_address(addr)?;
        if len == 0 || len > usize::from(u8::MAX) {
            return Err(FrameError::InvalidReadLength(len));
        }
        Ok(Request::Read {
            addr,
            len: len as u8,
        })
    }

    /// Build a scan probe for an address.
    pub fn scan(addr: u8) -> Result<Request, FrameError> {
        check_address(addr)?;
        Ok(Request::Scan { addr })
    }

    /// Build a bus reset request.
    pub fn bus_reset() -> Request {
        Request::BusReset
    }

    /// Build a set-speed request carrying `khz` verbatim.
    pub fn set_speed(khz: u16) -> Request {
        Request::SetSpeed { khz }
    }

    /// Get the opcode for this request.
    pub fn opcode(&self) -> u8 {
        match self {
            Request::Write { .. } => REQ_I2C_WRITE,
            Request::Read { .. } | Request::Scan { .. } => REQ_I2C_READ,
            Request::BusReset => REQ_BUS_RESET,
            Request::SetSpeed { .. } => REQ_SET_SPEED,
        }
    }

    /// Encode the request into one outgoing report.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + MAX_WRITE_PAYLOAD);
        buf.push(REPORT_FIRST_BYTE);
        buf.push(self.opcode());

        match self {
            Request::Write { addr, data } => {
                // Length field counts the address byte plus the payload.
                buf.push(data.len() as u8 + 1);
                buf.push(*addr);
                buf.extend_from_slice(data);
            }

            Request::Read { addr, len } => {
                buf.push(*len);
                buf.push(*addr);
            }

            Request::Scan { addr } => {
                buf.push(1);
                buf.push(*addr);
            }

            Request::BusReset => {}

            Request::SetSpeed { khz } => {
                buf.extend_from_slice(&khz.to_le_bytes());
            }
        }

        buf
    }
}

fn check_address(addr: u8) -> Result<(), FrameError> {
    if addr > ADDRESS_MAX {
        return Err(FrameError::AddressOutOfRange(addr));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_frame_layout() {
        let req = Request::write(0x50, &[0xDE, 0xAD]).unwrap();
        assert_eq!(req.encode(), vec![0xFF, 0x0A, 3, 0x50, 0xDE, 0xAD]);
    }

    #[test]
    fn write_length_field_counts_address_byte() {
        for len in [0usize, 1, 10, 60] {
            let data = vec![0xA5; len];
            let req = Request::write(0x10, &data).unwrap();
            assert_eq!(req.encode()[2], len as u8 + 1);
        }
    }

    #[test]
    fn write_rejects_oversized_payload() {
        let data = vec![0; 61];
        assert_eq!(
            Request::write(0x10, &data),
            Err(FrameError::PayloadTooLarge {
                max: 60,
                actual: 61
            })
        );
    }

    #[test]
    fn read_frame_layout() {
        let req = Request::read(0x3C, 16).unwrap();
        assert_eq!(req.encode(), vec![0xFF, 0x0B, 16, 0x3C]);
    }

    #[test]
    fn read_rejects_bad_lengths() {
        assert_eq!(
            Request::read(0x3C, 0),
            Err(FrameError::InvalidReadLength(0))
        );
        assert_eq!(
            Request::read(0x3C, 256),
            Err(FrameError::InvalidReadLength(256))
        );
        assert!(Request::read(0x3C, 255).is_ok());
    }

    #[test]
    fn scan_encodes_as_single_byte_read() {
        for addr in 0..=0x7F {
            assert_eq!(
                Request::scan(addr).unwrap().encode(),
                Request::read(addr, 1).unwrap().encode()
            );
        }
    }

    #[test]
    fn bus_reset_frame_layout() {
        assert_eq!(Request::bus_reset().encode(), vec![0xFF, 0x11]);
    }

    #[test]
    fn set_speed_encodes_little_endian() {
        assert_eq!(
            Request::set_speed(750).encode(),
            vec![0xFF, 0x10, 750u16.to_le_bytes()[0], 750u16.to_le_bytes()[1]]
        );
        assert_eq!(Request::set_speed(100).encode(), vec![0xFF, 0x10, 100, 0]);
    }

    #[test]
    fn address_range_is_checked() {
        assert_eq!(
            Request::scan(0x80),
            Err(FrameError::AddressOutOfRange(0x80))
        );
        assert_eq!(
            Request::read(0xFF, 1),
            Err(FrameError::AddressOutOfRange(0xFF))
        );
        assert_eq!(
            Request::write(0x80, &[]),
            Err(FrameError::AddressOutOfRange(0x80))
        );
        assert!(Request::scan(0x7F).is_ok());
    }
}
