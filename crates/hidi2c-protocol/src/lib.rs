//! HIDI2C Bridge Report Protocol
//!
//! This crate provides types and utilities for talking to a USB-HID
//! attached I2C bus bridge. The bridge exchanges fixed-layout HID reports:
//! each request starts with a marker byte and an opcode, each response
//! carries a status byte that is either a fixed protocol outcome or a
//! hardware-fault bitset.
//!
//! # Protocol Overview
//!
//! - **Requests** (host → bridge): `[0xFF, opcode, ...]` — see [`Request`].
//! - **Responses** (bridge → host): `[reserved, status, len?, payload...]`
//!   — see [`Response`] and [`Status`].
//!
//! # Example
//!
//! ```rust
//! use hidi2c_protocol::{Request, Response, Status};
//!
//! // Build a read request
//! let frame = Request::read(0x3C, 4)?.encode();
//! assert_eq!(frame, [0xFF, 0x0B, 4, 0x3C]);
//!
//! // Parse a response
//! let response = Response::decode_read(&[0x00, 0x00, 2, 0xAB, 0xCD])?;
//! assert_eq!(response.status, Status::Ok);
//! assert_eq!(response.payload, Some(vec![0xAB, 0xCD]));
//! # Ok::<(), hidi2c_protocol::FrameError>(())
//! ```

mod constants;
mod error;
mod request;
mod response;
mod status;
mod types;

pub use constants::*;
pub use error::*;
pub use request::*;
pub use response::*;
pub use status::*;
pub use types::*;
