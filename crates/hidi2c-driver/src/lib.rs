//! Bus driver for a USB-HID attached I2C bridge.
//!
//! This crate drives the SCTB HIDI2C bridge: it opens the device over HID
//! (exclusively, one driver instance per device), sends the request frames
//! built by [`hidi2c_protocol`], and turns response status bytes into typed
//! results.
//!
//! # Example
//!
//! ```rust,ignore
//! use hidi2c_driver::{HidBridge, I2cBus, DEFAULT_PID, DEFAULT_VID};
//!
//! let bridge = HidBridge::first(DEFAULT_VID, DEFAULT_PID)?;
//! let mut bus = I2cBus::new(bridge);
//! bus.open()?;
//!
//! for addr in 0..=0x7F {
//!     if bus.detect(addr)? {
//!         println!("found device at 0x{addr:02X}");
//!     }
//! }
//! ```

mod bus;
mod error;
mod hid;
mod transport;

pub use bus::I2cBus;
pub use error::Error;
pub use hid::{find_bridges, BridgeInfo, HidBridge, DEFAULT_PID, DEFAULT_VID};
pub use transport::{Bridge, Transport, TransportError};

pub use hidi2c_protocol as protocol;
