//! Protocol constants
//!
//! These constants define the request opcodes, status codes, and other
//! protocol-specific values used in the HIDI2C bridge report format.

// ============================================================================
// Framing
// ============================================================================

/// First byte of every outgoing report. Doubles as the HID report ID.
pub const REPORT_FIRST_BYTE: u8 = 0xFF;

/// Minimum length of a response frame: reserved byte + status byte.
pub const RESPONSE_MIN_LEN: usize = 2;

/// Offset of the status byte in a response frame.
pub const RESPONSE_STATUS_OFFSET: usize = 1;

/// Offset of the payload-length byte in a read-family response frame.
pub const RESPONSE_LENGTH_OFFSET: usize = 2;

/// Offset of the first payload byte in a read-family response frame.
pub const RESPONSE_PAYLOAD_OFFSET: usize = 3;

// ============================================================================
// Request Opcodes (host → bridge)
// ============================================================================

/// Write a payload to an addressed device.
pub const REQ_I2C_WRITE: u8 = 0x0A;
/// Read bytes from an addressed device. Also used for single-byte scans.
pub const REQ_I2C_READ: u8 = 0x0B;
/// Change the bus clock speed.
pub const REQ_SET_SPEED: u8 = 0x10;
/// Reset the bridge's I2C module.
pub const REQ_BUS_RESET: u8 = 0x11;

// ============================================================================
// Status Codes (bridge → host)
// ============================================================================

/// Operation completed.
pub const STATUS_OK: u8 = 0x00;
/// The bridge did not recognize the request opcode.
pub const STATUS_INVALID_COMMAND: u8 = 0x80;
/// The request was recognized but its shape was wrong.
pub const STATUS_PROTOCOL_ERROR: u8 = 0x81;
/// The request is not supported by this firmware.
pub const STATUS_NOT_SUPPORTED: u8 = 0x82;
/// Both bits of this mask set mark the status as a hardware-fault bitset;
/// the remaining bits identify the fault (see [`HwFault`](crate::HwFault)).
pub const STATUS_HW_FAULT_CLASS: u8 = 0xC0;

// ============================================================================
// Limits
// ============================================================================

/// Lowest valid 7-bit I2C address.
pub const ADDRESS_MIN: u8 = 0x00;
/// Highest valid 7-bit I2C address.
pub const ADDRESS_MAX: u8 = 0x7F;
/// Largest write payload the bridge's report buffer can carry.
pub const MAX_WRITE_PAYLOAD: usize = 60;

// ============================================================================
// Timing
// ============================================================================

/// Default per-call transport timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10;
