//! Status-byte classification.
//!
//! The status byte of a response frame has two disjoint interpretations:
//! a fixed protocol outcome (ok, invalid command, protocol error, not
//! supported) or, when both bits of [`STATUS_HW_FAULT_CLASS`] are set, a
//! bitset describing a hardware-level bus fault. [`Status::classify`]
//! decides between the two first and only then reads the fault bits, so a
//! raw byte is never interpreted as both at once.

use std::fmt;

use bitflags::bitflags;

use crate::constants::*;

bitflags! {
    /// Hardware-fault bits carried in the low bits of a fault-class status
    /// byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HwFault: u8 {
        /// Bus error (misplaced start/stop condition).
        const BUS = 1 << 0;
        /// Arbitration lost to another bus master.
        const ARBITRATION = 1 << 1;
        /// No acknowledge received from the addressed device.
        const ACKNOWLEDGE = 1 << 2;
        /// Data overrun or underrun.
        const OVERRUN = 1 << 3;
        /// The bridge's own bus timeout expired.
        const TIMEOUT = 1 << 4;
    }
}

impl HwFault {
    /// The all-flags value the firmware reports when it cannot attribute
    /// the fault to a single cause.
    pub const UNKNOWN: HwFault = HwFault::all();

    /// True if the firmware reported the unattributed all-flags fault.
    pub fn is_unknown(self) -> bool {
        self == HwFault::UNKNOWN
    }
}

impl fmt::Display for HwFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "unknown fault");
        }
        if self.is_empty() {
            return write!(f, "unspecified fault");
        }
        let mut first = true;
        for (name, flag) in [
            ("bus error", HwFault::BUS),
            ("arbitration loss", HwFault::ARBITRATION),
            ("no acknowledge", HwFault::ACKNOWLEDGE),
            ("overrun", HwFault::OVERRUN),
            ("timeout", HwFault::TIMEOUT),
        ] {
            if self.contains(flag) {
                if !first {
                    write!(f, " + ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Classified outcome of a response status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Operation completed.
    Ok,
    /// The bridge did not recognize the request opcode.
    InvalidCommand,
    /// The request was recognized but its shape was wrong.
    ProtocolError,
    /// The request is not supported by this firmware.
    NotSupported,
    /// The addressed device did not acknowledge, and nothing else went
    /// wrong. During a scan this means "no device at this address".
    NoAcknowledge,
    /// A hardware-level bus fault. Covers every fault-class byte whose
    /// flag bits are anything other than exactly [`HwFault::ACKNOWLEDGE`],
    /// including the all-flags unknown value and no-acknowledge combined
    /// with other faults.
    Hardware(HwFault),
    /// A byte this driver does not recognize. Never treated as success.
    Unknown(u8),
}

impl Status {
    /// Classify a raw status byte. Total over all 256 values.
    pub fn classify(byte: u8) -> Status {
        if byte & STATUS_HW_FAULT_CLASS == STATUS_HW_FAULT_CLASS {
            let fault = HwFault::from_bits_truncate(byte & !STATUS_HW_FAULT_CLASS);
            if fault == HwFault::ACKNOWLEDGE {
                return Status::NoAcknowledge;
            }
            return Status::Hardware(fault);
        }
        match byte {
            STATUS_OK => Status::Ok,
            STATUS_INVALID_COMMAND => Status::InvalidCommand,
            STATUS_PROTOCOL_ERROR => Status::ProtocolError,
            STATUS_NOT_SUPPORTED => Status::NotSupported,
            other => Status::Unknown(other),
        }
    }

    /// True for [`Status::Ok`] only.
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "ok"),
            Status::InvalidCommand => write!(f, "invalid command"),
            Status::ProtocolError => write!(f, "protocol error"),
            Status::NotSupported => write!(f, "not supported"),
            Status::NoAcknowledge => write!(f, "no acknowledge"),
            Status::Hardware(fault) => write!(f, "hardware fault: {}", fault),
            Status::Unknown(byte) => write!(f, "unknown status 0x{:02X}", byte),
        }
    }
}
