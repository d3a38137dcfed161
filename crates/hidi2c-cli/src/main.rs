//! Command-line harness for the HIDI2C bridge.
//!
//! Covers the interactive workflows the driver supports: scanning the bus,
//! probing a single address, register-style reads and writes, resetting the
//! bridge's I2C module, and changing the bus clock.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hidi2c_driver::protocol::{ADDRESS_MAX, ADDRESS_MIN};
use hidi2c_driver::{HidBridge, I2cBus};

#[derive(Parser)]
#[command(name = "hidi2c", version, about = "Talk to a USB-HID I2C bus bridge")]
struct Cli {
    /// USB vendor ID of the bridge, in hex.
    #[arg(long, default_value = "0403", value_parser = parse_hex_u16)]
    vid: u16,

    /// USB product ID of the bridge, in hex.
    #[arg(long, default_value = "6030", value_parser = parse_hex_u16)]
    pid: u16,

    /// Per-call transport timeout in milliseconds.
    #[arg(long, default_value_t = 10)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Probe every 7-bit address and list the devices that acknowledge.
    Scan,

    /// Probe a single address.
    Detect {
        /// 7-bit device address, in hex.
        #[arg(value_parser = parse_hex_u8)]
        addr: u8,
    },

    /// Read bytes from a device.
    Read {
        /// 7-bit device address, in hex.
        #[arg(value_parser = parse_hex_u8)]
        addr: u8,
        /// Number of bytes to read.
        len: usize,
    },

    /// Write bytes to a device.
    Write {
        /// 7-bit device address, in hex.
        #[arg(value_parser = parse_hex_u8)]
        addr: u8,
        /// Payload as a hex string, e.g. "00a1ff".
        data: String,
    },

    /// Reset the bridge's I2C module.
    Reset,

    /// Set the bus clock speed (rounded down to 20/100/400/750 kHz).
    Speed {
        /// Requested speed in kHz.
        khz: u32,
    },
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let s = s.trim_start_matches("0x");
    u16::from_str_radix(s, 16).map_err(|e| e.to_string())
}

fn parse_hex_u8(s: &str) -> Result<u8, String> {
    let s = s.trim_start_matches("0x");
    u8::from_str_radix(s, 16).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let bridge = HidBridge::first(cli.vid, cli.pid)?;
    let mut bus = I2cBus::with_timeout(bridge, Duration::from_millis(cli.timeout_ms));
    bus.open().context("failed to open the bridge")?;

    match cli.command {
        Command::Scan => {
            let mut found = 0;
            for addr in ADDRESS_MIN..=ADDRESS_MAX {
                if bus.detect(addr)? {
                    println!("found device at 0x{:02X}", addr);
                    found += 1;
                }
            }
            println!("{} device(s) found", found);
        }

        Command::Detect { addr } => {
            if bus.detect(addr)? {
                println!("0x{:02X}: present", addr);
            } else {
                println!("0x{:02X}: no acknowledge", addr);
            }
        }

        Command::Read { addr, len } => {
            let data = bus.read(addr, len)?;
            println!("{}", hex::encode(&data));
        }

        Command::Write { addr, data } => {
            let payload = hex::decode(&data).context("payload is not valid hex")?;
            bus.write(addr, &payload)?;
            println!("wrote {} byte(s) to 0x{:02X}", payload.len(), addr);
        }

        Command::Reset => {
            bus.reset()?;
            println!("bus reset");
        }

        Command::Speed { khz } => {
            bus.set_speed(khz)?;
            println!("bus speed set to {}", bus.speed());
        }
    }

    Ok(())
}
