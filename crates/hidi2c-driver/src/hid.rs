//! hidapi-backed bridge transport and enumeration.

use std::collections::HashSet;
use std::ffi::CString;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use hidapi::{HidApi, HidDevice};
use log::debug;

use crate::error::Error;
use crate::transport::{Bridge, Transport, TransportError};

/// Vendor ID of the FT260-class bridge the driver targets by default.
pub const DEFAULT_VID: u16 = 0x0403;
/// Product ID of the FT260-class bridge the driver targets by default.
pub const DEFAULT_PID: u16 = 0x6030;

/// Largest input report the bridge produces.
const REPORT_BUF_LEN: usize = 64;

/// Device paths currently opened by this process. hidapi has no portable
/// exclusive-open flag, so exclusivity is enforced here: one stream per
/// physical device per process. Cross-process exclusivity is not provided.
fn open_paths() -> &'static Mutex<HashSet<CString>> {
    static OPEN_PATHS: OnceLock<Mutex<HashSet<CString>>> = OnceLock::new();
    OPEN_PATHS.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Identity of an attached bridge.
#[derive(Debug, Clone)]
pub struct BridgeInfo {
    /// USB vendor ID.
    pub vid: u16,
    /// USB product ID.
    pub pid: u16,
    /// Platform device path used to open the device.
    pub path: CString,
    /// Serial number string, if the device reports one.
    pub serial_number: Option<String>,
    /// Product string, if the device reports one.
    pub product: Option<String>,
}

/// An attached HIDI2C bridge, not yet opened.
pub struct HidBridge {
    api: Arc<HidApi>,
    info: BridgeInfo,
}

impl HidBridge {
    /// Identity of this bridge.
    pub fn info(&self) -> &BridgeInfo {
        &self.info
    }

    /// Find the first attached bridge with the given IDs.
    pub fn first(vid: u16, pid: u16) -> Result<HidBridge, Error> {
        find_bridges(vid, pid)?
            .into_iter()
            .next()
            .ok_or(Error::DeviceNotFound { vid, pid })
    }
}

/// Enumerate all attached bridges with the given vendor/product IDs.
pub fn find_bridges(vid: u16, pid: u16) -> Result<Vec<HidBridge>, Error> {
    let api = Arc::new(HidApi::new()?);
    let bridges = api
        .device_list()
        .filter(|dev| dev.vendor_id() == vid && dev.product_id() == pid)
        .map(|dev| HidBridge {
            api: Arc::clone(&api),
            info: BridgeInfo {
                vid: dev.vendor_id(),
                pid: dev.product_id(),
                path: dev.path().to_owned(),
                serial_number: dev.serial_number().map(str::to_owned),
                product: dev.product_string().map(str::to_owned),
            },
        })
        .collect::<Vec<_>>();
    debug!(
        "found {} bridge(s) with VID=0x{:04X} PID=0x{:04X}",
        bridges.len(),
        vid,
        pid
    );
    Ok(bridges)
}

impl Bridge for HidBridge {
    type Stream = HidStream;

    fn open(&self, timeout: Duration) -> Result<Option<HidStream>, TransportError> {
        let mut held = open_paths().lock().unwrap_or_else(|e| e.into_inner());
        if held.contains(&self.info.path) {
            return Ok(None);
        }
        let device = self.api.open_path(&self.info.path)?;
        held.insert(self.info.path.clone());
        Ok(Some(HidStream {
            device,
            path: self.info.path.clone(),
            timeout,
        }))
    }
}

/// An open report stream to a bridge. Dropping it releases the device for
/// the next open.
pub struct HidStream {
    device: HidDevice,
    path: CString,
    timeout: Duration,
}

impl Transport for HidStream {
    fn send_report(&mut self, report: &[u8]) -> Result<(), TransportError> {
        self.device.write(report)?;
        Ok(())
    }

    fn recv_report(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut buf = [0u8; REPORT_BUF_LEN];
        let millis = i32::try_from(self.timeout.as_millis()).unwrap_or(i32::MAX);
        // hidapi reports an expired timeout as a zero-length read
        let received = self.device.read_timeout(&mut buf, millis)?;
        if received == 0 {
            return Err(TransportError::Timeout);
        }
        Ok(buf[..received].to_vec())
    }
}

impl Drop for HidStream {
    fn drop(&mut self) {
        let mut held = open_paths().lock().unwrap_or_else(|e| e.into_inner());
        held.remove(&self.path);
    }
}
