//! Responses received from the bridge.

use log::trace;

use crate::constants::*;
use crate::error::FrameError;
use crate::status::Status;

/// A decoded response frame.
///
/// Every response carries a status; read-family responses additionally
/// carry a payload when the status is ok. The caller knows which request
/// it sent, so it picks [`Response::decode`] or [`Response::decode_read`]
/// accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Classified status byte.
    pub status: Status,
    /// Payload of a successful read-family response.
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Decode a response that carries no payload (write, reset, set-speed).
    pub fn decode(raw: &[u8]) -> Result<Response, FrameError> {
        let status = status_of(raw)?;
        Ok(Response {
            status,
            payload: None,
        })
    }

    /// Decode a read-family response. When the status is ok, byte 2 holds
    /// the payload length and the payload follows; a declared length past
    /// the end of the frame is a malformed response.
    pub fn decode_read(raw: &[u8]) -> Result<Response, FrameError> {
        let status = status_of(raw)?;
        if !status.is_ok() {
            return Ok(Response {
                status,
                payload: None,
            });
        }

        if raw.len() < RESPONSE_PAYLOAD_OFFSET {
            return Err(FrameError::ResponseTooShort {
                expected: RESPONSE_PAYLOAD_OFFSET,
                actual: raw.len(),
            });
        }
        let declared = usize::from(raw[RESPONSE_LENGTH_OFFSET]);
        let available = raw.len() - RESPONSE_PAYLOAD_OFFSET;
        if declared > available {
            return Err(FrameError::PayloadTruncated {
                declared,
                available,
            });
        }

        trace!("read response: {} payload bytes", declared);
        let payload = raw[RESPONSE_PAYLOAD_OFFSET..RESPONSE_PAYLOAD_OFFSET + declared].to_vec();
        Ok(Response {
            status,
            payload: Some(payload),
        })
    }
}

fn status_of(raw: &[u8]) -> Result<Status, FrameError> {
    if raw.len() < RESPONSE_MIN_LEN {
        return Err(FrameError::ResponseTooShort {
            expected: RESPONSE_MIN_LEN,
            actual: raw.len(),
        });
    }
    Ok(Status::classify(raw[RESPONSE_STATUS_OFFSET]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::HwFault;

    #[test]
    fn decodes_status_only_response() {
        let resp = Response::decode(&[0x00, 0x00]).unwrap();
        assert_eq!(resp.status, Status::Ok);
        assert_eq!(resp.payload, None);
    }

    #[test]
    fn decodes_read_payload() {
        let resp = Response::decode_read(&[0x00, 0x00, 3, 0x11, 0x22, 0x33]).unwrap();
        assert_eq!(resp.status, Status::Ok);
        assert_eq!(resp.payload, Some(vec![0x11, 0x22, 0x33]));
    }

    #[test]
    fn read_payload_may_be_followed_by_report_padding() {
        // HID reports are fixed-size; trailing pad bytes are not payload
        let resp = Response::decode_read(&[0x00, 0x00, 2, 0xAA, 0xBB, 0x00, 0x00]).unwrap();
        assert_eq!(resp.payload, Some(vec![0xAA, 0xBB]));
    }

    #[test]
    fn truncated_payload_is_malformed() {
        let err = Response::decode_read(&[0x00, 0x00, 5, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            FrameError::PayloadTruncated {
                declared: 5,
                available: 2
            }
        );
    }

    #[test]
    fn short_frames_are_malformed() {
        assert_eq!(
            Response::decode(&[0x00]),
            Err(FrameError::ResponseTooShort {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            Response::decode(&[]),
            Err(FrameError::ResponseTooShort {
                expected: 2,
                actual: 0
            })
        );
        // ok status but no room for the length byte
        assert_eq!(
            Response::decode_read(&[0x00, 0x00]),
            Err(FrameError::ResponseTooShort {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn failed_read_carries_no_payload() {
        let resp = Response::decode_read(&[0x00, 0xC4, 0xFF, 0xFF]).unwrap();
        assert_eq!(resp.status, Status::NoAcknowledge);
        assert_eq!(resp.payload, None);

        let resp = Response::decode_read(&[0x00, 0xDF]).unwrap();
        assert_eq!(resp.status, Status::Hardware(HwFault::UNKNOWN));
    }

    #[test]
    fn simulated_read_round_trip() {
        let payload = [0x01, 0x02, 0x03, 0x04];
        let mut frame = vec![0x00, 0x00, payload.len() as u8];
        frame.extend_from_slice(&payload);
        let resp = Response::decode_read(&frame).unwrap();
        assert_eq!(resp.payload.as_deref(), Some(&payload[..]));
    }
}
