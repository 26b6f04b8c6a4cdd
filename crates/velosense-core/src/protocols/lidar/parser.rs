use serde::{Deserialize, Serialize};

use super::error::LidarError;
use super::layout;
use super::reader::LidarReader;

/// Decoded fields of a validated LIDAR frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LidarFrame {
    pub distance: u16,
    pub strength: u16,
    pub temperature: u16,
}

/// Validate and decode one nine-byte window.
///
/// Returns `Ok(None)` when the window does not start with the sync pattern.
///
/// # Examples
/// ```
/// use velosense_core::protocols::lidar::parse_lidar_frame;
///
/// let window = [0x59, 0x59, 0x2c, 0x01, 0x10, 0x00, 0x00, 0x09, 0xf8];
/// let frame = parse_lidar_frame(&window)?.expect("sync present");
/// assert_eq!(frame.distance, 300);
/// # Ok::<(), velosense_core::protocols::lidar::LidarError>(())
/// ```
///
/// # Errors
/// `LidarError::LengthMismatch` when the window is not exactly nine bytes,
/// `LidarError::ChecksumMismatch` when the sync pattern matched but the
/// checksum did not.
pub fn parse_lidar_frame(window: &[u8]) -> Result<Option<LidarFrame>, LidarError> {
    let reader = LidarReader::new(window);
    reader.require_exact_len(layout::FRAME_LEN)?;

    if !reader.has_sync() {
        return Ok(None);
    }
    reader.verify_checksum()?;

    Ok(Some(LidarFrame {
        distance: reader.read_u16_le(layout::DISTANCE_RANGE)?,
        strength: reader.read_u16_le(layout::STRENGTH_RANGE)?,
        temperature: reader.read_u16_le(layout::TEMPERATURE_RANGE)?,
    }))
}

/// Build a valid frame for the given fields. Used by tests and fixtures.
pub fn encode_lidar_frame(frame: &LidarFrame) -> [u8; layout::FRAME_LEN] {
    let mut bytes = [0u8; layout::FRAME_LEN];
    bytes[layout::SYNC_RANGE].fill(layout::SYNC_BYTE);
    bytes[layout::DISTANCE_RANGE].copy_from_slice(&frame.distance.to_le_bytes());
    bytes[layout::STRENGTH_RANGE].copy_from_slice(&frame.strength.to_le_bytes());
    bytes[layout::TEMPERATURE_RANGE].copy_from_slice(&frame.temperature.to_le_bytes());
    bytes[layout::CHECKSUM_OFFSET] =
        crate::protocols::common::checksum_mod256(&bytes[layout::CHECKSUM_COVERAGE]);
    bytes
}
