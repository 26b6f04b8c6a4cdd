use serde::{Deserialize, Serialize};

use super::error::RadarError;
use super::layout;
use super::reader::RadarReader;
use crate::protocols::common::{binary_repr, decode_fixed_point};

/// One decoded target slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarTarget {
    /// Info byte with the reserved low bits cleared.
    pub id: u8,
    /// Raw range byte; units are assigned downstream.
    pub range: u8,
    /// Q6.2 decoded speed.
    pub speed: f64,
    /// Raw speed byte as an 8-character binary string.
    pub speed_binary_repr: String,
}

impl RadarTarget {
    fn decode([info, range, speed]: [u8; layout::TARGET_SIZE]) -> Self {
        Self {
            id: info & layout::TARGET_ID_MASK,
            range,
            speed: decode_fixed_point(speed),
            speed_binary_repr: binary_repr(speed),
        }
    }
}

/// The six target slots of a notification, in slot order.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarFrame {
    pub targets: [RadarTarget; layout::TARGET_COUNT],
}

/// Decode one radar notification payload.
///
/// The flags byte is skipped and bytes past the sixth slot are ignored.
///
/// # Examples
/// ```
/// use velosense_core::protocols::radar::parse_radar_frame;
///
/// let mut payload = [0u8; 19];
/// payload[1..4].copy_from_slice(&[0b1101_0101, 10, 0b0000_0111]);
/// let frame = parse_radar_frame(&payload)?;
/// assert_eq!(frame.targets[0].id, 0b1101_0100);
/// assert_eq!(frame.targets[0].speed, 1.75);
/// # Ok::<(), velosense_core::protocols::radar::RadarError>(())
/// ```
///
/// # Errors
/// Returns `RadarError::FrameTooShort` when the payload cannot hold all six
/// slots.
pub fn parse_radar_frame(payload: &[u8]) -> Result<RadarFrame, RadarError> {
    let reader = RadarReader::new(payload);
    reader.require_len(layout::MIN_LEN)?;

    let mut slots = [[0u8; layout::TARGET_SIZE]; layout::TARGET_COUNT];
    for (slot, bytes) in slots.iter_mut().enumerate() {
        *bytes = reader.read_target(slot)?;
    }

    Ok(RadarFrame {
        targets: slots.map(RadarTarget::decode),
    })
}
