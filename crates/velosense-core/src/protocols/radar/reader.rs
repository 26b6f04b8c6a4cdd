use super::error::RadarError;
use super::layout;

pub struct RadarReader<'a> {
    payload: &'a [u8],
}

impl<'a> RadarReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), RadarError> {
        if self.payload.len() < needed {
            return Err(RadarError::FrameTooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], RadarError> {
        self.payload
            .get(range.clone())
            .ok_or(RadarError::FrameTooShort {
                needed: range.end,
                actual: self.payload.len(),
            })
    }

    /// Read the `(info, range, speed)` triple of a target slot.
    pub fn read_target(&self, slot: usize) -> Result<[u8; layout::TARGET_SIZE], RadarError> {
        let bytes = self.read_slice(layout::target_range(slot))?;
        Ok([
            bytes[layout::INFO_OFFSET],
            bytes[layout::RANGE_OFFSET],
            bytes[layout::SPEED_OFFSET],
        ])
    }
}
