use super::error::LidarError;
use super::layout;
use crate::protocols::common::checksum_mod256;

pub struct LidarReader<'a> {
    frame: &'a [u8],
}

impl<'a> LidarReader<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self { frame }
    }

    pub fn require_exact_len(&self, needed: usize) -> Result<(), LidarError> {
        if self.frame.len() != needed {
            return Err(LidarError::LengthMismatch {
                needed,
                actual: self.frame.len(),
            });
        }
        Ok(())
    }

    pub fn has_sync(&self) -> bool {
        self.frame
            .get(layout::SYNC_RANGE)
            .is_some_and(|sync| sync.iter().all(|byte| *byte == layout::SYNC_BYTE))
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, LidarError> {
        self.frame.get(offset).copied().ok_or(LidarError::LengthMismatch {
            needed: offset + 1,
            actual: self.frame.len(),
        })
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, LidarError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(LidarError::LengthMismatch {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], LidarError> {
        self.frame.get(range.clone()).ok_or(LidarError::LengthMismatch {
            needed: range.end,
            actual: self.frame.len(),
        })
    }

    /// Compare the carried checksum against the sum of the covered bytes.
    pub fn verify_checksum(&self) -> Result<(), LidarError> {
        let expected = checksum_mod256(self.read_slice(layout::CHECKSUM_COVERAGE)?);
        let actual = self.read_u8(layout::CHECKSUM_OFFSET)?;
        if expected != actual {
            return Err(LidarError::ChecksumMismatch { expected, actual });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LidarReader;
    use crate::protocols::lidar::error::LidarError;

    #[test]
    fn read_u16_le_takes_low_byte_first() {
        let frame = [0x34, 0x12];
        let reader = LidarReader::new(&frame);
        assert_eq!(reader.read_u16_le(0..2).unwrap(), 0x1234);
    }

    #[test]
    fn has_sync_requires_both_bytes() {
        assert!(LidarReader::new(&[0x59, 0x59]).has_sync());
        assert!(!LidarReader::new(&[0x59, 0x58]).has_sync());
        assert!(!LidarReader::new(&[0x59]).has_sync());
    }

    #[test]
    fn exact_len_rejects_long_windows() {
        let frame = [0u8; 10];
        let err = LidarReader::new(&frame).require_exact_len(9).unwrap_err();
        assert_eq!(
            err,
            LidarError::LengthMismatch {
                needed: 9,
                actual: 10
            }
        );
    }
}
