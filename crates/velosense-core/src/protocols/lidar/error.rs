use thiserror::Error;

/// Errors returned by LIDAR frame validation.
///
/// # Examples
/// ```
/// use velosense_core::protocols::lidar::LidarError;
///
/// let err = LidarError::ChecksumMismatch { expected: 0x10, actual: 0x11 };
/// assert!(err.to_string().contains("checksum mismatch"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LidarError {
    #[error("frame length mismatch: need {needed} bytes, got {actual}")]
    LengthMismatch { needed: usize, actual: usize },
    #[error("checksum mismatch: computed {expected:#04x}, frame carries {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },
}
