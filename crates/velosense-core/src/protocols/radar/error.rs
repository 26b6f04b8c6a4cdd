use thiserror::Error;

/// Errors returned by radar frame decoding.
///
/// # Examples
/// ```
/// use velosense_core::protocols::radar::RadarError;
///
/// let err = RadarError::FrameTooShort { needed: 19, actual: 10 };
/// assert!(err.to_string().contains("radar frame too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RadarError {
    #[error("radar frame too short: need {needed} bytes, got {actual}")]
    FrameTooShort { needed: usize, actual: usize },
}
