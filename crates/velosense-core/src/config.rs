//! Sensor configuration passed to sessions at construction time.
//!
//! Nothing here is read from files: callers fill these structs from their
//! own arguments. Transport-facing fields (address, characteristic, port,
//! baud rate) are carried for the integration layer; the decoders only use
//! the LIDAR measurement frequency.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default LIDAR measurement frequency in Hz.
pub const DEFAULT_FREQUENCY_HZ: f64 = 1.0;
/// Default serial baud rate of TF-series LIDAR units.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid measurement frequency: {value} Hz (must be finite and > 0)")]
    InvalidFrequency { value: f64 },
    #[error("missing configuration value: {field}")]
    MissingField { field: &'static str },
}

/// BLE radar settings used by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadarConfig {
    /// Device MAC address.
    pub address: String,
    /// UUID of the characteristic delivering target notifications.
    pub char_uuid: String,
}

impl RadarConfig {
    pub fn new(address: impl Into<String>, char_uuid: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            char_uuid: char_uuid.into(),
        }
    }

    /// Check that the transport has what it needs to subscribe.
    ///
    /// # Examples
    /// ```
    /// use velosense_core::{ConfigError, RadarConfig};
    ///
    /// let config = RadarConfig::new("", "6a4e3203-667b-11e3-949a-0800200c9a66");
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(ConfigError::MissingField { field: "address" })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "address" });
        }
        if self.char_uuid.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "char_uuid" });
        }
        Ok(())
    }
}

/// Serial LIDAR settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LidarConfig {
    /// Serial device path; the port must already be configured.
    pub port: PathBuf,
    pub baud_rate: u32,
    /// Maximum number of emitted measurements per second.
    pub frequency_hz: f64,
}

impl Default for LidarConfig {
    fn default() -> Self {
        Self {
            port: PathBuf::new(),
            baud_rate: DEFAULT_BAUD_RATE,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
        }
    }
}

impl LidarConfig {
    pub fn minimum_interval(&self) -> Result<Duration, ConfigError> {
        minimum_interval(self.frequency_hz)
    }
}

/// Convert a frequency in Hz into the minimum spacing between emissions.
pub fn minimum_interval(frequency_hz: f64) -> Result<Duration, ConfigError> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(ConfigError::InvalidFrequency {
            value: frequency_hz,
        });
    }
    Duration::try_from_secs_f64(1.0 / frequency_hz).map_err(|_| ConfigError::InvalidFrequency {
        value: frequency_hz,
    })
}
