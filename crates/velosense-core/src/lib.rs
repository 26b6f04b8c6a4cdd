//! velosense core library: decoders for bicycle sensor byte streams.
//!
//! Two sensors are supported. A BLE rear-view radar delivers one notification
//! per update, decoded into six target slots. A serial TF-series LIDAR
//! streams nine-byte frames with no framing besides two sync bytes and a
//! checksum; the synchronizer finds them byte by byte and throttles output
//! to a configured rate.
//!
//! The crate is layered like a pipeline: `source` yields bytes, `protocols`
//! decode them without I/O, `stream` keeps the little state the LIDAR needs,
//! `session` drives a source into a `sink` and stamps every record.
//!
//! Invariants:
//! - Radar frames always decode into exactly six targets, or fail with
//!   `FrameTooShort`; short payloads are never zero-filled.
//! - The LIDAR window advances exactly one byte per input byte.
//! - Checksum failures are counted, never reported individually.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use velosense_core::sink::CsvSink;
//! use velosense_core::source::HexLineSource;
//! use velosense_core::{RadarConfig, SystemClock, run_radar};
//!
//! let source = HexLineSource::open(Path::new("radar.hex"))?;
//! let mut sink = CsvSink::new(std::io::stdout());
//! let summary = run_radar(&RadarConfig::default(), source, &mut sink, &SystemClock)?;
//! eprintln!("{} frames written", summary.frames_emitted);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

mod clock;
mod config;
pub mod protocols;
mod session;
pub mod sink;
pub mod source;
pub mod stream;

pub use clock::{Clock, StepClock, SystemClock, Tick};
pub use config::{
    ConfigError, DEFAULT_BAUD_RATE, DEFAULT_FREQUENCY_HZ, LidarConfig, RadarConfig,
    minimum_interval,
};
pub use session::{SessionError, run_lidar, run_radar};

use protocols::lidar::LidarFrame;
use protocols::radar::RadarTarget;
use protocols::radar::layout::TARGET_COUNT;

/// CSV header for radar measurements.
pub const RADAR_FIELDS: [&str; 6] = [
    "time",
    "unix_time",
    "target_ids",
    "target_ranges",
    "target_speeds",
    "bin_target_speeds",
];

/// CSV header for LIDAR measurements.
pub const LIDAR_FIELDS: [&str; 5] = ["time", "unix_time", "distance", "strength", "temperature"];

/// Rendering used when a wall-clock time cannot be formatted.
pub const DEFAULT_STAMP: &str = "1970-01-01 00:00:00.000000";

const STAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// Wall-clock time of a measurement in its two renderings.
///
/// # Examples
/// ```
/// use time::OffsetDateTime;
/// use velosense_core::Stamp;
///
/// let stamp = Stamp::from_datetime(OffsetDateTime::UNIX_EPOCH);
/// assert_eq!(stamp.time, "1970-01-01 00:00:00.000000");
/// assert_eq!(stamp.unix_time, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    /// `YYYY-MM-DD HH:MM:SS.ffffff`.
    pub time: String,
    /// Seconds since the Unix epoch.
    pub unix_time: f64,
}

impl Stamp {
    pub fn from_datetime(wall: OffsetDateTime) -> Self {
        Self {
            time: wall
                .format(STAMP_FORMAT)
                .unwrap_or_else(|_| DEFAULT_STAMP.to_string()),
            unix_time: wall.unix_timestamp_nanos() as f64 / 1e9,
        }
    }
}

/// A decoded radar notification ready for a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarMeasurement {
    #[serde(flatten)]
    pub stamp: Stamp,
    pub targets: [RadarTarget; TARGET_COUNT],
}

/// A gate-approved LIDAR frame ready for a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LidarMeasurement {
    #[serde(flatten)]
    pub stamp: Stamp,
    #[serde(flatten)]
    pub frame: LidarFrame,
}

/// Record handed to `Sink::write_measurement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sensor", rename_all = "lowercase")]
pub enum Measurement {
    Radar(RadarMeasurement),
    Lidar(LidarMeasurement),
}

impl Measurement {
    pub fn stamp(&self) -> &Stamp {
        match self {
            Measurement::Radar(radar) => &radar.stamp,
            Measurement::Lidar(lidar) => &lidar.stamp,
        }
    }

    /// Cell values in the order of `RADAR_FIELDS` / `LIDAR_FIELDS`.
    ///
    /// Per-target columns hold six space-separated values in slot order.
    ///
    /// # Examples
    /// ```
    /// use time::OffsetDateTime;
    /// use velosense_core::protocols::lidar::LidarFrame;
    /// use velosense_core::{LidarMeasurement, Measurement, Stamp};
    ///
    /// let measurement = Measurement::Lidar(LidarMeasurement {
    ///     stamp: Stamp::from_datetime(OffsetDateTime::UNIX_EPOCH),
    ///     frame: LidarFrame { distance: 120, strength: 900, temperature: 2500 },
    /// });
    /// assert_eq!(
    ///     measurement.fields(),
    ///     ["1970-01-01 00:00:00.000000", "0.000000", "120", "900", "2500"]
    /// );
    /// ```
    pub fn fields(&self) -> Vec<String> {
        let stamp = self.stamp();
        let mut fields = vec![stamp.time.clone(), format!("{:.6}", stamp.unix_time)];
        match self {
            Measurement::Radar(radar) => {
                let targets = &radar.targets;
                fields.push(join(targets.iter().map(|t| t.id.to_string())));
                fields.push(join(targets.iter().map(|t| t.range.to_string())));
                fields.push(join(targets.iter().map(|t| format!("{:.2}", t.speed))));
                fields.push(join(targets.iter().map(|t| t.speed_binary_repr.clone())));
            }
            Measurement::Lidar(lidar) => {
                fields.push(lidar.frame.distance.to_string());
                fields.push(lidar.frame.strength.to_string());
                fields.push(lidar.frame.temperature.to_string());
            }
        }
        fields
    }
}

fn join(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(" ")
}

/// Outcome counters of one session run.
///
/// # Examples
/// ```
/// use velosense_core::SessionSummary;
///
/// let summary = SessionSummary::new("lidar");
/// assert_eq!(summary.frames_emitted, 0);
/// assert!(summary.transport_error.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Sensor name (`radar` or `lidar`).
    pub sensor: String,
    /// Notifications (radar) or bytes (LIDAR) consumed.
    pub inputs_total: u64,
    /// Frames that decoded successfully.
    pub frames_valid: u64,
    /// Measurements written to the sink.
    pub frames_emitted: u64,
    /// Valid frames dropped by the rate gate.
    pub frames_suppressed: u64,
    /// Short radar payloads or LIDAR checksum mismatches.
    pub frames_rejected: u64,
    /// Transport failure that ended the run early, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_error: Option<String>,
}

impl SessionSummary {
    pub fn new(sensor: &str) -> Self {
        Self {
            sensor: sensor.to_string(),
            ..Self::default()
        }
    }

    /// True when every input decoded and the stream ended normally.
    pub fn is_clean(&self) -> bool {
        self.frames_rejected == 0 && self.transport_error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn target(id: u8, range: u8, speed: f64, bits: &str) -> RadarTarget {
        RadarTarget {
            id,
            range,
            speed,
            speed_binary_repr: bits.to_string(),
        }
    }

    #[test]
    fn stamp_renders_microseconds() {
        let wall = OffsetDateTime::UNIX_EPOCH + std::time::Duration::from_micros(1_500_250);
        let stamp = Stamp::from_datetime(wall);
        assert_eq!(stamp.time, "1970-01-01 00:00:01.500250");
        assert!((stamp.unix_time - 1.50025).abs() < 1e-9);
    }

    #[test]
    fn radar_fields_follow_header_order() {
        let mut targets: [RadarTarget; TARGET_COUNT] =
            std::array::from_fn(|_| target(0, 0, 0.0, "00000000"));
        targets[0] = target(212, 10, 1.75, "00000111");
        let measurement = Measurement::Radar(RadarMeasurement {
            stamp: Stamp::from_datetime(OffsetDateTime::UNIX_EPOCH),
            targets,
        });

        let fields = measurement.fields();
        assert_eq!(fields.len(), RADAR_FIELDS.len());
        assert_eq!(fields[2], "212 0 0 0 0 0");
        assert_eq!(fields[3], "10 0 0 0 0 0");
        assert_eq!(fields[4], "1.75 0.00 0.00 0.00 0.00 0.00");
        assert_eq!(
            fields[5],
            "00000111 00000000 00000000 00000000 00000000 00000000"
        );
    }

    #[test]
    fn measurement_json_is_tagged_and_flat() {
        let measurement = Measurement::Lidar(LidarMeasurement {
            stamp: Stamp::from_datetime(OffsetDateTime::UNIX_EPOCH),
            frame: LidarFrame {
                distance: 1,
                strength: 2,
                temperature: 3,
            },
        });
        let value = serde_json::to_value(&measurement).expect("measurement json");
        assert_eq!(value["sensor"], "lidar");
        assert_eq!(value["distance"], 1);
        assert_eq!(value["time"], "1970-01-01 00:00:00.000000");
    }

    #[test]
    fn summary_omits_transport_error_when_none() {
        let summary = SessionSummary::new("radar");
        let value = serde_json::to_value(&summary).expect("summary json");
        assert!(value.get("transport_error").is_none());
        assert!(summary.is_clean());
    }
}
