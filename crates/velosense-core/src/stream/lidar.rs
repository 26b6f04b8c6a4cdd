use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::gate::RateGate;
use super::window::RollingByteWindow;
use crate::config::{ConfigError, LidarConfig};
use crate::protocols::lidar::{LidarError, LidarFrame, layout, parse_lidar_frame};

/// Counters kept by a synchronizer over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    /// Bytes pushed into the window.
    pub bytes: u64,
    /// Windows that passed sync and checksum validation.
    pub frames_valid: u64,
    /// Valid frames let through by the rate gate.
    pub frames_emitted: u64,
    /// Valid frames dropped by the rate gate.
    pub frames_suppressed: u64,
    /// Sync matches whose checksum did not hold.
    pub checksum_mismatches: u64,
}

/// Locates LIDAR frames in a serial byte stream.
///
/// Every byte shifts the nine-byte window by one and the whole window is
/// re-evaluated. There is no locked state: a dropped or duplicated byte is
/// recovered from within one frame length, and the tail of a valid frame
/// stays available for the next match.
#[derive(Debug, Clone)]
pub struct LidarFrameSynchronizer {
    window: RollingByteWindow<{ layout::FRAME_LEN }>,
    gate: RateGate,
    stats: SyncStats,
}

impl LidarFrameSynchronizer {
    pub fn new(minimum_interval: Duration) -> Self {
        Self {
            window: RollingByteWindow::new(),
            gate: RateGate::new(minimum_interval),
            stats: SyncStats::default(),
        }
    }

    pub fn from_config(config: &LidarConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.minimum_interval()?))
    }

    /// Feed one byte received at `now`.
    ///
    /// Returns a frame only when the window holds a valid frame and the rate
    /// gate allows an emission.
    ///
    /// # Examples
    /// ```
    /// use std::time::{Duration, Instant};
    /// use velosense_core::protocols::lidar::{LidarFrame, encode_lidar_frame};
    /// use velosense_core::stream::LidarFrameSynchronizer;
    ///
    /// let frame = LidarFrame { distance: 250, strength: 1200, temperature: 2300 };
    /// let mut sync = LidarFrameSynchronizer::new(Duration::from_secs(1));
    /// let now = Instant::now();
    /// let emitted: Vec<_> = encode_lidar_frame(&frame)
    ///     .iter()
    ///     .filter_map(|byte| sync.push(*byte, now))
    ///     .collect();
    /// assert_eq!(emitted, vec![frame]);
    /// ```
    pub fn push(&mut self, byte: u8, now: Instant) -> Option<LidarFrame> {
        self.window.push(byte);
        self.stats.bytes += 1;
        if !self.window.is_full() {
            return None;
        }

        let frame = match parse_lidar_frame(self.window.as_slice()) {
            Ok(Some(frame)) => frame,
            Ok(None) => return None,
            Err(LidarError::ChecksumMismatch { .. }) => {
                self.stats.checksum_mismatches += 1;
                return None;
            }
            Err(LidarError::LengthMismatch { .. }) => return None,
        };

        self.stats.frames_valid += 1;
        if self.gate.try_emit(now) {
            self.stats.frames_emitted += 1;
            Some(frame)
        } else {
            self.stats.frames_suppressed += 1;
            None
        }
    }

    /// Feed a chunk of bytes that all arrived at `now`.
    pub fn push_slice(&mut self, bytes: &[u8], now: Instant) -> Vec<LidarFrame> {
        bytes
            .iter()
            .filter_map(|byte| self.push(*byte, now))
            .collect()
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    pub fn gate(&self) -> &RateGate {
        &self.gate
    }

    /// Drop buffered bytes, e.g. after the transport reconnects. The gate
    /// keeps its last emission.
    pub fn reset(&mut self) {
        self.window.clear();
    }
}
