use std::time::{Duration, Instant};

use crate::config::{ConfigError, minimum_interval};

/// Suppresses emissions that follow the previous one too closely.
///
/// Only emissions move the gate forward; suppressed candidates leave it
/// untouched, so the next emission is measured from the last one that went
/// out.
///
/// # Examples
/// ```
/// use std::time::{Duration, Instant};
/// use velosense_core::stream::RateGate;
///
/// let mut gate = RateGate::new(Duration::from_millis(500));
/// let start = Instant::now();
/// assert!(gate.try_emit(start));
/// assert!(!gate.try_emit(start + Duration::from_millis(100)));
/// assert!(gate.try_emit(start + Duration::from_millis(500)));
/// ```
#[derive(Debug, Clone)]
pub struct RateGate {
    minimum_interval: Duration,
    last_emission: Option<Instant>,
}

impl RateGate {
    pub fn new(minimum_interval: Duration) -> Self {
        Self {
            minimum_interval,
            last_emission: None,
        }
    }

    pub fn from_frequency(frequency_hz: f64) -> Result<Self, ConfigError> {
        Ok(Self::new(minimum_interval(frequency_hz)?))
    }

    pub fn minimum_interval(&self) -> Duration {
        self.minimum_interval
    }

    pub fn last_emission(&self) -> Option<Instant> {
        self.last_emission
    }

    pub fn should_emit(&self, now: Instant) -> bool {
        match self.last_emission {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.minimum_interval,
        }
    }

    pub fn record_emission(&mut self, now: Instant) {
        self.last_emission = Some(now);
    }

    /// `should_emit` followed by `record_emission` when allowed.
    pub fn try_emit(&mut self, now: Instant) -> bool {
        if !self.should_emit(now) {
            return false;
        }
        self.record_emission(now);
        true
    }
}
