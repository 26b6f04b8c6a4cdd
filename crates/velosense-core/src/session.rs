use log::{debug, info, warn};
use thiserror::Error;

use crate::clock::Clock;
use crate::config::{ConfigError, LidarConfig, RadarConfig};
use crate::protocols::radar::parse_radar_frame;
use crate::sink::{Sink, SinkError, SinkMessage};
use crate::source::{ByteSource, NotificationSource, SourceError};
use crate::stream::LidarFrameSynchronizer;
use crate::{
    LIDAR_FIELDS, LidarMeasurement, Measurement, RADAR_FIELDS, RadarMeasurement, SessionSummary,
    Stamp,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Decode every notification from `source` into `sink`.
///
/// Short payloads are reported through `send_msg` and skipped. A transport
/// failure ends the run after everything already received was handled.
/// `sink.shutdown()` is called on every path, also when the sink itself
/// failed; the first error is returned.
pub fn run_radar<S, K, C>(
    config: &RadarConfig,
    source: S,
    sink: &mut K,
    clock: &C,
) -> Result<SessionSummary, SessionError>
where
    S: NotificationSource,
    K: Sink + ?Sized,
    C: Clock + ?Sized,
{
    let mut summary = SessionSummary::new("radar");
    let outcome = decode_radar(config, source, sink, clock, &mut summary);
    finish(sink, outcome)?;
    info!(
        "radar session done: {} notifications, {} written, {} rejected",
        summary.inputs_total, summary.frames_emitted, summary.frames_rejected
    );
    Ok(summary)
}

fn decode_radar<S, K, C>(
    config: &RadarConfig,
    mut source: S,
    sink: &mut K,
    clock: &C,
    summary: &mut SessionSummary,
) -> Result<(), SessionError>
where
    S: NotificationSource,
    K: Sink + ?Sized,
    C: Clock + ?Sized,
{
    sink.write_header(&RADAR_FIELDS)?;

    if let Err(err) = config.validate() {
        warn!("radar configuration incomplete: {err}");
        sink.send_msg(&SinkMessage::error(format!(
            "radar MAC address or characteristic UUID not configured: {err}"
        )))?;
    }

    loop {
        let payload = match source.next_notification() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Ok(()),
            Err(err) => return Ok(report_transport_failure(summary, sink, &err)?),
        };
        summary.inputs_total += 1;
        let tick = clock.now();

        match parse_radar_frame(&payload) {
            Ok(frame) => {
                summary.frames_valid += 1;
                let measurement = Measurement::Radar(RadarMeasurement {
                    stamp: Stamp::from_datetime(tick.wall),
                    targets: frame.targets,
                });
                debug!(
                    "radar {}: ranges {}",
                    measurement.stamp().time,
                    measurement.fields()[3]
                );
                sink.write_measurement(&measurement)?;
                summary.frames_emitted += 1;
            }
            Err(err) => {
                summary.frames_rejected += 1;
                let message = format!("notification {}: {err}", summary.inputs_total);
                warn!("{message}");
                sink.send_msg(&SinkMessage::warning(message))?;
            }
        }
    }
}

/// Synchronize the LIDAR byte stream from `source` and write gate-approved
/// frames into `sink`.
///
/// `sink.shutdown()` is called on every path, including a rejected
/// configuration.
///
/// # Errors
/// `SessionError::Config` when the measurement frequency is unusable;
/// `SessionError::Sink` when the sink fails.
pub fn run_lidar<S, K, C>(
    config: &LidarConfig,
    source: S,
    sink: &mut K,
    clock: &C,
) -> Result<SessionSummary, SessionError>
where
    S: ByteSource,
    K: Sink + ?Sized,
    C: Clock + ?Sized,
{
    let mut summary = SessionSummary::new("lidar");
    let outcome = decode_lidar(config, source, sink, clock, &mut summary);
    finish(sink, outcome)?;
    info!(
        "lidar session done: {} bytes, {} valid frames, {} written, {} checksum mismatches",
        summary.inputs_total,
        summary.frames_valid,
        summary.frames_emitted,
        summary.frames_rejected
    );
    Ok(summary)
}

fn decode_lidar<S, K, C>(
    config: &LidarConfig,
    mut source: S,
    sink: &mut K,
    clock: &C,
    summary: &mut SessionSummary,
) -> Result<(), SessionError>
where
    S: ByteSource,
    K: Sink + ?Sized,
    C: Clock + ?Sized,
{
    let mut sync = LidarFrameSynchronizer::from_config(config)?;
    sink.write_header(&LIDAR_FIELDS)?;
    info!(
        "reading LIDAR frames from {} ({} baud) at up to {} Hz",
        config.port.display(),
        config.baud_rate,
        config.frequency_hz
    );

    let outcome = loop {
        let byte = match source.next_byte() {
            Ok(Some(byte)) => byte,
            Ok(None) => break Ok(()),
            Err(err) => break report_transport_failure(summary, sink, &err),
        };
        let tick = clock.now();
        if let Some(frame) = sync.push(byte, tick.instant) {
            let measurement = Measurement::Lidar(LidarMeasurement {
                stamp: Stamp::from_datetime(tick.wall),
                frame,
            });
            if let Err(err) = sink.write_measurement(&measurement) {
                break Err(err);
            }
        }
    };

    let stats = sync.stats();
    summary.inputs_total = stats.bytes;
    summary.frames_valid = stats.frames_valid;
    summary.frames_emitted = stats.frames_emitted;
    summary.frames_suppressed = stats.frames_suppressed;
    summary.frames_rejected = stats.checksum_mismatches;
    Ok(outcome?)
}

/// Shut the sink down, then surface the run's error ahead of a shutdown error.
fn finish<K: Sink + ?Sized>(
    sink: &mut K,
    outcome: Result<(), SessionError>,
) -> Result<(), SessionError> {
    let closed = sink.shutdown();
    if let Err(err) = &outcome {
        warn!("session aborted: {err}");
    }
    outcome?;
    Ok(closed?)
}

fn report_transport_failure<K: Sink + ?Sized>(
    summary: &mut SessionSummary,
    sink: &mut K,
    err: &SourceError,
) -> Result<(), SinkError> {
    warn!("{} source stopped: {err}", summary.sensor);
    summary.transport_error = Some(err.to_string());
    sink.send_msg(&SinkMessage::error(format!(
        "{} source stopped: {err}",
        summary.sensor
    )))
}
