use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use time::OffsetDateTime;
use velosense_core::sink::CsvSink;
use velosense_core::source::{HexLineSource, ReaderByteSource};
use velosense_core::{
    LidarConfig, RadarConfig, SessionSummary, StepClock, run_lidar, run_radar,
};

// Keep in sync with tests/golden.rs.
const RADAR_STEP: Duration = Duration::from_millis(100);
const LIDAR_STEP: Duration = Duration::from_millis(50);
const LIDAR_FREQUENCY_HZ: f64 = 2.0;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.join("input.hex").exists() {
            regenerate_radar(&path)?;
        } else if path.join("input.bin").exists() {
            regenerate_lidar(&path)?;
        }
    }

    Ok(())
}

fn regenerate_radar(dir: &Path) -> Result<(), String> {
    let input = dir.join("input.hex");
    let source = HexLineSource::open(&input)
        .map_err(|err| format!("failed to open {}: {}", input.display(), err))?;
    let config = RadarConfig::new("F0:00:00:00:00:01", "6a4e3203-667b-11e3-949a-0800200c9a66");
    let clock = StepClock::new(OffsetDateTime::UNIX_EPOCH, RADAR_STEP);
    let mut sink = CsvSink::new(Vec::new());
    let summary = run_radar(&config, source, &mut sink, &clock)
        .map_err(|err| format!("replay failed for {}: {}", input.display(), err))?;
    write_outputs(dir, &summary, sink.into_inner())
}

fn regenerate_lidar(dir: &Path) -> Result<(), String> {
    let input = dir.join("input.bin");
    let source = ReaderByteSource::open(&input)
        .map_err(|err| format!("failed to open {}: {}", input.display(), err))?;
    let config = LidarConfig {
        port: input.clone(),
        frequency_hz: LIDAR_FREQUENCY_HZ,
        ..LidarConfig::default()
    };
    let clock = StepClock::new(OffsetDateTime::UNIX_EPOCH, LIDAR_STEP);
    let mut sink = CsvSink::new(Vec::new());
    let summary = run_lidar(&config, source, &mut sink, &clock)
        .map_err(|err| format!("replay failed for {}: {}", input.display(), err))?;
    write_outputs(dir, &summary, sink.into_inner())
}

fn write_outputs(dir: &Path, summary: &SessionSummary, csv: Vec<u8>) -> Result<(), String> {
    let json = serde_json::to_string(summary)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    let summary_path = dir.join("expected_summary.json");
    fs::write(&summary_path, json)
        .map_err(|err| format!("failed to write {}: {}", summary_path.display(), err))?;
    let output_path = dir.join("expected_output.csv");
    fs::write(&output_path, csv)
        .map_err(|err| format!("failed to write {}: {}", output_path.display(), err))?;
    Ok(())
}
