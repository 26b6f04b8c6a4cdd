use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use log::{LevelFilter, info};
use velosense_core::sink::{CsvSink, JsonLinesSink, Sink};
use velosense_core::source::{HexLineSource, ReaderByteSource};
use velosense_core::{
    DEFAULT_BAUD_RATE, DEFAULT_FREQUENCY_HZ, LidarConfig, RadarConfig, SessionSummary,
    SystemClock, run_lidar, run_radar,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("VELOSENSE_BUILD_COMMIT"),
    ", ",
    env!("VELOSENSE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "velosense")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode bicycle radar notifications and LIDAR serial streams into measurements.",
    long_about = None,
    after_help = "Examples:\n  velosense radar replay notifications.hex -o radar.csv\n  velosense lidar read /dev/ttyUSB0 --frequency 5 --stdout\n  velosense lidar read capture.bin -o lidar.jsonl --format jsonl"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// BLE rear-view radar target notifications.
    Radar {
        #[command(subcommand)]
        command: RadarCommands,
    },
    /// Serial TF-series LIDAR frames.
    Lidar {
        #[command(subcommand)]
        command: LidarCommands,
    },
}

#[derive(Subcommand, Debug)]
enum RadarCommands {
    /// Decode a capture of notification payloads (one hex line per notification).
    Replay {
        /// Path to a hex capture file (glob patterns must match one file)
        input: PathBuf,

        /// Radar MAC address (reported when missing)
        #[arg(long, default_value = "")]
        address: String,

        /// Notification characteristic UUID (reported when missing)
        #[arg(long, default_value = "")]
        char_uuid: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand, Debug)]
enum LidarCommands {
    /// Read a LIDAR byte stream from a capture file or a configured serial device.
    Read {
        /// Capture file or serial device path
        port: PathBuf,

        /// Maximum measurements per second
        #[arg(long, default_value_t = DEFAULT_FREQUENCY_HZ)]
        frequency: f64,

        /// Baud rate the port was configured with
        #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
        baud: u32,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output path for measurements
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write measurements to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Write the session summary (JSON) to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if frames were rejected or the source failed
    #[arg(long)]
    strict: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Csv,
    Jsonl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Radar { command } => match command {
            RadarCommands::Replay {
                input,
                address,
                char_uuid,
                output,
            } => cmd_radar_replay(input, RadarConfig::new(address, char_uuid), output),
        },
        Commands::Lidar { command } => match command {
            LidarCommands::Read {
                port,
                frequency,
                baud,
                output,
            } => cmd_lidar_read(port, frequency, baud, output),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_radar_replay(
    input: PathBuf,
    config: RadarConfig,
    output: OutputArgs,
) -> Result<(), CliError> {
    let input = resolve_input_path(&input, "a .hex capture")?;
    validate_input_file(&input, "use a hex capture with one notification per line")?;
    let mut sink = open_sink(&output, &input)?;

    let source = HexLineSource::open(&input)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;
    info!("replaying radar notifications from {}", input.display());
    let summary = run_radar(&config, source, sink.as_mut(), &SystemClock)
        .context("radar decoding failed")?;
    finish(&summary, &output)
}

fn cmd_lidar_read(
    port: PathBuf,
    frequency: f64,
    baud: u32,
    output: OutputArgs,
) -> Result<(), CliError> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(CliError::new(
            format!("invalid frequency: {}", frequency),
            Some("use a positive number of measurements per second".to_string()),
        ));
    }
    let port = resolve_input_path(&port, "a capture file or serial device")?;
    if !port.exists() {
        return Err(CliError::new(
            format!("port not found: {}", port.display()),
            Some("check the device path or capture file".to_string()),
        ));
    }
    let mut sink = open_sink(&output, &port)?;

    let source = ReaderByteSource::open(&port)
        .with_context(|| format!("Failed to open port: {}", port.display()))?;
    let config = LidarConfig {
        port,
        baud_rate: baud,
        frequency_hz: frequency,
    };
    let summary = run_lidar(&config, source, sink.as_mut(), &SystemClock)
        .context("LIDAR decoding failed")?;
    finish(&summary, &output)
}

fn open_sink(output: &OutputArgs, input: &Path) -> Result<Box<dyn Sink>, CliError> {
    let writer: Box<dyn Write> = if output.stdout {
        Box::new(io::stdout().lock())
    } else {
        let path = output.output.as_ref().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?;
        ensure_distinct(path, input)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create output: {}", path.display()))?;
        Box::new(BufWriter::new(file))
    };

    Ok(match output.format {
        Format::Csv => Box::new(CsvSink::new(writer)),
        Format::Jsonl => Box::new(JsonLinesSink::new(writer)),
    })
}

fn finish(summary: &SessionSummary, output: &OutputArgs) -> Result<(), CliError> {
    if let Some(path) = output.summary.as_ref() {
        let json = serde_json::to_string_pretty(summary).context("JSON serialization failed")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    }

    if !output.quiet {
        let target = match output.output.as_ref() {
            Some(path) if !output.stdout => path.display().to_string(),
            _ => "stdout".to_string(),
        };
        eprintln!(
            "OK: {} {} measurements written -> {} ({} rejected)",
            summary.frames_emitted, summary.sensor, target, summary.frames_rejected
        );
        if let Some(err) = summary.transport_error.as_ref() {
            eprintln!("warning: source stopped early: {}", err);
        }
    }

    if output.strict && !summary.is_clean() {
        return Err(CliError::new(
            format!(
                "{} frames rejected{}",
                summary.frames_rejected,
                if summary.transport_error.is_some() {
                    " and the source failed"
                } else {
                    ""
                }
            ),
            Some("rerun without --strict or inspect with -v".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct(output: &Path, input: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // A missing parent directory cannot contain the input.
    let Ok(output_dir) = output_dir else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path"))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path, hint: &str) -> Result<(), CliError> {
    let meta = fs::metadata(input).map_err(|_| {
        CliError::new(
            format!("input file not found: {}", input.display()),
            Some(hint.to_string()),
        )
    })?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some(hint.to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path, expected: &str) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some(format!(
                "check the path or quote the pattern; expected {}",
                expected
            )),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single input, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
