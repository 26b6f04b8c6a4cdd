use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("velosense"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden(case: &str, file: &str) -> std::path::PathBuf {
    repo_root().join("tests").join("golden").join(case).join(file)
}

const RADAR_ARGS: [&str; 4] = [
    "--address",
    "F0:00:00:00:00:01",
    "--char-uuid",
    "6a4e3203-667b-11e3-949a-0800200c9a66",
];

#[test]
fn help_lists_sensor_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("radar").and(contains("lidar")));
    cmd().args(["radar", "replay", "--help"]).assert().success();
    cmd()
        .args(["lidar", "read", "--help"])
        .assert()
        .success()
        .stdout(contains("--frequency"));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.hex");
    let output = temp.path().join("radar.csv");

    cmd()
        .args(["radar", "replay"])
        .arg(missing)
        .arg("-o")
        .arg(output)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn radar_replay_writes_csv() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("out").join("radar.csv");

    cmd()
        .args(["radar", "replay"])
        .arg(golden("radar_basic", "input.hex"))
        .args(RADAR_ARGS)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("OK:").and(contains("1 rejected")));

    let csv = std::fs::read_to_string(&output).expect("read csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "time,unix_time,target_ids,target_ranges,target_speeds,bin_target_speeds"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[2].ends_with(
        ",212 72 0 0 0 0,10 32 0 0 0 0,1.75 3.25 0.00 0.00 0.00 0.00,00000111 00001101 00000000 00000000 00000000 00000000"
    ));
}

#[test]
fn radar_stdout_outputs_json_lines() {
    let assert = cmd()
        .args(["radar", "replay"])
        .arg(golden("radar_basic", "input.hex"))
        .args(RADAR_ARGS)
        .args(["--stdout", "--format", "jsonl", "--quiet"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect();
    assert_eq!(lines[0]["kind"], "header");
    let measurements = lines
        .iter()
        .filter(|line| line["kind"] == "measurement")
        .count();
    assert_eq!(measurements, 2);
}

#[test]
fn stdout_and_output_conflict() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .args(["radar", "replay"])
        .arg(golden("radar_basic", "input.hex"))
        .arg("--stdout")
        .arg("-o")
        .arg(temp.path().join("radar.csv"))
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn output_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.hex");
    std::fs::copy(golden("radar_basic", "input.hex"), &input).expect("copy fixture");

    cmd()
        .args(["radar", "replay"])
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(contains("output path must differ from input"));
}

#[test]
fn glob_with_multiple_matches_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    for name in ["a.hex", "b.hex"] {
        std::fs::copy(golden("radar_basic", "input.hex"), temp.path().join(name))
            .expect("copy fixture");
    }

    cmd()
        .args(["radar", "replay"])
        .arg(temp.path().join("*.hex"))
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn lidar_read_gates_and_writes_summary() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("lidar.csv");
    let summary_path = temp.path().join("summary.json");

    // The capture is read well within one second, so a 1 Hz gate lets only
    // the first valid frame through.
    cmd()
        .args(["lidar", "read"])
        .arg(golden("lidar_stream", "input.bin"))
        .args(["--frequency", "1"])
        .arg("-o")
        .arg(&output)
        .arg("--summary")
        .arg(&summary_path)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());

    let csv = std::fs::read_to_string(&output).expect("read csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "time,unix_time,distance,strength,temperature");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with(",120,1000,2300"));

    let summary: Value =
        serde_json::from_str(&std::fs::read_to_string(&summary_path).expect("read summary"))
            .expect("summary json");
    assert_eq!(summary["sensor"], "lidar");
    assert_eq!(summary["inputs_total"], 39);
    assert_eq!(summary["frames_valid"], 3);
    assert_eq!(summary["frames_emitted"], 1);
    assert_eq!(summary["frames_rejected"], 1);
}

#[test]
fn lidar_rejects_non_positive_frequency() {
    cmd()
        .args(["lidar", "read"])
        .arg(golden("lidar_stream", "input.bin"))
        .args(["--frequency", "0", "--stdout"])
        .assert()
        .code(2)
        .stderr(contains("invalid frequency").and(contains("hint:")));
}

#[test]
fn strict_fails_when_frames_rejected() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .args(["lidar", "read"])
        .arg(golden("lidar_stream", "input.bin"))
        .arg("-o")
        .arg(temp.path().join("lidar.csv"))
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("1 frames rejected"));
}
