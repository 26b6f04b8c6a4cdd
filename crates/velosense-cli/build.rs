use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=VELOSENSE_COMMIT");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    let commit_full = ["VELOSENSE_COMMIT", "GITHUB_SHA"]
        .iter()
        .find_map(|name| env::var(name).ok().filter(|v| !v.is_empty()))
        .or_else(|| git(&["rev-parse", "HEAD"]))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let commit_short = if commit_full == UNKNOWN {
        UNKNOWN.to_string()
    } else {
        commit_full.chars().take(7).collect()
    };
    let build_date = git(&["log", "-1", "--format=%cs"]).unwrap_or_else(|| UNKNOWN.to_string());

    println!("cargo:rustc-env=VELOSENSE_BUILD_COMMIT={commit_short}");
    println!("cargo:rustc-env=VELOSENSE_BUILD_COMMIT_FULL={commit_full}");
    println!("cargo:rustc-env=VELOSENSE_BUILD_DATE={build_date}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}
