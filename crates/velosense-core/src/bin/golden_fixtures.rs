use std::fs;
use std::path::{Path, PathBuf};

use velosense_core::protocols::lidar::{LidarFrame, encode_lidar_frame};

const STRENGTH: u16 = 1000;
const TEMPERATURE: u16 = 2300;

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_radar_fixtures(&root)?;
    write_lidar_fixtures(&root)?;
    Ok(())
}

fn write_radar_fixtures(root: &Path) -> Result<(), String> {
    let mut live = vec![0u8; 19];
    live[1..7].copy_from_slice(&[0xd5, 0x0a, 0x07, 0x48, 0x20, 0x0d]);

    let lines = [
        "# flags, then six (info, range, speed) triples".to_string(),
        hex_packed(&[0u8; 19]),
        hex_spaced(&live),
        hex_packed(&[0u8; 10]),
    ];
    write_file(
        &root.join("radar_basic").join("input.hex"),
        format!("{}\n", lines.join("\n")).as_bytes(),
    )
}

fn write_lidar_fixtures(root: &Path) -> Result<(), String> {
    let mut stream = vec![0x00, 0x59, 0x13];
    for distance in [120, 121, 122] {
        stream.extend_from_slice(&encode_lidar_frame(&sample(distance)));
    }
    let mut corrupted = encode_lidar_frame(&sample(123));
    corrupted[8] = corrupted[8].wrapping_add(1);
    stream.extend_from_slice(&corrupted);

    write_file(&root.join("lidar_stream").join("input.bin"), &stream)
}

fn sample(distance: u16) -> LidarFrame {
    LidarFrame {
        distance,
        strength: STRENGTH,
        temperature: TEMPERATURE,
    }
}

fn hex_packed(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create {}: {}", parent.display(), err))?;
    }
    fs::write(path, data).map_err(|err| format!("failed to write {}: {}", path.display(), err))
}
