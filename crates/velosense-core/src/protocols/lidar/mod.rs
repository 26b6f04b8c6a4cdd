//! TF-series LIDAR serial frames.
//!
//! A frame is nine bytes: two `0x59` sync bytes, distance, signal strength
//! and temperature as little-endian `u16` (low byte first), then a checksum
//! equal to the sum of the first eight bytes modulo 256.
//!
//! `parse_lidar_frame` judges a single nine-byte window. Locating frames in a
//! continuous stream is the job of `crate::stream::LidarFrameSynchronizer`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::LidarError;
pub use parser::{LidarFrame, encode_lidar_frame, parse_lidar_frame};
