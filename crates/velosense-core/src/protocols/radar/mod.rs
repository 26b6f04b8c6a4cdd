//! Rear-view radar target frames (BLE notifications).
//!
//! Each notification starts with a flags byte followed by six target slots of
//! three bytes each: info, range and speed. The info byte carries the target
//! id in its upper six bits; the speed byte is Q6.2 fixed-point. Slots
//! without a live target decode as zeros, and the decoder cannot tell them
//! apart from a real all-zero target.
//!
//! Payloads shorter than one flags byte plus six slots are rejected with
//! `RadarError::FrameTooShort`; they are never zero-filled. Offsets live in
//! `layout`, safe byte access in `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::RadarError;
pub use parser::{RadarFrame, RadarTarget, parse_radar_frame};
