//! Sensor protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets and constants (source of truth)
//! - `reader`: safe byte access and protocol conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O or clocks; stream state lives in
//! `crate::stream` and sinks/sources handle the outside world.

pub mod common;
pub mod lidar;
pub mod radar;
