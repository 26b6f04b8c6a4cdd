//! Stateful stream handling on top of the pure protocol parsers.
//!
//! - `window`: fixed-size rolling byte buffer
//! - `gate`: minimum-interval emission throttle
//! - `lidar`: frame synchronizer for the serial LIDAR stream
//!
//! Nothing here blocks or reads a clock; callers pass the arrival instant of
//! every byte.

pub mod gate;
pub mod lidar;
pub mod window;

pub use gate::RateGate;
pub use lidar::{LidarFrameSynchronizer, SyncStats};
pub use window::RollingByteWindow;
