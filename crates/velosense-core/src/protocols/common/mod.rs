//! Primitives shared by more than one sensor protocol.

pub mod fixed_point;
pub mod reader;

pub use fixed_point::decode_fixed_point;
pub use reader::{binary_repr, checksum_mod256};
