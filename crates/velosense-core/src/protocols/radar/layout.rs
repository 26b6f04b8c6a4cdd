pub const FLAGS_OFFSET: usize = 0;
pub const TARGETS_OFFSET: usize = 1;

pub const TARGET_COUNT: usize = 6;
pub const TARGET_SIZE: usize = 3;

pub const INFO_OFFSET: usize = 0;
pub const RANGE_OFFSET: usize = 1;
pub const SPEED_OFFSET: usize = 2;

/// Keeps the six id bits of the info byte; the two low bits are reserved.
pub const TARGET_ID_MASK: u8 = 0b1111_1100;

pub const MIN_LEN: usize = TARGETS_OFFSET + TARGET_COUNT * TARGET_SIZE;

pub fn target_range(slot: usize) -> std::ops::Range<usize> {
    let start = TARGETS_OFFSET + slot * TARGET_SIZE;
    start..start + TARGET_SIZE
}
