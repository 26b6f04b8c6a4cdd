pub const FRAME_LEN: usize = 9;

pub const SYNC_BYTE: u8 = 0x59;
pub const SYNC_RANGE: std::ops::Range<usize> = 0..2;

pub const DISTANCE_RANGE: std::ops::Range<usize> = 2..4;
pub const STRENGTH_RANGE: std::ops::Range<usize> = 4..6;
pub const TEMPERATURE_RANGE: std::ops::Range<usize> = 6..8;

pub const CHECKSUM_COVERAGE: std::ops::Range<usize> = 0..8;
pub const CHECKSUM_OFFSET: usize = 8;
