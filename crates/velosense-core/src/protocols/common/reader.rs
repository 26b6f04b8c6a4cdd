/// Render a byte as an 8-character, zero-padded binary string.
pub fn binary_repr(value: u8) -> String {
    format!("{value:08b}")
}

/// Sum of `bytes` modulo 256.
pub fn checksum_mod256(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, byte| acc.wrapping_add(*byte))
}
