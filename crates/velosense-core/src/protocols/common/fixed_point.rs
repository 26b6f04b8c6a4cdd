//! Unsigned fixed-point with a two-bit binary fraction (Q6.2).
//!
//! The two least significant bits of a byte carry quarters: bit 0 adds
//! `0.25`, bit 1 adds `0.5`. The remaining six bits are the integer part.
//! Every byte maps to a value in `0.0..=63.75`, so decoding is total.

/// Number of low bits holding the binary fraction.
pub const FRACTION_BITS: u32 = 2;
/// Mask selecting the fraction bits.
pub const FRACTION_MASK: u8 = 0b0000_0011;

const FRACTION_LSB: f64 = 0.25;
const FRACTION_MSB: f64 = 0.5;

/// Decode a Q6.2 byte into its decimal value.
///
/// # Examples
/// ```
/// use velosense_core::protocols::common::decode_fixed_point;
///
/// assert_eq!(decode_fixed_point(0b0000_0111), 1.75);
/// assert_eq!(decode_fixed_point(0xff), 63.75);
/// ```
pub fn decode_fixed_point(byte: u8) -> f64 {
    let mut fraction = 0.0;
    if byte & 0b01 != 0 {
        fraction += FRACTION_LSB;
    }
    if byte & 0b10 != 0 {
        fraction += FRACTION_MSB;
    }
    f64::from(byte >> FRACTION_BITS) + fraction
}
