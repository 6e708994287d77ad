//! Lossy byte quantization for document lengths.
//!
//! Document lengths are stored as a single byte per (document, field) at
//! index-build time and decoded to an approximate float during scoring. The
//! encoding is a tiny custom float with 3 mantissa bits and 5 exponent bits
//! at zero-point 15, so a round-trip is inexact: values in the normal range
//! come back within one quantization step (roughly -12%), while values below
//! the smallest normal magnitude are flushed toward zero.

use lazy_static::lazy_static;

/// Mantissa bits of the encoded byte.
const MANTISSA_BITS: u32 = 3;
/// Exponent zero-point of the encoded byte.
const ZERO_EXPONENT: i32 = 15;
/// Smallest encodable exponent band; inputs below it flush toward zero.
const SMALLEST_NORMAL: i32 = (63 - ZERO_EXPONENT) << MANTISSA_BITS;

lazy_static! {
  /// The decoded value of every possible norm byte, computed once per
  /// process. Decode runs once per scored document and must stay O(1).
  static ref DECODE_TABLE: [f32; 256] = {
    let mut table = [0.0f32; 256];
    for (byte, slot) in table.iter_mut().enumerate() {
      *slot = decode_byte(byte as u8);
    }
    table
  };
}

/// Encodes a document length into a single norm byte.
///
/// The mapping is non-decreasing in the input: a larger length never
/// produces a byte that decodes to a smaller float. Length 0 maps to byte 0
/// and very large lengths saturate at byte 255 instead of overflowing.
pub fn encode(length: u32) -> u8 {
  let bits = (length as f32).to_bits() as i32;
  let small = bits >> (24 - MANTISSA_BITS);
  if small <= SMALLEST_NORMAL {
    // Denormalized range: flush toward zero instead of rounding to the
    // nearest representable normal.
    if bits <= 0 {
      0
    } else {
      1
    }
  } else if small >= SMALLEST_NORMAL + 0x100 {
    255
  } else {
    (small - SMALLEST_NORMAL) as u8
  }
}

/// Decodes a norm byte back to an approximate document length.
pub fn decode(byte: u8) -> f32 {
  DECODE_TABLE[byte as usize]
}

/// Computes the decoded value of one byte. Only used to fill the table.
fn decode_byte(byte: u8) -> f32 {
  if byte == 0 {
    return 0.0;
  }
  let mut bits = u32::from(byte) << (24 - MANTISSA_BITS);
  bits += ((63 - ZERO_EXPONENT) as u32) << 24;
  f32::from_bits(bits)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_zero_encodes_to_minimum_byte() {
    assert_eq!(encode(0), 0);
    assert_eq!(decode(0), 0.0);
  }

  #[test]
  fn test_large_lengths_never_overflow() {
    // The largest u32 length stays within the byte range and decodes to a
    // value at least as large as the input.
    let byte = encode(u32::MAX);
    assert!(byte > encode(1_000_000));
    assert_eq!(decode(byte), 2f32.powi(32));
  }

  #[test]
  fn test_decode_is_monotonic() {
    for byte in 1..=255u8 {
      assert!(
        decode(byte) >= decode(byte - 1),
        "decode({}) < decode({})",
        byte,
        byte - 1
      );
    }
  }

  #[test]
  fn test_decode_is_non_negative() {
    for byte in 0..=255u8 {
      assert!(decode(byte) >= 0.0);
    }
  }

  #[test]
  fn test_encode_is_monotonic() {
    let mut prev = 0u8;
    for length in [0, 1, 2, 5, 10, 100, 1000, 100_000, 10_000_000] {
      let byte = encode(length);
      assert!(byte >= prev, "encode({}) went backwards", length);
      prev = byte;
    }
  }

  #[test]
  fn test_round_trip_within_one_quantization_step() {
    // In the normal range the decoded value is the truncation of the input
    // to 3 mantissa bits: never larger, never more than one step (1/8
    // relative) smaller.
    for length in [1u32, 2, 3, 5, 7, 10, 42, 100, 513, 1000, 65_536, 1_000_000] {
      let decoded = decode(encode(length));
      assert!(decoded <= length as f32);
      assert!(
        decoded >= length as f32 * 0.875,
        "decode(encode({})) = {} lost more than one step",
        length,
        decoded
      );
    }
  }

  #[test]
  fn test_exactly_representable_lengths_round_trip() {
    // Lengths with at most 3 significant mantissa bits survive unchanged.
    for length in [1u32, 2, 3, 4, 6, 8, 12, 96, 128, 1024] {
      assert_eq!(decode(encode(length)), length as f32);
    }
  }
}
