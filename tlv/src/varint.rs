//! Variable-length integer encoding and decoding
//!
//! This module implements base-128 variable-length integer encoding, least significant group
//! first. Each byte uses:
//! - 7 bits for the value
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! Signed integers are first mapped onto the unsigned domain with ZigZag encoding so that
//! small negative values stay short.

use crate::{ByteSink, ByteSource, Error};

const BITS_PER_BYTE: usize = 8;
const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// Maximum number of bytes in the encoding of a `u64` (`ceil(64 / 7)`).
pub const MAX_VARINT_BYTES: usize = (u64::BITS as usize).div_ceil(DATA_BITS_PER_BYTE);

/// Maps a signed 64-bit integer onto the unsigned domain.
#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    // Moves the sign bit to the least significant bit.
    ((value as u64) << 1) ^ ((value >> (i64::BITS - 1)) as u64)
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ (-((value & 1) as i64))
}

/// Encodes an unsigned 64-bit integer as a varint
pub fn write<S: ByteSink + ?Sized>(sink: &mut S, value: u64) -> Result<(), Error> {
    let mut tmp = [0u8; MAX_VARINT_BYTES];
    let mut len = 0;
    let mut val = value;
    while val >= u64::from(CONTINUATION_BIT_MASK) {
        tmp[len] = (val as u8 & DATA_BITS_MASK) | CONTINUATION_BIT_MASK;
        val >>= DATA_BITS_PER_BYTE;
        len += 1;
    }
    // `val` now fits in the data bits, so the continuation bit stays clear.
    tmp[len] = val as u8;
    sink.write_bytes(&tmp[..=len])
}

/// Decodes an unsigned 64-bit integer from a varint
pub fn read<S: ByteSource + ?Sized>(source: &mut S) -> Result<u64, Error> {
    let max_bits = u64::BITS as usize;
    let mut result: u64 = 0;
    let mut shift = 0;

    // Loop over all the bytes.
    loop {
        // Read the next byte.
        let mut byte = [0u8; 1];
        source.read_exact(&mut byte)?;
        let byte = byte[0];

        // If this must be the last byte, check for overflow (i.e. set bits beyond 64).
        // Because the continuation bit is the most-significant bit, this check also rejects a
        // continuation bit on the final group, bounding the loop at `MAX_VARINT_BYTES`.
        let remaining_bits = max_bits - shift;
        if remaining_bits <= DATA_BITS_PER_BYTE {
            let relevant_bits = BITS_PER_BYTE - byte.leading_zeros() as usize;
            if relevant_bits > remaining_bits {
                return Err(Error::VarintTooLong);
            }
        }

        // Write the 7 bits of data to the result.
        result |= u64::from(byte & DATA_BITS_MASK) << shift;

        // If the continuation bit is not set, return.
        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }

        // Each byte has 7 bits of data.
        shift += DATA_BITS_PER_BYTE;
    }
}

/// Encodes a signed integer as a varint using ZigZag encoding.
pub fn write_signed<S: ByteSink + ?Sized>(sink: &mut S, value: i64) -> Result<(), Error> {
    write(sink, zigzag_encode(value))
}

/// Decodes a signed integer from ZigZag encoding
pub fn read_signed<S: ByteSource + ?Sized>(source: &mut S) -> Result<i64, Error> {
    Ok(zigzag_decode(read(source)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        write(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn test_known_vectors() {
        let cases: [(u64, &[u8]); 9] = [
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (300, &[0xAC, 0x02]),
            (16383, &[0xFF, 0x7F]),
            (16384, &[0x80, 0x80, 0x01]),
            (0xFFFF_FFFF, &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
            (
                u64::MAX,
                &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01],
            ),
        ];
        for (value, expected) in cases {
            assert_eq!(encode(value), expected, "value={value}");
        }
        assert_eq!(MAX_VARINT_BYTES, 10);
    }

    #[test]
    fn test_varint_encoding() {
        let test_cases = [
            0u64,
            1,
            127,
            128,
            129,
            0xFF,
            0x100,
            0x3FFF,
            0x4000,
            0x1FFFFF,
            0xFFFFFF,
            0x1FFFFFFF,
            0xFFFFFFFF,
            0x1FFFFFFFFFF,
            0xFFFFFFFFFFFFFF,
            u64::MAX,
        ];

        for &value in &test_cases {
            let buf = encode(value);
            let bits = (u64::BITS - value.leading_zeros()) as usize;
            assert_eq!(buf.len(), bits.div_ceil(DATA_BITS_PER_BYTE).max(1));

            let mut read_buf = &buf[..];
            let decoded = read(&mut read_buf).unwrap();

            assert_eq!(decoded, value);
            assert_eq!(read_buf.len(), 0);
        }
    }

    #[test]
    fn test_zigzag_known_mappings() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_encode(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag_encode(i64::MIN), u64::MAX);
        assert_eq!(zigzag_decode(0), 0);
        assert_eq!(zigzag_decode(1), -1);
        assert_eq!(zigzag_decode(2), 1);
        assert_eq!(zigzag_decode(3), -2);
    }

    #[test]
    fn test_zigzag_encoding() {
        let test_cases = [
            0i64,
            1,
            -1,
            2,
            -2,
            127,
            -127,
            128,
            -128,
            129,
            -129,
            0x7FFFFFFF,
            -0x7FFFFFFF,
            i64::MIN,
            i64::MAX,
        ];

        for &value in &test_cases {
            let mut buf = Vec::new();
            write_signed(&mut buf, value).unwrap();
            assert_eq!(buf, encode(zigzag_encode(value)));

            let mut read_buf = &buf[..];
            let decoded = read_signed(&mut read_buf).unwrap();

            assert_eq!(decoded, value);
            assert_eq!(read_buf.len(), 0);
        }
    }

    #[test]
    fn test_varint_insufficient_buffer() {
        let mut buf = &[0x80u8][..];
        assert!(matches!(read(&mut buf), Err(Error::Underflow { .. })));
    }

    #[test]
    fn test_varint_too_long() {
        // Eleven continuation bytes never terminate within ten groups
        let data = [0x80u8; 11];
        let mut buf = &data[..];
        assert_eq!(read(&mut buf), Err(Error::VarintTooLong));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_varint_overflowing_last_group() {
        let mut buf = &[0x80u8, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02][..];
        assert_eq!(read(&mut buf), Err(Error::VarintTooLong));
    }
}
