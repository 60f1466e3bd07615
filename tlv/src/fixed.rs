//! Little-endian fixed-width integer codecs.
//!
//! Byte `i` of the encoding holds bits `8*i..8*i+8` of the value, independent of host byte
//! order. Floats travel through these codecs as their IEEE-754 bit patterns.

use crate::{ByteSink, ByteSource, Error};

/// Writes `value` as four little-endian bytes.
#[inline]
pub fn write_fixed32<S: ByteSink + ?Sized>(sink: &mut S, value: u32) -> Result<(), Error> {
    sink.write_bytes(&value.to_le_bytes())
}

/// Writes `value` as eight little-endian bytes.
#[inline]
pub fn write_fixed64<S: ByteSink + ?Sized>(sink: &mut S, value: u64) -> Result<(), Error> {
    sink.write_bytes(&value.to_le_bytes())
}

/// Reads four little-endian bytes.
#[inline]
pub fn read_fixed32<S: ByteSource + ?Sized>(source: &mut S) -> Result<u32, Error> {
    let mut bytes = [0u8; 4];
    source.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

/// Reads eight little-endian bytes.
#[inline]
pub fn read_fixed64<S: ByteSource + ?Sized>(source: &mut S) -> Result<u64, Error> {
    let mut bytes = [0u8; 8];
    source.read_exact(&mut bytes)?;
    Ok(u64::from_le_bytes(bytes))
}
