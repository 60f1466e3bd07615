//! Single-byte wire header identifying the shape of the value that follows.
//!
//! Bits 0-2 carry the wire-type code; bits 3-7 are reserved for flags and are always written
//! as zero. Decoding masks the reserved bits and rejects codes 5-7.

use crate::{ByteSink, ByteSource, Error};
use std::fmt;

const CODE_MASK: u8 = 0x07;

/// Coarse shape of an encoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum WireType {
    /// Base-128 unsigned varint.
    VarUInt = 0,
    /// Zigzag-mapped signed integer, then base-128 varint.
    VarSIntZigZag = 1,
    /// Varint length followed by that many payload bytes.
    Bytes = 2,
    /// Four little-endian bytes.
    Fixed32 = 3,
    /// Eight little-endian bytes.
    Fixed64 = 4,
}

impl WireType {
    /// The 3-bit code of this wire type.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Maps a header byte to its wire type, ignoring the reserved bits.
    pub fn from_header(byte: u8) -> Result<Self, Error> {
        match byte & CODE_MASK {
            0 => Ok(Self::VarUInt),
            1 => Ok(Self::VarSIntZigZag),
            2 => Ok(Self::Bytes),
            3 => Ok(Self::Fixed32),
            4 => Ok(Self::Fixed64),
            code => Err(Error::UnknownWireType(code)),
        }
    }
}

impl TryFrom<u8> for WireType {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_header(byte)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::VarUInt => "VarUInt",
            Self::VarSIntZigZag => "VarSIntZigZag",
            Self::Bytes => "Bytes",
            Self::Fixed32 => "Fixed32",
            Self::Fixed64 => "Fixed64",
        };
        f.write_str(name)
    }
}

/// Category a decode target belongs to, reported when the wire type does not fit it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// A single raw byte (`u8`).
    Raw,
    /// Unsigned integers, `bool`, and unsigned enumerations.
    Unsigned,
    /// Signed integers and signed enumerations.
    Signed,
    /// `f32`.
    Float32,
    /// `f64`.
    Float64,
    /// Strings and opaque byte strings.
    String,
    /// Sequences, sets, and maps.
    Container,
    /// Tuples and [`crate::Aggregate`] types.
    Aggregate,
}

impl Category {
    /// The only wire type values of this category are encoded with.
    pub const fn wire_type(self) -> WireType {
        match self {
            Self::Unsigned => WireType::VarUInt,
            Self::Signed => WireType::VarSIntZigZag,
            Self::Float32 => WireType::Fixed32,
            Self::Float64 => WireType::Fixed64,
            Self::Raw | Self::String | Self::Container | Self::Aggregate => WireType::Bytes,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Raw => "raw byte",
            Self::Unsigned => "unsigned integer",
            Self::Signed => "signed integer",
            Self::Float32 => "32-bit float",
            Self::Float64 => "64-bit float",
            Self::String => "string",
            Self::Container => "container",
            Self::Aggregate => "aggregate",
        };
        f.write_str(name)
    }
}

/// Writes the header byte for `wire_type`.
#[inline]
pub fn write_header<S: ByteSink + ?Sized>(sink: &mut S, wire_type: WireType) -> Result<(), Error> {
    sink.write_bytes(&[wire_type.code() & CODE_MASK])
}

/// Reads a header byte.
#[inline]
pub fn read_header<S: ByteSource + ?Sized>(source: &mut S) -> Result<WireType, Error> {
    let mut byte = [0u8; 1];
    source.read_exact(&mut byte)?;
    WireType::from_header(byte[0])
}
