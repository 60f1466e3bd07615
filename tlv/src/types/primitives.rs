//! Codec implementations for Rust primitive types.
//!
//! # Categories
//!
//! * `u8` is a raw byte: `[Bytes][len = 1][byte]`. Any other length is rejected.
//! * Unsigned integers and `bool` are `VarUInt`; signed integers are `VarSIntZigZag`.
//!   Decoding into a narrower type fails if the value does not fit.
//! * `f32` and `f64` are `Fixed32` and `Fixed64`, carrying their IEEE-754 bit patterns.
//! * Enumerations encode through the integer path of their representation (see
//!   [`Enumeration`]), so a `u8`-backed enumeration is a `VarUInt`, not a raw byte.

use crate::{
    fixed, varint,
    wire::{Category, WireType},
    ByteSink, ByteSource, Error, Read, Reader, Write, Writer,
};

mod private {
    pub trait Sealed {}
}

/// Integer types that can back an [`Enumeration`].
pub trait Integer: Copy + private::Sealed {
    /// Whether values travel as `VarSIntZigZag` (`true`) or `VarUInt` (`false`).
    const SIGNED: bool;

    /// Type name used in errors.
    const NAME: &'static str;

    /// Widens to a type that holds every signed and unsigned 64-bit value.
    fn widen(self) -> i128;

    /// Narrows back, or `None` if `value` does not fit.
    fn narrow(value: i128) -> Option<Self>;
}

macro_rules! impl_integer {
    ($type:ty, $signed:expr) => {
        impl private::Sealed for $type {}

        impl Integer for $type {
            const SIGNED: bool = $signed;
            const NAME: &'static str = stringify!($type);

            #[inline]
            fn widen(self) -> i128 {
                i128::from(self)
            }

            #[inline]
            fn narrow(value: i128) -> Option<Self> {
                <$type>::try_from(value).ok()
            }
        }
    };
}

impl_integer!(u8, false);
impl_integer!(u16, false);
impl_integer!(u32, false);
impl_integer!(u64, false);
impl_integer!(i8, true);
impl_integer!(i16, true);
impl_integer!(i32, true);
impl_integer!(i64, true);

/// Writes `value` as a `VarUInt` or `VarSIntZigZag` value, depending on its signedness.
pub fn write_integer<I: Integer, S: ByteSink + ?Sized>(
    w: &mut Writer<'_, S>,
    value: I,
) -> Result<(), Error> {
    // Every `Integer` fits the 64-bit type of its signedness.
    let wide = value.widen();
    if I::SIGNED {
        w.header(WireType::VarSIntZigZag)?;
        varint::write_signed(w, wide as i64)
    } else {
        w.header(WireType::VarUInt)?;
        w.varuint(wide as u64)
    }
}

/// Reads a value written by [`write_integer`].
///
/// Fails with [`Error::TypeMismatch`] if the signedness on the wire differs and with
/// [`Error::Invalid`] if the value does not fit `I`.
pub fn read_integer<I: Integer, S: ByteSource + ?Sized>(
    r: &mut Reader<'_, S>,
) -> Result<I, Error> {
    let wide = if I::SIGNED {
        r.expect(Category::Signed)?;
        i128::from(varint::read_signed(r)?)
    } else {
        r.expect(Category::Unsigned)?;
        i128::from(r.varuint()?)
    };
    I::narrow(wide).ok_or(Error::Invalid(I::NAME, "value out of range"))
}

// Integers other than `u8`, which is a raw byte.
macro_rules! impl_codec_for_integer {
    ($($type:ty),+) => {
        $(
            impl Write for $type {
                #[inline]
                fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
                    write_integer(w, *self)
                }
            }

            impl Read for $type {
                #[inline]
                fn read_into<S: ByteSource + ?Sized>(
                    &mut self,
                    r: &mut Reader<'_, S>,
                ) -> Result<(), Error> {
                    *self = read_integer(r)?;
                    Ok(())
                }
            }
        )+
    };
}

impl_codec_for_integer!(u16, u32, u64, i8, i16, i32, i64);

// Raw byte implementation
impl Write for u8 {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        w.header(WireType::Bytes)?;
        w.varuint(1)?;
        w.put(&[*self])
    }
}

impl Read for u8 {
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        r.expect(Category::Raw)?;
        let len = r.length()?;
        if len != 1 {
            return Err(Error::RawSizeMismatch {
                found: len,
                expected: 1,
            });
        }
        let mut byte = [0u8; 1];
        r.read_exact(&mut byte)?;
        *self = byte[0];
        Ok(())
    }
}

// Bool implementation
impl Write for bool {
    #[inline]
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        w.header(WireType::VarUInt)?;
        w.varuint(u64::from(*self))
    }
}

impl Read for bool {
    #[inline]
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        r.expect(Category::Unsigned)?;
        *self = match r.varuint()? {
            0 => false,
            1 => true,
            _ => return Err(Error::Invalid("bool", "value must be 0 or 1")),
        };
        Ok(())
    }
}

// Float implementation
macro_rules! impl_codec_for_float {
    ($type:ty, $wire_type:ident, $category:ident, $write:ident, $read:ident) => {
        impl Write for $type {
            #[inline]
            fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
                w.header(WireType::$wire_type)?;
                fixed::$write(w, self.to_bits())
            }
        }

        impl Read for $type {
            #[inline]
            fn read_into<S: ByteSource + ?Sized>(
                &mut self,
                r: &mut Reader<'_, S>,
            ) -> Result<(), Error> {
                r.expect(Category::$category)?;
                *self = <$type>::from_bits(fixed::$read(r)?);
                Ok(())
            }
        }
    };
}

impl_codec_for_float!(f32, Fixed32, Float32, write_fixed32, read_fixed32);
impl_codec_for_float!(f64, Fixed64, Float64, write_fixed64, read_fixed64);

/// Fieldless enumerations encoded through their integer representation.
///
/// Implement it (or let [`crate::impl_enumeration`] do so) and use
/// [`crate::impl_enumeration`] to derive [`Write`] and [`Read`].
pub trait Enumeration: Copy {
    /// Underlying integer type.
    type Repr: Integer;

    /// Returns the discriminant.
    fn to_repr(self) -> Self::Repr;

    /// Maps a discriminant back to a variant, or `None` if there is no such variant.
    fn from_repr(repr: Self::Repr) -> Option<Self>;
}

/// Writes an enumeration as its discriminant.
pub fn write_enumeration<E: Enumeration, S: ByteSink + ?Sized>(
    w: &mut Writer<'_, S>,
    value: E,
) -> Result<(), Error> {
    write_integer(w, value.to_repr())
}

/// Reads an enumeration, rejecting unknown discriminants with [`Error::Invalid`].
pub fn read_enumeration<E: Enumeration, S: ByteSource + ?Sized>(
    r: &mut Reader<'_, S>,
) -> Result<E, Error> {
    let repr = read_integer::<E::Repr, S>(r)?;
    E::from_repr(repr).ok_or(Error::Invalid("enumeration", "unknown discriminant"))
}

/// Implements [`Write`] and [`Read`] for a fieldless enumeration.
///
/// With a representation and a variant list, [`Enumeration`] is implemented as well.
///
/// # Examples
///
/// ```
/// use commonware_tlv::{impl_enumeration, Decode, Encode};
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// #[repr(i16)]
/// enum Level {
///     Low = -1,
///     #[default]
///     Normal = 0,
///     High = 1,
/// }
///
/// impl_enumeration!(Level: i16 { Low, Normal, High });
///
/// let encoded = Level::Low.encode().unwrap();
/// assert_eq!(&encoded[..], &[0x01, 0x01]);
/// assert_eq!(Level::decode(&encoded).unwrap(), Level::Low);
/// ```
#[macro_export]
macro_rules! impl_enumeration {
    ($name:ident: $repr:ty { $($variant:ident),+ $(,)? }) => {
        impl $crate::Enumeration for $name {
            type Repr = $repr;

            #[inline]
            fn to_repr(self) -> $repr {
                self as $repr
            }

            fn from_repr(repr: $repr) -> ::core::option::Option<Self> {
                $(
                    if repr == $name::$variant as $repr {
                        return ::core::option::Option::Some($name::$variant);
                    }
                )+
                ::core::option::Option::None
            }
        }

        $crate::impl_enumeration!($name);
    };
    ($name:ident) => {
        impl $crate::Write for $name {
            #[inline]
            fn write<S: $crate::ByteSink + ?Sized>(
                &self,
                w: &mut $crate::Writer<'_, S>,
            ) -> ::core::result::Result<(), $crate::Error> {
                $crate::write_enumeration(w, *self)
            }
        }

        impl $crate::Read for $name {
            #[inline]
            fn read_into<S: $crate::ByteSource + ?Sized>(
                &mut self,
                r: &mut $crate::Reader<'_, S>,
            ) -> ::core::result::Result<(), $crate::Error> {
                *self = $crate::read_enumeration(r)?;
                ::core::result::Result::Ok(())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decode, Encode};
    use paste::paste;

    macro_rules! impl_num_test {
        ($type:ty, $wire_type:ident) => {
            paste! {
                #[test]
                fn [<test_ $type>]() {
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values.iter() {
                        let encoded = value.encode().unwrap();
                        assert_eq!(encoded[0], WireType::$wire_type.code());
                        assert_eq!(value.encode_size().unwrap(), encoded.len());
                        let decoded = <$type>::decode(&encoded).unwrap();
                        assert_eq!(*value, decoded);
                    }
                }
            }
        };
    }
    impl_num_test!(u16, VarUInt);
    impl_num_test!(u32, VarUInt);
    impl_num_test!(u64, VarUInt);
    impl_num_test!(i8, VarSIntZigZag);
    impl_num_test!(i16, VarSIntZigZag);
    impl_num_test!(i32, VarSIntZigZag);
    impl_num_test!(i64, VarSIntZigZag);
    impl_num_test!(f32, Fixed32);
    impl_num_test!(f64, Fixed64);

    #[test]
    fn test_conformity() {
        // Raw byte
        assert_eq!(&0xABu8.encode().unwrap()[..], &[0x02, 0x01, 0xAB]);

        // Unsigned
        assert_eq!(&0u32.encode().unwrap()[..], &[0x00, 0x00]);
        assert_eq!(&300u16.encode().unwrap()[..], &[0x00, 0xAC, 0x02]);
        assert_eq!(
            &u64::MAX.encode().unwrap()[..],
            &[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );

        // Signed
        assert_eq!(&(-1i32).encode().unwrap()[..], &[0x01, 0x01]);
        assert_eq!(&1i64.encode().unwrap()[..], &[0x01, 0x02]);
        assert_eq!(&(-2i8).encode().unwrap()[..], &[0x01, 0x03]);
        assert_eq!(
            &i64::MIN.encode().unwrap()[..],
            &[0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );
        assert_eq!(
            &i64::MAX.encode().unwrap()[..],
            &[0x01, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );

        // Bool
        assert_eq!(&true.encode().unwrap()[..], &[0x00, 0x01]);
        assert_eq!(&false.encode().unwrap()[..], &[0x00, 0x00]);

        // Floats
        assert_eq!(
            &1.0f32.encode().unwrap()[..],
            &[0x03, 0x00, 0x00, 0x80, 0x3F]
        );
        assert_eq!(
            &(-1.0f64).encode().unwrap()[..],
            &[0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0xBF]
        );
    }

    #[test]
    fn test_raw_byte() {
        for value in [0u8, 1, 0x7F, 0x80, u8::MAX] {
            let encoded = value.encode().unwrap();
            assert_eq!(encoded.len(), 3);
            assert_eq!(u8::decode(&encoded).unwrap(), value);
        }

        // Length other than one
        assert_eq!(
            u8::decode(&[0x02, 0x02, 0x01, 0x02]),
            Err(Error::RawSizeMismatch {
                found: 2,
                expected: 1
            })
        );
        assert_eq!(
            u8::decode(&[0x00, 0x01]),
            Err(Error::TypeMismatch {
                found: WireType::VarUInt,
                expected: Category::Raw
            })
        );
    }

    #[test]
    fn test_signedness_mismatch() {
        let encoded = 5u32.encode().unwrap();
        assert_eq!(
            i32::decode(&encoded),
            Err(Error::TypeMismatch {
                found: WireType::VarUInt,
                expected: Category::Signed
            })
        );

        let encoded = (-5i64).encode().unwrap();
        assert_eq!(
            u64::decode(&encoded),
            Err(Error::TypeMismatch {
                found: WireType::VarSIntZigZag,
                expected: Category::Unsigned
            })
        );
    }

    #[test]
    fn test_float_width_mismatch() {
        let encoded = 1.5f32.encode().unwrap();
        assert_eq!(
            f64::decode(&encoded),
            Err(Error::TypeMismatch {
                found: WireType::Fixed32,
                expected: Category::Float64
            })
        );
        let encoded = 1.5f64.encode().unwrap();
        assert!(matches!(
            f32::decode(&encoded),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_narrowing() {
        let encoded = 70_000u32.encode().unwrap();
        assert_eq!(
            u16::decode(&encoded),
            Err(Error::Invalid("u16", "value out of range"))
        );
        let encoded = (-129i16).encode().unwrap();
        assert_eq!(
            i8::decode(&encoded),
            Err(Error::Invalid("i8", "value out of range"))
        );
        let encoded = 200u16.encode().unwrap();
        assert_eq!(u32::decode(&encoded).unwrap(), 200);
    }

    #[test]
    fn test_bool() {
        for value in [true, false] {
            let encoded = value.encode().unwrap();
            assert_eq!(bool::decode(&encoded).unwrap(), value);
        }
        assert_eq!(
            bool::decode(&[0x00, 0x02]),
            Err(Error::Invalid("bool", "value must be 0 or 1"))
        );
    }

    #[test]
    fn test_float_special_values() {
        let encoded = f64::NAN.encode().unwrap();
        assert!(f64::decode(&encoded).unwrap().is_nan());
        let encoded = f32::NEG_INFINITY.encode().unwrap();
        assert_eq!(f32::decode(&encoded).unwrap(), f32::NEG_INFINITY);
        let encoded = (-0.0f64).encode().unwrap();
        assert!(f64::decode(&encoded).unwrap().is_sign_negative());
    }

    #[test]
    fn test_truncated() {
        assert!(matches!(
            u32::decode(&[0x00, 0x80]),
            Err(Error::Underflow { .. })
        ));
        assert!(matches!(
            f32::decode(&[0x03, 0x00, 0x00]),
            Err(Error::Underflow { .. })
        ));
        assert_eq!(u32::decode(&[0x05, 0x00]), Err(Error::UnknownWireType(5)));
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    #[repr(u8)]
    enum Color {
        #[default]
        Red = 1,
        Green = 2,
        Blue = 200,
    }

    crate::impl_enumeration!(Color: u8 { Red, Green, Blue });

    #[test]
    fn test_enumeration() {
        for color in [Color::Red, Color::Green, Color::Blue] {
            let encoded = color.encode().unwrap();
            assert_eq!(encoded[0], WireType::VarUInt.code());
            assert_eq!(Color::decode(&encoded).unwrap(), color);
        }
        assert_eq!(&Color::Blue.encode().unwrap()[..], &[0x00, 0xC8, 0x01]);

        // Unknown discriminant
        assert_eq!(
            Color::decode(&[0x00, 0x03]),
            Err(Error::Invalid("enumeration", "unknown discriminant"))
        );

        // Signed tag for an unsigned enumeration
        assert_eq!(
            Color::decode(&[0x01, 0x02]),
            Err(Error::TypeMismatch {
                found: WireType::VarSIntZigZag,
                expected: Category::Unsigned
            })
        );

        // Discriminant wider than the representation
        assert_eq!(
            Color::decode(&[0x00, 0x80, 0x02]),
            Err(Error::Invalid("u8", "value out of range"))
        );
    }
}
