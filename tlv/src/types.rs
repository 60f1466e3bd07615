//! Implementations of [`crate::Write`] and [`crate::Read`] for common types.
//!
//! The set of implementations is closed per category, so a type matches exactly one encoding
//! and a type without one is rejected at compile time.

pub mod collections;
pub mod primitives;
pub mod string;
pub mod tuple;

#[cfg(test)]
mod tests {
    use crate::{wire::WireType, Decode, Encode};
    use bytes::Bytes;

    #[test]
    fn test_category_headers() {
        assert_eq!(7u8.encode().unwrap()[0], WireType::Bytes.code());
        assert_eq!(7u16.encode().unwrap()[0], WireType::VarUInt.code());
        assert_eq!(true.encode().unwrap()[0], WireType::VarUInt.code());
        assert_eq!(7i8.encode().unwrap()[0], WireType::VarSIntZigZag.code());
        assert_eq!(7.0f32.encode().unwrap()[0], WireType::Fixed32.code());
        assert_eq!(7.0f64.encode().unwrap()[0], WireType::Fixed64.code());
        assert_eq!("7".encode().unwrap()[0], WireType::Bytes.code());
        assert_eq!(vec![7u32].encode().unwrap()[0], WireType::Bytes.code());
        assert_eq!((7u32,).encode().unwrap()[0], WireType::Bytes.code());
    }

    #[test]
    fn test_string_and_raw_bytes_differ() {
        // A string payload is its bytes, a byte container wraps every byte
        let text = "ab".encode().unwrap();
        let opaque = Bytes::from_static(b"ab").encode().unwrap();
        let raw = vec![b'a', b'b'].encode().unwrap();
        assert_eq!(text, opaque);
        assert_ne!(text, raw);
        assert_eq!(Vec::<u8>::decode(&raw).unwrap(), b"ab".to_vec());
    }
}
