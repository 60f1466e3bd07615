//! Integration tests for decoding untrusted input under [`Limits`].

use commonware_tlv::{
    encoded_len, Buffer, ByteSink, ByteSource, Decode, Encode, Error, Limits, Read, Reader,
    Write, Writer,
};

fn init() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A chain of containers, one level of nesting per link.
#[derive(Debug, Default, Clone, PartialEq)]
struct Chain(Vec<Chain>);

impl Chain {
    fn with_depth(depth: usize) -> Self {
        let mut chain = Chain::default();
        for _ in 1..depth {
            chain = Chain(vec![chain]);
        }
        chain
    }
}

impl Write for Chain {
    fn write<S: ByteSink + ?Sized>(&self, w: &mut Writer<'_, S>) -> Result<(), Error> {
        self.0.write(w)
    }
}

impl Read for Chain {
    fn read_into<S: ByteSource + ?Sized>(&mut self, r: &mut Reader<'_, S>) -> Result<(), Error> {
        self.0.read_into(r)
    }
}

#[test]
fn test_string_limit() {
    init();
    let limits = Limits::default().with_max_string_bytes(4);

    let mut buf = Buffer::with_limits(limits);
    buf.encode("abcd").unwrap();
    assert_eq!(
        buf.encode("abcde"),
        Err(Error::StringTooLong { len: 5, limit: 4 })
    );

    let mut out = String::new();
    buf.decode(&mut out).unwrap();
    assert_eq!(out, "abcd");

    let encoded = "abcde".encode().unwrap();
    assert_eq!(
        String::decode_with(&encoded, limits),
        Err(Error::StringTooLong { len: 5, limit: 4 })
    );
}

#[test]
fn test_truncated_string() {
    init();
    let data = [0x02, 0x04, b'a', b'b'];
    assert_eq!(
        String::decode(&data),
        Err(Error::Underflow {
            requested: 4,
            remaining: 2
        })
    );
}

#[test]
fn test_unknown_wire_type() {
    init();
    assert_eq!(u32::decode(&[0x05, 0x00]), Err(Error::UnknownWireType(5)));
    assert_eq!(String::decode(&[0x07]), Err(Error::UnknownWireType(7)));
}

#[test]
fn test_type_mismatch() {
    init();
    let encoded = vec![1u32, 2].encode().unwrap();
    assert!(matches!(
        u64::decode(&encoded),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        f64::decode(&encoded),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        i32::decode(&7u32.encode().unwrap()),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_container_roundtrip() {
    init();
    let value = vec![1i32, -2, 3, -4, 123456];
    let encoded = value.encode().unwrap();
    assert_eq!(Vec::<i32>::decode(&encoded).unwrap(), value);
    assert_eq!(
        <[i32; 4]>::decode(&encoded),
        Err(Error::ElementCountMismatch {
            found: 5,
            expected: 4
        })
    );
}

#[test]
fn test_sizer_is_idempotent() {
    init();
    let value = (
        "header".to_string(),
        vec![vec![1u64, 2], vec![]],
        -3i16,
        0.25f32,
    );
    let first = encoded_len(&value, Limits::default()).unwrap();
    let second = encoded_len(&value, Limits::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, value.encode().unwrap().len());
}

#[test]
fn test_nesting_depth() {
    init();
    let limits = Limits::default();
    assert_eq!(limits.max_depth, 16);

    let allowed = Chain::with_depth(16);
    let encoded = allowed.encode().unwrap();
    assert_eq!(Chain::decode(&encoded).unwrap(), allowed);

    let too_deep = Chain::with_depth(17);
    assert_eq!(
        too_deep.encode(),
        Err(Error::NestingTooDeep {
            depth: 17,
            limit: 16
        })
    );

    let mut buf = Buffer::with_limits(Limits::unbounded());
    buf.encode(&too_deep).unwrap();
    assert_eq!(
        Chain::decode(buf.as_slice()),
        Err(Error::NestingTooDeep {
            depth: 17,
            limit: 16
        })
    );
}

#[test]
fn test_message_limit() {
    init();
    let limits = Limits::default().with_max_message_bytes(8);
    let mut buf = Buffer::with_limits(limits);
    buf.encode(&1u64).unwrap();
    assert_eq!(
        buf.encode("hello"),
        Err(Error::MessageTooLarge {
            attempted: 9,
            limit: 8
        })
    );
    assert_eq!(buf.size(), 2);

    let encoded = vec![0u8; 8].encode().unwrap();
    assert!(matches!(
        Vec::<u8>::decode_with(&encoded, limits),
        Err(Error::MessageTooLarge { .. })
    ));
}

#[test]
fn test_hostile_string_length() {
    init();
    // Claims u64::MAX bytes of string
    let data = [
        0x02, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01,
    ];
    assert!(matches!(
        String::decode(&data),
        Err(Error::StringTooLong { .. })
    ));
}

#[test]
fn test_limits_from_yaml() {
    let limits: Limits = serde_yaml::from_str(
        "max_message_bytes: 4096\n\
         max_string_bytes: 256\n\
         max_depth: 4\n",
    )
    .unwrap();
    assert_eq!(
        limits,
        Limits::default()
            .with_max_message_bytes(4096)
            .with_max_string_bytes(256)
            .with_max_depth(4)
    );

    let encoded = "x".repeat(257).encode().unwrap();
    assert_eq!(
        String::decode_with(&encoded, limits),
        Err(Error::StringTooLong {
            len: 257,
            limit: 256
        })
    );
}
