#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use commonware_tlv::{encoded_len, Buffer, Decode, Encode, Limits, Read, Write};
use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Debug;

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    // Scalars
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),

    // Strings
    String(String),
    Bytes(Vec<u8>),

    // Containers
    Vec(Vec<i32>),
    NestedVec(Vec<Vec<u16>>),
    VecDeque(VecDeque<u64>),
    BTreeSet(BTreeSet<i64>),
    BTreeMap(BTreeMap<u32, String>),
    Array([i16; 4]),

    // Aggregates
    Tuple2(u8, String),
    Tuple4(i64, f64, Vec<bool>, (u32, String)),

    // Limits applied to both sides
    Limited(Limits, Vec<String>),
}

fn roundtrip<T>(value: T)
where
    T: Write + Read + Default + PartialEq + Debug,
{
    let encoded = value.encode().expect("failed to encode");
    assert_eq!(value.encode_size().unwrap(), encoded.len());
    let decoded = T::decode(&encoded).expect("failed to decode an encoded value");
    assert_eq!(value, decoded);
}

fn roundtrip_float<T>(value: T, to_bits: fn(T) -> u64)
where
    T: Write + Read + Default + Copy,
{
    let encoded = value.encode().expect("failed to encode");
    let decoded = T::decode(&encoded).expect("failed to decode an encoded value");
    assert_eq!(to_bits(value), to_bits(decoded));
}

fn roundtrip_limited(limits: Limits, value: Vec<String>) {
    // Element counts are only enforced when decoding
    if value.len() > limits.max_elements {
        return;
    }
    let mut buf = Buffer::with_limits(limits);
    match buf.encode(&value) {
        Ok(()) => {
            assert_eq!(encoded_len(&value, limits).unwrap(), buf.size());
            let mut decoded: Vec<String> = Vec::new();
            buf.decode(&mut decoded).expect("limits rejected what they accepted");
            assert_eq!(value, decoded);
        }
        Err(_) => {
            // A failed encode leaves nothing behind
            assert!(buf.is_empty());
        }
    }
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::U8(v) => roundtrip(v),
        FuzzInput::U16(v) => roundtrip(v),
        FuzzInput::U32(v) => roundtrip(v),
        FuzzInput::U64(v) => roundtrip(v),
        FuzzInput::I8(v) => roundtrip(v),
        FuzzInput::I16(v) => roundtrip(v),
        FuzzInput::I32(v) => roundtrip(v),
        FuzzInput::I64(v) => roundtrip(v),
        FuzzInput::F32(v) => roundtrip_float(v, |f| u64::from(f.to_bits())),
        FuzzInput::F64(v) => roundtrip_float(v, f64::to_bits),
        FuzzInput::Bool(v) => roundtrip(v),
        FuzzInput::String(v) => roundtrip(v),
        FuzzInput::Bytes(v) => roundtrip(Bytes::from(v)),
        FuzzInput::Vec(v) => roundtrip(v),
        FuzzInput::NestedVec(v) => roundtrip(v),
        FuzzInput::VecDeque(v) => roundtrip(v),
        FuzzInput::BTreeSet(v) => roundtrip(v),
        FuzzInput::BTreeMap(v) => roundtrip(v),
        FuzzInput::Array(v) => roundtrip(v),
        FuzzInput::Tuple2(a, b) => roundtrip((a, b)),
        FuzzInput::Tuple4(a, b, c, d) => {
            if b.is_nan() {
                return;
            }
            roundtrip((a, b, c, d))
        }
        FuzzInput::Limited(limits, v) => roundtrip_limited(limits, v),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
