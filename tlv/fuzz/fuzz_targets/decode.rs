#![no_main]

use arbitrary::Arbitrary;
use commonware_tlv::{Buffer, Decode, Limits, Read, Write};
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

#[derive(Arbitrary, Debug)]
enum Target {
    U8,
    U64,
    I32,
    F64,
    Bool,
    String,
    VecU8,
    NestedVec,
    Map,
    Tuple,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput<'a> {
    target: Target,
    limits: Limits,
    data: &'a [u8],
}

fn reencode<T: Write>(value: &T, limits: Limits) -> Buffer {
    let mut buf = Buffer::with_limits(limits);
    buf.encode(value).expect("decoded value must re-encode");
    buf
}

// Whatever untrusted input decodes to must re-encode (minimally) and decode again to the
// same bytes.
fn canonical<T: Read + Write + Default>(data: &[u8], limits: Limits) {
    if let Ok(value) = T::decode_with(data, limits) {
        let first = reencode(&value, limits);
        assert!(first.size() <= data.len());
        let again = T::decode_with(first.as_slice(), limits).expect("re-encoded value must decode");
        let second = reencode(&again, limits);
        assert_eq!(first.as_slice(), second.as_slice());
    }

    // Sequential decoding through a buffer must never panic either
    let mut buf = Buffer::with_limits(limits);
    if buf.append(data).is_err() {
        return;
    }
    let mut value = T::default();
    while buf.remaining() > 0 && buf.decode(&mut value).is_ok() {}
}

fn fuzz(input: FuzzInput) {
    let FuzzInput {
        target,
        limits,
        data,
    } = input;
    match target {
        Target::U8 => canonical::<u8>(data, limits),
        Target::U64 => canonical::<u64>(data, limits),
        Target::I32 => canonical::<i32>(data, limits),
        Target::F64 => canonical::<f64>(data, limits),
        Target::Bool => canonical::<bool>(data, limits),
        Target::String => canonical::<String>(data, limits),
        Target::VecU8 => canonical::<Vec<u8>>(data, limits),
        Target::NestedVec => canonical::<Vec<Vec<i64>>>(data, limits),
        Target::Map => canonical::<BTreeMap<u16, String>>(data, limits),
        Target::Tuple => canonical::<(u32, String, Vec<bool>)>(data, limits),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
