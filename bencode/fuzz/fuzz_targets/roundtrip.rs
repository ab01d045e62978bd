#![no_main]

use arbitrary::Arbitrary;
use bytes::{Buf, Bytes};
use commonware_bencode::{decode, encode, Decode, Encode, EncodeSize, Source, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Buffer(Value),
    Split(Value, usize),
}

fn roundtrip_buffer(value: Value) {
    let encoded = value.encode();
    assert_eq!(value.encode_size(), encoded.len());
    let decoded = Value::decode(encoded).expect("failed to decode an encoded value");
    assert_eq!(value, decoded);
}

fn roundtrip_split(value: Value, at: usize) {
    let mut encoded = Vec::new();
    let written = encode(&mut encoded, &value).expect("failed to encode value");
    assert_eq!(written, encoded.len());

    // Decoding must not depend on where the input is split
    let encoded = Bytes::from(encoded);
    let at = at % (encoded.len() + 1);
    let mut source = Buf::chain(encoded.slice(..at), encoded.slice(at..));
    let decoded = decode(&mut source).expect("failed to decode a split value");
    assert!(source.is_exhausted().unwrap());
    assert_eq!(value, decoded);
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Buffer(value) => roundtrip_buffer(value),
        FuzzInput::Split(value, at) => roundtrip_split(value, at),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
