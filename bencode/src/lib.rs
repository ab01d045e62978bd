//! Encode and decode bencoded data.
//!
//! # Overview
//!
//! Bencode is a compact, binary-safe, self-describing format built from four productions:
//!
//! ```text
//! value      = bytestring / integer / list / dictionary
//! bytestring = length ":" raw-bytes
//! integer    = "i" ["-"] digits "e"
//! list       = "l" *value "e"
//! dictionary = "d" *(bytestring value) "e"
//! ```
//!
//! This crate converts between bytes and a [Value] tree in both directions:
//! - [decode] reads exactly one value from a [Source], leaving any trailing input untouched.
//! - [encode] writes one value to a [Sink] in canonical form and returns the number of bytes
//!   written.
//!
//! # Canonical Encoding
//!
//! Dictionary entries are always written in ascending byte-wise order of their keys, so two equal
//! trees encode to identical bytes no matter how they were built. This makes the encoding suitable
//! as input to a hash. Integers are written without leading zeros, and the decoder only accepts
//! that spelling.
//!
//! # Untrusted Input
//!
//! Decoding is bounded by a [Config]: nesting depth, byte string length and (optionally) key order
//! are checked before any recursion or allocation happens. Duplicate dictionary keys are rejected.
//!
//! # Example
//!
//! ```
//! use commonware_bencode::{decode, encode, Value};
//! use std::collections::BTreeMap;
//!
//! // Build a value from native types
//! let value = Value::from(BTreeMap::from([("foo", 5), ("bar", 10)]));
//!
//! // Encode it (keys are sorted)
//! let mut buf = Vec::new();
//! let written = encode(&mut buf, &value).unwrap();
//! assert_eq!(buf, b"d3:bari10e3:fooi5ee");
//! assert_eq!(written, buf.len());
//!
//! // Decode it again
//! let decoded = decode(&mut &buf[..]).unwrap();
//! assert_eq!(decoded, value);
//! assert_eq!(decoded.get("foo").and_then(Value::as_integer), Some(5));
//! ```

pub mod codec;
pub mod config;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod error;
pub mod sink;
pub mod source;
pub mod value;

// Re-export main types and traits
pub use codec::{Decode, Encode, EncodeSize, Read, Write};
pub use config::Config;
pub use decode::{decode, decode_cfg};
pub use encode::encode;
pub use error::Error;
pub use sink::{Sink, Writer};
pub use source::{Reader, Source};
pub use value::{Dictionary, Kind, Value};

use bytes::Bytes;

const INTEGER: u8 = b'i';
const LIST: u8 = b'l';
const DICTIONARY: u8 = b'd';
const END: u8 = b'e';
const SEPARATOR: u8 = b':';
const MINUS: u8 = b'-';

/// Encodes `value` into a new buffer.
pub fn to_bytes(value: &Value) -> Bytes {
    value.encode().freeze()
}

/// Decodes exactly one value from `bytes`, failing with [Error::ExtraData] if any input remains.
pub fn from_bytes(bytes: &[u8]) -> Result<Value, Error> {
    Value::decode(bytes)
}
