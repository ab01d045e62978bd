//! Error types for bencode operations

use bytes::Bytes;
use thiserror::Error;

/// Error type for bencode operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid leading byte: {0:#04x}")]
    InvalidLeadingByte(u8),
    #[error("malformed length")]
    MalformedLength,
    #[error("malformed integer")]
    MalformedInteger,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid key type: {0:#04x}")]
    InvalidKeyType(u8),
    #[error("unsupported value type: expected {0}, found {1}")]
    UnsupportedValueType(&'static str, &'static str), // expected, found
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("depth exceeded: {0}")]
    DepthExceeded(usize),
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
    #[error("duplicate key: {0:?}")]
    DuplicateKey(Bytes),
    #[error("unsorted key: {0:?}")]
    UnsortedKey(Bytes),
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
}
