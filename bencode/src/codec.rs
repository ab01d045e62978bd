//! Buffer-oriented traits for encoding and decoding values.
//!
//! These wrap the engines in [crate::decode] and [crate::encode] for the common case of working
//! with in-memory [Buf] and [BufMut] buffers.

use crate::{decode::decode_cfg, encode, Config, Error, Value};
use bytes::{Buf, BufMut, BytesMut};

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Implementations should panic if the buffer doesn't have enough capacity.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that know the exact length of their encoding.
pub trait EncodeSize {
    /// Returns the encoded length of this value.
    ///
    /// This method MUST return the exact number of bytes that will be written by `write()`.
    fn encode_size(&self) -> usize;
}

/// Trait for types that can be encoded to a fresh buffer.
pub trait Encode: Write + EncodeSize {
    /// Encodes a value to a `BytesMut` buffer.
    ///
    /// Panics if the `write` implementation does not write the expected number of bytes.
    ///
    /// (Provided method).
    fn encode(&self) -> BytesMut {
        let len = self.encode_size();
        let mut buffer = BytesMut::with_capacity(len);
        self.write(&mut buffer);
        assert_eq!(buffer.len(), len, "write() did not write expected bytes");
        buffer
    }
}

// Automatically implement `Encode` for types that implement `Write` and `EncodeSize`.
impl<T: Write + EncodeSize> Encode for T {}

/// Trait for types that can be read (decoded) from a buffer.
pub trait Read: Sized {
    /// Configuration bounding what may be read.
    type Cfg: Default;

    /// Reads a value from the buffer using the provided configuration `cfg`, consuming the
    /// necessary bytes. Trailing bytes are left in the buffer.
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error>;

    /// Reads a value using the default config.
    ///
    /// (Provided method).
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        Self::read_cfg(buf, &Default::default())
    }
}

/// Trait for types that can be decoded from a buffer, ensuring the entire buffer is consumed.
pub trait Decode: Read {
    /// Decodes a value from a buffer, failing with [Error::ExtraData] if any bytes remain.
    ///
    /// (Provided method).
    fn decode_cfg(mut buf: impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        let result = Self::read_cfg(&mut buf, cfg)?;

        // Check that the buffer is fully consumed.
        let remaining = buf.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }

        Ok(result)
    }

    /// Decodes a value using the default config.
    ///
    /// (Provided method).
    fn decode(buf: impl Buf) -> Result<Self, Error> {
        Self::decode_cfg(buf, &Default::default())
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

impl Write for Value {
    fn write(&self, buf: &mut impl BufMut) {
        if let Err(err) = encode::encode(buf, self) {
            panic!("write: {err}");
        }
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        encode::encoded_size(self)
    }
}

impl Read for Value {
    type Cfg = Config;

    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, Error> {
        decode_cfg(buf, cfg)
    }
}
