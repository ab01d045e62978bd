//! Byte sources consumed by the decoder.
//!
//! The decoder needs exactly three things from its input: a one-byte look-ahead, single-byte
//! consumption, and bounded bulk consumption. Any [Buf] (slices, [Bytes], [bytes::BytesMut],
//! chains) provides these directly. Blocking readers are supported by wrapping any
//! [std::io::BufRead] in a [Reader].

use crate::Error;
use bytes::{Buf, Bytes};
use std::io::{self, BufRead, ErrorKind, Read as _};

/// A byte source with single-byte look-ahead.
pub trait Source {
    /// Returns the next byte without consuming it, or `None` at the end of input.
    fn peek(&mut self) -> Result<Option<u8>, Error>;

    /// Consumes and returns the next byte, or `None` at the end of input.
    fn read_u8(&mut self) -> Result<Option<u8>, Error>;

    /// Consumes exactly `len` bytes.
    ///
    /// Fails with [Error::UnexpectedEndOfInput] if fewer than `len` bytes remain.
    fn read_bytes(&mut self, len: usize) -> Result<Bytes, Error>;

    /// Returns true if no input remains.
    fn is_exhausted(&mut self) -> Result<bool, Error> {
        Ok(self.peek()?.is_none())
    }
}

impl<B: Buf> Source for B {
    #[inline]
    fn peek(&mut self) -> Result<Option<u8>, Error> {
        Ok(self.chunk().first().copied())
    }

    #[inline]
    fn read_u8(&mut self) -> Result<Option<u8>, Error> {
        if !self.has_remaining() {
            return Ok(None);
        }
        Ok(Some(self.get_u8()))
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> Result<Bytes, Error> {
        if self.remaining() < len {
            return Err(Error::UnexpectedEndOfInput);
        }
        Ok(self.copy_to_bytes(len))
    }
}

/// Adapts a [BufRead] into a [Source].
///
/// I/O failures surface as [Error::Io]. Interrupted reads are retried.
#[derive(Debug)]
pub struct Reader<R: BufRead> {
    inner: R,
    position: u64,
}

impl<R: BufRead> Reader<R> {
    /// Wraps `inner`, starting at position 0.
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the underlying reader, including any bytes it has buffered but not yet consumed.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R: BufRead> Source for Reader<R> {
    fn peek(&mut self) -> Result<Option<u8>, Error> {
        Ok(self.fill()?)
    }

    fn read_u8(&mut self) -> Result<Option<u8>, Error> {
        let byte = self.fill()?;
        if byte.is_some() {
            self.inner.consume(1);
            self.position += 1;
        }
        Ok(byte)
    }

    fn read_bytes(&mut self, len: usize) -> Result<Bytes, Error> {
        // Grow the buffer as bytes arrive rather than trusting `len` up front.
        let mut buf = Vec::new();
        let read = io::Read::take(&mut self.inner, len as u64).read_to_end(&mut buf)?;
        self.position += read as u64;
        if read < len {
            return Err(Error::UnexpectedEndOfInput);
        }
        Ok(Bytes::from(buf))
    }
}
