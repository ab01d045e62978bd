//! Byte sinks written by the encoder.

use crate::Error;
use bytes::BufMut;
use std::io::{self, ErrorKind};

/// A byte sink accepting sequential writes.
pub trait Sink {
    /// Appends all of `bytes` to the sink, or fails without retrying.
    fn emit(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

/// Any [BufMut] is a sink. Running out of capacity (for example, when writing into a fixed
/// `&mut [u8]`) fails with [ErrorKind::WriteZero] instead of panicking.
impl<B: BufMut> Sink for B {
    #[inline]
    fn emit(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.remaining_mut() < bytes.len() {
            return Err(io::Error::from(ErrorKind::WriteZero).into());
        }
        self.put_slice(bytes);
        Ok(())
    }
}

/// Adapts an [io::Write] into a [Sink].
#[derive(Debug)]
pub struct Writer<W: io::Write> {
    inner: W,
    written: u64,
}

impl<W: io::Write> Writer<W> {
    /// Wraps `inner` with a written count of 0.
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Returns the number of bytes accepted by the underlying writer so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<(), Error> {
        Ok(self.inner.flush()?)
    }

    /// Returns the underlying writer without flushing it.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Sink for Writer<W> {
    fn emit(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_buf_mut_sink() {
        let mut sink = BytesMut::new();
        sink.emit(b"ab").unwrap();
        sink.emit(b"").unwrap();
        sink.emit(b"c").unwrap();
        assert_eq!(&sink[..], b"abc");

        let mut sink = Vec::new();
        sink.emit(b"xyz").unwrap();
        assert_eq!(sink, b"xyz");
    }

    #[test]
    fn test_fixed_sink_overflow() {
        let mut storage = [0u8; 3];
        let mut sink = &mut storage[..];
        sink.emit(b"ab").unwrap();
        match sink.emit(b"cd") {
            Err(Error::Io(err)) => assert_eq!(err.kind(), ErrorKind::WriteZero),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(&storage[..2], b"ab");
    }

    #[test]
    fn test_writer() {
        let mut writer = Writer::new(Vec::new());
        writer.emit(b"hello").unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.written(), 5);
        assert_eq!(writer.into_inner(), b"hello");
    }

    struct Failing;

    impl io::Write for Failing {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_error() {
        let mut writer = Writer::new(Failing);
        assert!(matches!(writer.emit(b"x"), Err(Error::Io(_))));
        assert_eq!(writer.written(), 0);
    }
}
