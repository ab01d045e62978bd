//! Canonical encoder.
//!
//! Every value has exactly one encoding: integers are written without leading zeros or a `+` sign
//! and dictionary entries are written in ascending byte-wise order of their keys, regardless of the
//! order in which they were inserted. Equal value trees therefore always encode to identical bytes.

use crate::{
    value::Dictionary, Error, Sink, Value, DICTIONARY, END, INTEGER, LIST, MINUS, SEPARATOR,
};
use bytes::Bytes;

/// Number of decimal digits in `u64::MAX`.
const MAX_DIGITS: usize = 20;

/// Encodes `value` into `sink`, returning the number of bytes written.
///
/// The first failure reported by `sink` aborts the encoding and is returned as-is. Bytes already
/// accepted by `sink` are not rolled back.
pub fn encode(sink: &mut impl Sink, value: &Value) -> Result<usize, Error> {
    match value {
        Value::ByteString(bytes) => encode_string(sink, bytes),
        Value::Integer(value) => encode_integer(sink, *value),
        Value::List(values) => encode_list(sink, values),
        Value::Dictionary(entries) => encode_dictionary(sink, entries),
    }
}

/// Returns the exact number of bytes [encode] writes for `value`.
pub fn encoded_size(value: &Value) -> usize {
    match value {
        Value::ByteString(bytes) => string_size(bytes),
        Value::Integer(value) => 2 + usize::from(*value < 0) + digits(value.unsigned_abs()),
        Value::List(values) => 2 + values.iter().map(encoded_size).sum::<usize>(),
        Value::Dictionary(entries) => {
            2 + entries
                .iter()
                .map(|(key, value)| string_size(key) + encoded_size(value))
                .sum::<usize>()
        }
    }
}

/// Returns the entries of `entries` in canonical order.
///
/// Keys compare byte-wise; a key that is a prefix of another sorts first.
pub fn sorted(entries: &Dictionary) -> Vec<(&Bytes, &Value)> {
    let mut sorted: Vec<_> = entries.iter().collect();
    // Keys are unique, so an unstable sort is still deterministic.
    sorted.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    sorted
}

fn put(sink: &mut impl Sink, bytes: &[u8]) -> Result<usize, Error> {
    sink.emit(bytes)?;
    Ok(bytes.len())
}

fn digits(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Writes the decimal form of `value` into the tail of `buf`, returning the written part.
fn decimal(mut value: u64, buf: &mut [u8; MAX_DIGITS]) -> &[u8] {
    let mut start = MAX_DIGITS;
    loop {
        start -= 1;
        buf[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            return &buf[start..];
        }
    }
}

fn string_size(bytes: &[u8]) -> usize {
    digits(bytes.len() as u64) + 1 + bytes.len()
}

fn encode_string(sink: &mut impl Sink, bytes: &[u8]) -> Result<usize, Error> {
    let mut buf = [0u8; MAX_DIGITS];
    let mut written = put(sink, decimal(bytes.len() as u64, &mut buf))?;
    written += put(sink, &[SEPARATOR])?;
    written += put(sink, bytes)?;
    Ok(written)
}

fn encode_integer(sink: &mut impl Sink, value: i64) -> Result<usize, Error> {
    let mut buf = [0u8; MAX_DIGITS];
    let mut written = put(sink, &[INTEGER])?;
    if value < 0 {
        written += put(sink, &[MINUS])?;
    }
    written += put(sink, decimal(value.unsigned_abs(), &mut buf))?;
    written += put(sink, &[END])?;
    Ok(written)
}

fn encode_list(sink: &mut impl Sink, values: &[Value]) -> Result<usize, Error> {
    let mut written = put(sink, &[LIST])?;
    for value in values {
        written += encode(sink, value)?;
    }
    written += put(sink, &[END])?;
    Ok(written)
}

fn encode_dictionary(sink: &mut impl Sink, entries: &Dictionary) -> Result<usize, Error> {
    let mut written = put(sink, &[DICTIONARY])?;
    for (key, value) in sorted(entries) {
        written += encode_string(sink, key)?;
        written += encode(sink, value)?;
    }
    written += put(sink, &[END])?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Writer;
    use std::io::{self, ErrorKind};
    use test_case::test_case;

    fn encode_vec(value: &Value) -> Vec<u8> {
        let mut sink = Vec::new();
        let written = encode(&mut sink, value).unwrap();
        assert_eq!(written, sink.len());
        assert_eq!(encoded_size(value), sink.len());
        sink
    }

    fn dictionary<const N: usize>(entries: [(&'static [u8], Value); N]) -> Value {
        Value::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (Bytes::from_static(k), v))
                .collect(),
        )
    }

    #[test_case(Value::bytes("foo"), b"3:foo"; "string")]
    #[test_case(Value::bytes(""), b"0:"; "empty string")]
    #[test_case(Value::bytes(vec![0u8; 10]), b"10:\0\0\0\0\0\0\0\0\0\0"; "binary string")]
    #[test_case(Value::bytes("héllo"), "6:héllo".as_bytes(); "multibyte string")]
    #[test_case(Value::integer(500), b"i500e"; "integer")]
    #[test_case(Value::integer(0), b"i0e"; "zero")]
    #[test_case(Value::integer(-3), b"i-3e"; "negative")]
    #[test_case(Value::integer(i64::MAX), b"i9223372036854775807e"; "max integer")]
    #[test_case(Value::integer(i64::MIN), b"i-9223372036854775808e"; "min integer")]
    #[test_case(Value::List(vec![Value::integer(30), Value::integer(2)]), b"li30ei2ee"; "list")]
    #[test_case(Value::list(), b"le"; "empty list")]
    #[test_case(Value::dictionary(), b"de"; "empty dictionary")]
    #[test_case(
        dictionary([(b"foo", Value::integer(5)), (b"bar", Value::integer(10))]),
        b"d3:bari10e3:fooi5ee";
        "dictionary sorted by key"
    )]
    #[test_case(
        dictionary([(b"b", Value::integer(1)), (b"aa", Value::integer(2)), (b"a", Value::integer(3))]),
        b"d1:ai3e2:aai2e1:bi1ee";
        "prefix sorts first"
    )]
    #[test_case(
        dictionary([(b"\xff", Value::integer(1)), (b"z", Value::integer(2)), (b"", Value::integer(3))]),
        b"d0:i3e1:zi2e1:\xffi1ee";
        "byte-wise order"
    )]
    #[test_case(
        Value::List(vec![dictionary([(b"k", Value::List(vec![Value::bytes("v")]))]), Value::list()]),
        b"ld1:kl1:veelee";
        "nested"
    )]
    fn test_encode(value: Value, expected: &[u8]) {
        assert_eq!(encode_vec(&value), expected);
    }

    #[test]
    fn test_canonical_determinism() {
        let keys: Vec<Vec<u8>> = (0..200u32)
            .map(|i| i.wrapping_mul(2_654_435_761).to_be_bytes().to_vec())
            .collect();

        let mut forward = Dictionary::new();
        for (i, key) in keys.iter().enumerate() {
            forward.insert(Bytes::from(key.clone()), Value::integer(i as i64));
        }
        let mut backward = Dictionary::with_capacity(1024);
        for (i, key) in keys.iter().enumerate().rev() {
            backward.insert(Bytes::from(key.clone()), Value::integer(i as i64));
        }

        let forward = Value::Dictionary(forward);
        let backward = Value::Dictionary(backward);
        let encoded = encode_vec(&forward);
        assert_eq!(encoded, encode_vec(&backward));
        assert_eq!(encoded, encode_vec(&forward));
    }

    #[test]
    fn test_sorted() {
        let value = dictionary([
            (b"b", Value::integer(1)),
            (b"ab", Value::integer(2)),
            (b"a", Value::integer(3)),
        ]);
        let keys: Vec<_> = sorted(value.as_dictionary().unwrap())
            .into_iter()
            .map(|(key, _)| key.clone())
            .collect();
        assert_eq!(keys, [&b"a"[..], b"ab", b"b"]);
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(u64::MAX), MAX_DIGITS);
        let mut buf = [0u8; MAX_DIGITS];
        assert_eq!(decimal(u64::MAX, &mut buf), b"18446744073709551615");
        assert_eq!(decimal(0, &mut buf), b"0");
    }

    #[test]
    fn test_fixed_sink_overflow() {
        let value = Value::List(vec![Value::bytes("hello"), Value::integer(1)]);
        let mut storage = [0u8; 6];
        let mut sink = &mut storage[..];
        match encode(&mut sink, &value) {
            Err(Error::Io(err)) => assert_eq!(err.kind(), ErrorKind::WriteZero),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    /// Accepts `limit` bytes, then fails every write.
    struct Limited {
        limit: usize,
        accepted: Vec<u8>,
    }

    impl io::Write for Limited {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit - self.accepted.len();
            if room == 0 {
                return Err(io::Error::other("sink full"));
            }
            let n = room.min(buf.len());
            self.accepted.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_aborts() {
        let value = dictionary([
            (b"a", Value::List(vec![Value::integer(1), Value::integer(2)])),
            (b"b", Value::bytes("tail")),
        ]);
        let full = encode_vec(&value);
        for limit in 0..full.len() {
            let mut writer = Writer::new(Limited {
                limit,
                accepted: Vec::new(),
            });
            assert!(matches!(encode(&mut writer, &value), Err(Error::Io(_))));
            let accepted = writer.into_inner().accepted;
            assert_eq!(accepted, full[..limit]);
        }

        let mut writer = Writer::new(Limited {
            limit: full.len(),
            accepted: Vec::new(),
        });
        assert_eq!(encode(&mut writer, &value).unwrap(), full.len());
        assert_eq!(writer.written(), full.len() as u64);
    }
}
