//! Recursive-descent decoder.
//!
//! [decode_value] peeks at the next byte to select one of four leaf decoders. The list and
//! dictionary decoders call back into [decode_value] for their elements, so the call depth equals
//! the nesting depth of the input, which is bounded by [Config::max_depth].

use crate::{
    value::{Dictionary, Kind},
    Config, Error, Source, Value, DICTIONARY, END, INTEGER, LIST, MINUS, SEPARATOR,
};
use bytes::Bytes;
use tracing::debug;

/// Decodes one value from `source` using the default [Config].
///
/// On success, `source` is positioned immediately after the value, so concatenated values can be
/// decoded by calling this repeatedly. On failure, the number of bytes consumed is unspecified.
pub fn decode(source: &mut impl Source) -> Result<Value, Error> {
    decode_cfg(source, &Config::default())
}

/// Decodes one value from `source`, enforcing the limits in `cfg`.
pub fn decode_cfg(source: &mut impl Source, cfg: &Config) -> Result<Value, Error> {
    decode_value(source, cfg, 0)
}

/// Returns the production that starts at the next unread byte, without consuming it.
pub fn select_decoder(source: &mut impl Source) -> Result<Kind, Error> {
    match source.peek()? {
        Some(b'0'..=b'9') => Ok(Kind::ByteString),
        Some(INTEGER) => Ok(Kind::Integer),
        Some(LIST) => Ok(Kind::List),
        Some(DICTIONARY) => Ok(Kind::Dictionary),
        Some(byte) => Err(Error::InvalidLeadingByte(byte)),
        None => Err(Error::UnexpectedEndOfInput),
    }
}

fn decode_value(source: &mut impl Source, cfg: &Config, depth: usize) -> Result<Value, Error> {
    match select_decoder(source)? {
        Kind::ByteString => decode_string(source, cfg).map(Value::ByteString),
        Kind::Integer => decode_integer(source).map(Value::Integer),
        Kind::List => decode_list(source, cfg, depth),
        Kind::Dictionary => decode_dictionary(source, cfg, depth),
    }
}

/// Returns the depth of the children of a container opened at `depth`.
fn enter(cfg: &Config, depth: usize) -> Result<usize, Error> {
    if depth >= cfg.max_depth {
        debug!(max_depth = cfg.max_depth, "nesting exceeds maximum depth");
        return Err(Error::DepthExceeded(cfg.max_depth));
    }
    Ok(depth + 1)
}

fn expect(source: &mut impl Source, marker: u8) -> Result<(), Error> {
    match source.read_u8()? {
        Some(byte) if byte == marker => Ok(()),
        Some(byte) => Err(Error::InvalidLeadingByte(byte)),
        None => Err(Error::UnexpectedEndOfInput),
    }
}

fn next(source: &mut impl Source) -> Result<u8, Error> {
    source.read_u8()?.ok_or(Error::UnexpectedEndOfInput)
}

/// Reads the decimal length prefix of a byte string, including its trailing separator.
///
/// Leading zeros are rejected (except for the length `0` itself), so every length has exactly one
/// accepted spelling. Overflow bounds the number of digits consumed.
fn read_length(source: &mut impl Source) -> Result<u64, Error> {
    let mut len: u64 = 0;
    let mut digits = 0usize;
    loop {
        let byte = next(source)?;
        match byte {
            SEPARATOR if digits > 0 => return Ok(len),
            b'0'..=b'9' => {
                if digits == 1 && len == 0 {
                    return Err(Error::MalformedLength);
                }
                len = len
                    .checked_mul(10)
                    .and_then(|len| len.checked_add(u64::from(byte - b'0')))
                    .ok_or(Error::MalformedLength)?;
                digits += 1;
            }
            _ => return Err(Error::MalformedLength),
        }
    }
}

fn decode_string(source: &mut impl Source, cfg: &Config) -> Result<Bytes, Error> {
    let len = read_length(source)?;
    let len = usize::try_from(len).unwrap_or(usize::MAX);
    if len > cfg.max_length {
        debug!(len, max_length = cfg.max_length, "byte string too long");
        return Err(Error::LengthExceeded(len, cfg.max_length));
    }
    source.read_bytes(len)
}

/// Decodes `i[-]<digits>e`.
///
/// Only the canonical spelling is accepted: no leading zeros, no `-0`, no `+`. Digits are
/// accumulated towards the sign of the result so that `i64::MIN` does not overflow.
fn decode_integer(source: &mut impl Source) -> Result<i64, Error> {
    expect(source, INTEGER)?;
    let negative = source.peek()? == Some(MINUS);
    if negative {
        next(source)?;
    }

    let mut value: i64 = 0;
    let mut digits = 0usize;
    loop {
        let byte = next(source)?;
        match byte {
            END if digits > 0 => break,
            b'0'..=b'9' => {
                if digits == 1 && value == 0 {
                    return Err(Error::MalformedInteger);
                }
                let digit = i64::from(byte - b'0');
                value = value
                    .checked_mul(10)
                    .and_then(|value| {
                        if negative {
                            value.checked_sub(digit)
                        } else {
                            value.checked_add(digit)
                        }
                    })
                    .ok_or(Error::MalformedInteger)?;
                digits += 1;
            }
            _ => return Err(Error::MalformedInteger),
        }
    }

    if negative && value == 0 {
        return Err(Error::MalformedInteger);
    }
    Ok(value)
}

fn decode_list(source: &mut impl Source, cfg: &Config, depth: usize) -> Result<Value, Error> {
    let depth = enter(cfg, depth)?;
    expect(source, LIST)?;
    let mut values = Vec::new();
    loop {
        match source.peek()? {
            Some(END) => {
                next(source)?;
                return Ok(Value::List(values));
            }
            Some(_) => values.push(decode_value(source, cfg, depth)?),
            None => return Err(Error::UnexpectedEndOfInput),
        }
    }
}

fn decode_dictionary(source: &mut impl Source, cfg: &Config, depth: usize) -> Result<Value, Error> {
    let depth = enter(cfg, depth)?;
    expect(source, DICTIONARY)?;
    let mut entries = Dictionary::new();
    let mut last: Option<Bytes> = None;
    loop {
        let byte = match source.peek()? {
            Some(END) => {
                next(source)?;
                return Ok(Value::Dictionary(entries));
            }
            Some(byte) => byte,
            None => return Err(Error::UnexpectedEndOfInput),
        };

        // Keys must be byte strings
        if select_decoder(source)? != Kind::ByteString {
            debug!(byte, "dictionary key is not a byte string");
            return Err(Error::InvalidKeyType(byte));
        }
        let key = decode_string(source, cfg)?;
        if entries.contains_key(&key) {
            debug!(?key, "duplicate dictionary key");
            return Err(Error::DuplicateKey(key));
        }
        if cfg.require_sorted_keys {
            if let Some(previous) = &last {
                if key < *previous {
                    debug!(?key, ?previous, "dictionary keys out of order");
                    return Err(Error::UnsortedKey(key));
                }
            }
            last = Some(key.clone());
        }

        let value = decode_value(source, cfg, depth)?;
        entries.insert(key, value);
    }
}
