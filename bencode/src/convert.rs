//! Conversions between host types and [Value].
//!
//! The engines only understand the four [Value] variants. This module maps common Rust types onto
//! them (and back) so callers don't have to build trees by hand. Conversions that cannot be
//! represented fail with [Error::UnsupportedValueType].

use crate::{value::Dictionary, Error, Value};
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Self::ByteString(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::ByteString(Bytes::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::ByteString(Bytes::copy_from_slice(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::ByteString(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::ByteString(Bytes::from(value))
    }
}

macro_rules! impl_from_integer {
    ($($type:ty),*) => {
        $(
            impl From<$type> for Value {
                fn from(value: $type) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_try_from_integer {
    ($($type:ty),*) => {
        $(
            impl TryFrom<$type> for Value {
                type Error = Error;

                fn try_from(value: $type) -> Result<Self, Error> {
                    i64::try_from(value)
                        .map(Self::Integer)
                        .map_err(|_| Error::UnsupportedValueType("i64", stringify!($type)))
                }
            }
        )*
    };
}

impl_try_from_integer!(u64, usize, i128, u128);

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

impl<K: Into<Bytes>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(entries: BTreeMap<K, V>) -> Self {
        Self::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<Bytes>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(entries: HashMap<K, V, S>) -> Self {
        Self::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn mismatch(expected: &'static str, found: &Value) -> Error {
    Error::UnsupportedValueType(expected, found.kind().name())
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        value.as_integer().ok_or_else(|| mismatch("integer", &value))
    }
}

impl TryFrom<&Value> for i64 {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Error> {
        value.as_integer().ok_or_else(|| mismatch("integer", value))
    }
}

impl TryFrom<Value> for Bytes {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        match value {
            Value::ByteString(bytes) => Ok(bytes),
            other => Err(mismatch("byte string", &other)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        let bytes = Bytes::try_from(value)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| Error::UnsupportedValueType("utf-8 string", "byte string"))
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        match value {
            Value::List(values) => Ok(values),
            other => Err(mismatch("list", &other)),
        }
    }
}

impl TryFrom<Value> for Dictionary {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        match value {
            Value::Dictionary(entries) => Ok(entries),
            other => Err(mismatch("dictionary", &other)),
        }
    }
}
