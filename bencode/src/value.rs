//! The in-memory value tree shared by the decoder and the encoder.

use bytes::Bytes;
use std::{collections::HashMap, fmt};

/// Mapping from byte string keys to values.
///
/// Iteration order carries no meaning. The encoder sorts keys before emitting them.
pub type Dictionary = HashMap<Bytes, Value>;

/// A decoded (or to-be-encoded) bencode value.
///
/// The set of variants is closed: host types must be converted into a [Value] (see
/// [crate::convert]) before they can be encoded.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// Raw bytes. Not required to be valid UTF-8.
    ByteString(Bytes),
    /// A signed 64-bit integer.
    Integer(i64),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// A mapping from byte string keys to values.
    Dictionary(Dictionary),
}

/// The variant of a [Value], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    ByteString,
    Integer,
    List,
    Dictionary,
}

impl Kind {
    /// Returns a static name for the kind, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ByteString => "byte string",
            Self::Integer => "integer",
            Self::List => "list",
            Self::Dictionary => "dictionary",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Creates a byte string.
    pub fn bytes(value: impl Into<Bytes>) -> Self {
        Self::ByteString(value.into())
    }

    /// Creates an integer.
    pub const fn integer(value: i64) -> Self {
        Self::Integer(value)
    }

    /// Creates an empty list.
    pub const fn list() -> Self {
        Self::List(Vec::new())
    }

    /// Creates an empty dictionary.
    pub fn dictionary() -> Self {
        Self::Dictionary(Dictionary::new())
    }

    /// Returns the variant of this value.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::ByteString(_) => Kind::ByteString,
            Self::Integer(_) => Kind::Integer,
            Self::List(_) => Kind::List,
            Self::Dictionary(_) => Kind::Dictionary,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::ByteString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the byte string as `&str` if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Self::Dictionary(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a dictionary.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.as_dictionary()?.get(key.as_ref())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByteString(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => f.debug_tuple("ByteString").field(&s).finish(),
                Err(_) => f.debug_tuple("ByteString").field(bytes).finish(),
            },
            Self::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Self::List(values) => f.debug_list().entries(values).finish(),
            Self::Dictionary(entries) => {
                // Print in key order so output is stable across runs.
                let mut sorted: Vec<_> = entries.iter().collect();
                sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));
                f.debug_map().entries(sorted).finish()
            }
        }
    }
}

#[cfg(feature = "arbitrary")]
mod fuzz {
    use super::{Dictionary, Value};
    use arbitrary::{Arbitrary, Result, Unstructured};
    use bytes::Bytes;

    /// Nesting depth of generated values.
    const MAX_DEPTH: usize = 8;

    /// Maximum number of children generated for a single list or dictionary.
    const MAX_CHILDREN: usize = 16;

    fn arbitrary_value(u: &mut Unstructured<'_>, depth: usize) -> Result<Value> {
        let max = if depth == 0 { 1 } else { 3 };
        Ok(match u.int_in_range(0..=max)? {
            0 => Value::ByteString(Bytes::from(Vec::<u8>::arbitrary(u)?)),
            1 => Value::Integer(i64::arbitrary(u)?),
            2 => {
                let len = u.int_in_range(0..=MAX_CHILDREN)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(arbitrary_value(u, depth - 1)?);
                }
                Value::List(values)
            }
            _ => {
                let len = u.int_in_range(0..=MAX_CHILDREN)?;
                let mut entries = Dictionary::with_capacity(len);
                for _ in 0..len {
                    let key = Bytes::from(Vec::<u8>::arbitrary(u)?);
                    entries.insert(key, arbitrary_value(u, depth - 1)?);
                }
                Value::Dictionary(entries)
            }
        })
    }

    impl<'a> Arbitrary<'a> for Value {
        fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
            arbitrary_value(u, MAX_DEPTH)
        }
    }
}
