//! Limits and policies applied while decoding.

/// Default maximum nesting depth of lists and dictionaries.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum length of a single byte string (16 MB).
pub const DEFAULT_MAX_LENGTH: usize = 16 * 1024 * 1024;

/// Configuration for decoding untrusted input.
///
/// Every field bounds the resources a single call to [crate::decode_cfg] may consume, so that
/// adversarial input fails with an error instead of exhausting the stack or memory.
///
/// # Examples
///
/// ```
/// use commonware_bencode::{decode_cfg, Config, Error};
///
/// let cfg = Config {
///     max_depth: 1,
///     ..Config::default()
/// };
/// assert!(decode_cfg(&mut &b"li1ee"[..], &cfg).is_ok());
/// assert!(matches!(
///     decode_cfg(&mut &b"llee"[..], &cfg),
///     Err(Error::DepthExceeded(1))
/// ));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Config {
    /// The maximum number of lists and dictionaries that may enclose a value.
    ///
    /// A top-level list has depth 1. A depth of 0 only admits byte strings and integers.
    pub max_depth: usize,

    /// The maximum length (in bytes) of any byte string, including dictionary keys.
    pub max_length: usize,

    /// Whether dictionary keys must appear in strictly ascending order.
    ///
    /// Canonical input always satisfies this, so enabling it rejects any input that would not
    /// re-encode to the same bytes because of key order.
    pub require_sorted_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: DEFAULT_MAX_LENGTH,
            require_sorted_keys: false,
        }
    }
}

impl Config {
    /// Returns a configuration that only accepts canonically ordered dictionaries.
    pub fn canonical() -> Self {
        Self {
            require_sorted_keys: true,
            ..Self::default()
        }
    }
}
