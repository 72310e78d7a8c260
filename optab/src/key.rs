use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};

/// Numeric opcode identifier within one opcode group.
///
/// Database keys are hexadecimal strings such as `"0x1A"`. Keys compare by
/// their numeric value, so `"0x1a"` and `"0x1A"` name the same opcode and
/// `"0x0B"` sorts before `"0x1A"` regardless of how the source map was
/// ordered.
///
/// ```
/// use optab::OpcodeKey;
///
/// let key: OpcodeKey = "0x1a".parse().unwrap();
/// assert_eq!(key.value(), 0x1A);
/// assert_eq!(key.to_string(), "0x1A");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpcodeKey(u32);

impl OpcodeKey {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Numeric value of the opcode.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Whether the opcode fits in a single encoded byte.
    #[inline]
    pub const fn is_byte(&self) -> bool {
        self.0 <= 0xFF
    }
}

/// Error returned when a key is not a hexadecimal opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(String);

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid opcode key '{}'", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for OpcodeKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        // from_str_radix would accept a leading '+'.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseKeyError(s.to_owned()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ParseKeyError(s.to_owned()))
    }
}

impl fmt::Display for OpcodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

impl fmt::Debug for OpcodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpcodeKey({self})")
    }
}

impl From<u8> for OpcodeKey {
    fn from(byte: u8) -> Self {
        Self(byte as u32)
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = OpcodeKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a hexadecimal opcode key such as \"0x1A\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<OpcodeKey, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for OpcodeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Unquoted YAML keys such as `10:` must stay hex, not decimal.
        deserializer.deserialize_str(KeyVisitor)
    }
}
