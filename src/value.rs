// ABOUTME: Dynamic value tree produced by the CBOR stream decoder.
// ABOUTME: Covers major types 0-5; maps accept any value as a key.

use std::collections::BTreeMap;
use std::fmt;

/// A decoded CBOR value.
///
/// Negative integers hold `-(1 + magnitude)`. Map keys may be any value, so the
/// whole type is totally ordered to serve as a `BTreeMap` key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    /// Major type 0
    UInt(u64),
    /// Major type 1
    NegInt(i64),
    /// Major type 2
    Bytes(Vec<u8>),
    /// Major type 3
    Text(String),
    /// Major type 4
    Array(Vec<Value>),
    /// Major type 5
    Map(BTreeMap<Value, Value>),
}

impl Value {
    /// Build a byte-string value.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    /// Returns true if this value is an integer of either sign.
    #[must_use] pub fn is_integer(&self) -> bool {
        matches!(self, Value::UInt(_) | Value::NegInt(_))
    }

    /// Returns true if this value is a byte string.
    #[must_use] pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    /// Returns true if this value is a text string.
    #[must_use] pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns true if this value is an array.
    #[must_use] pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this value is a map.
    #[must_use] pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// If this is a non-negative integer, returns the value.
    #[must_use] pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(n) => Some(*n),
            _ => None,
        }
    }

    /// If this is an integer that fits in an i64, returns the value.
    #[must_use] pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::UInt(n) => i64::try_from(*n).ok(),
            Value::NegInt(n) => Some(*n),
            _ => None,
        }
    }

    /// If this is a text string, returns a reference to it.
    #[must_use] pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// If this is a byte string, returns a reference to it.
    #[must_use] pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// If this is an array, returns a reference to it.
    #[must_use] pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// If this is a map, returns a reference to it.
    #[must_use] pub fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Index into an array. Returns None if not an array or index out of bounds.
    #[must_use] pub fn get(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|a| a.get(index))
    }

    /// Look up a text key in a map. Returns None if not a map or key not found.
    #[must_use] pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(&Value::Text(key.to_owned())))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::UInt(n) => write!(f, "UInt({n})"),
            Value::NegInt(n) => write!(f, "NegInt({n})"),
            Value::Bytes(b) => write!(f, "Bytes({b:02x?})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::Array(a) => f.debug_tuple("Array").field(a).finish(),
            Value::Map(m) => f.debug_tuple("Map").field(m).finish(),
        }
    }
}

// Display uses CBOR diagnostic notation (RFC 8949 section 8)
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::UInt(n) => write!(f, "{n}"),
            Value::NegInt(n) => write!(f, "{n}"),
            Value::Bytes(b) => {
                write!(f, "h'")?;
                for byte in b {
                    write!(f, "{byte:02x}")?;
                }
                write!(f, "'")
            }
            Value::Text(s) => write!(f, "\"{}\"", s.escape_default()),
            Value::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::NegInt(n) => serializer.serialize_i64(*n),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (key, val) in map {
                    m.serialize_entry(key, val)?;
                }
                m.end()
            }
        }
    }
}

// Convenient From implementations
macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::UInt(u64::from(n))
                }
            }
        )*
    };
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[allow(clippy::cast_sign_loss)] // only non-negative values are cast
                fn from(n: $ty) -> Self {
                    if n < 0 {
                        Value::NegInt(i64::from(n))
                    } else {
                        Value::UInt(n as u64)
                    }
                }
            }
        )*
    };
}

from_unsigned!(u8, u16, u32, u64);
from_signed!(i8, i16, i32, i64);

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<Value, Value>> for Value {
    fn from(m: BTreeMap<Value, Value>) -> Self {
        Value::Map(m)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

/// Macro for building decoded values in JSON-like syntax.
///
/// Map keys may be any expression convertible into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use cbor_stream::cbor;
///
/// let value = cbor!({
///     "name": "test",
///     "values": [1, 2, -3],
///     7: "seven"
/// });
/// assert_eq!(value.get_key("name").and_then(|v| v.as_str()), Some("test"));
/// ```
#[macro_export]
macro_rules! cbor {
    // internal: array elements, collected left to right
    (@array [$($done:expr,)*]) => {
        vec![$($done,)*]
    };
    (@array [$($done:expr,)*] - $num:literal $(, $($rest:tt)*)?) => {
        $crate::cbor!(@array [$($done,)* $crate::Value::from(-$num),] $($($rest)*)?)
    };
    (@array [$($done:expr,)*] $next:tt $(, $($rest:tt)*)?) => {
        $crate::cbor!(@array [$($done,)* $crate::cbor!($next),] $($($rest)*)?)
    };

    // internal: map entries, inserted one at a time
    (@map $map:ident) => {};
    (@map $map:ident - $key:literal : $($rest:tt)*) => {
        $crate::cbor!(@entry $map [$crate::Value::from(-$key)] $($rest)*);
    };
    (@map $map:ident $key:tt : $($rest:tt)*) => {
        $crate::cbor!(@entry $map [$crate::cbor!($key)] $($rest)*);
    };
    (@entry $map:ident [$key:expr] - $value:literal $(, $($rest:tt)*)?) => {
        $map.insert($key, $crate::Value::from(-$value));
        $crate::cbor!(@map $map $($($rest)*)?);
    };
    (@entry $map:ident [$key:expr] $value:tt $(, $($rest:tt)*)?) => {
        $map.insert($key, $crate::cbor!($value));
        $crate::cbor!(@map $map $($($rest)*)?);
    };

    // array
    ([ $($tt:tt)* ]) => {
        $crate::Value::Array($crate::cbor!(@array [] $($tt)*))
    };

    // map
    ({ $($tt:tt)* }) => {
        {
            #[allow(unused_mut)]
            let mut map = std::collections::BTreeMap::new();
            $crate::cbor!(@map map $($tt)*);
            $crate::Value::Map(map)
        }
    };

    // negative literals arrive as two tokens
    (- $num:literal) => {
        $crate::Value::from(-$num)
    };

    // other expressions (numbers, strings, etc.)
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
