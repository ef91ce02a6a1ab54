// ABOUTME: Serde Deserializer implementation over decoded CBOR values.
// ABOUTME: Allows CBOR bytes to be decoded into any serde-deserializable Rust type.

use crate::decoder::{Decoder, DecoderConfig};
use crate::error::{Error, Result};
use crate::value::Value;
use serde::de::value::{MapAccessDeserializer, MapDeserializer, SeqDeserializer};
use serde::de::{self, DeserializeOwned, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Deserialize a value from a CBOR byte slice.
///
/// The input must hold exactly one top-level item.
///
/// # Errors
///
/// Returns an error if:
/// - The data is malformed or truncated
/// - The input holds zero or several top-level items
/// - The data doesn't match the expected type `T`
pub fn from_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    from_slice_with_config(data, DecoderConfig::default())
}

/// Deserialize a value from a CBOR byte slice with custom configuration.
///
/// # Errors
///
/// Same as [`from_slice`], plus any configured limit being exceeded.
pub fn from_slice_with_config<T: DeserializeOwned>(data: &[u8], config: DecoderConfig) -> Result<T> {
    let value = single_value(Decoder::with_config(data, config).decode()?.into_values())?;
    from_value(value)
}

/// Deserialize a `T` from an already decoded [`Value`].
///
/// # Errors
///
/// Returns an error if the value doesn't match the expected type `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(value)
}

pub(crate) fn single_value(values: Vec<Value>) -> Result<Value> {
    let count = values.len();
    let mut iter = values.into_iter();
    match (iter.next(), iter.next()) {
        (Some(value), None) => Ok(value),
        _ => Err(Error::ExpectedSingleValue(count)),
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            Value::UInt(n) => visitor.visit_u64(n),
            Value::NegInt(n) => visitor.visit_i64(n),
            Value::Bytes(b) => visitor.visit_byte_buf(b),
            Value::Text(s) => visitor.visit_string(s),
            Value::Array(arr) => {
                let mut seq = SeqDeserializer::<_, Error>::new(arr.into_iter());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            Value::Map(map) => {
                let mut access = MapDeserializer::<_, Error>::new(map.into_iter());
                let value = visitor.visit_map(&mut access)?;
                access.end()?;
                Ok(value)
            }
        }
    }

    // Absent values are not representable, so any present value is `Some`.
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self {
            // Unit variant by name
            Value::Text(s) => visitor.visit_enum(s.into_deserializer()),
            // {variant: content}
            Value::Map(map) if map.len() == 1 => {
                let access = MapDeserializer::<_, Error>::new(map.into_iter());
                visitor.visit_enum(MapAccessDeserializer::new(access))
            }
            other => Err(de::Error::invalid_type(unexpected(&other), &"string or single-entry map")),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::UInt(n) => de::Unexpected::Unsigned(*n),
        Value::NegInt(n) => de::Unexpected::Signed(*n),
        Value::Bytes(b) => de::Unexpected::Bytes(b),
        Value::Text(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Map(_) => de::Unexpected::Map,
    }
}

#[cfg(test)]
#[path = "de_tests.rs"]
mod tests;
