// ABOUTME: CBOR (RFC 8949) stream decoder for Rust.
// ABOUTME: Decodes byte buffers into a value tree by recursive descent, with serde integration.

//! # cbor_stream
//!
//! A recursive-descent decoder for CBOR (Concise Binary Object Representation)
//! streams.
//!
//! Each item is classified by its major type, its length is resolved from the
//! short form or the 1/2/4-byte extended forms, and arrays and maps are decoded
//! by recursing into the bytes after their header. Every nested decode reports
//! how many bytes it consumed so that the enclosing frame can find the next
//! sibling.
//!
//! ## Quick Start
//!
//! ```rust
//! use cbor_stream::{cbor, decode_value};
//!
//! // {"a": 1, "b": [2, -3]}
//! let bytes = [0xa2, 0x61, b'a', 0x01, 0x61, b'b', 0x82, 0x02, 0x22];
//! let value = decode_value(&bytes).unwrap();
//! assert_eq!(value, cbor!({"a": 1, "b": [2, -3]}));
//! ```
//!
//! ## Deserializing Into Rust Types
//!
//! ```rust
//! use cbor_stream::from_slice;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! // {"name": "Al", "age": 30}
//! let bytes = [0xa2, 0x64, b'n', b'a', b'm', b'e', 0x62, b'A', b'l',
//!              0x63, b'a', b'g', b'e', 0x18, 0x1e];
//! let person: Person = from_slice(&bytes).unwrap();
//! assert_eq!(person, Person { name: "Al".into(), age: 30 });
//! ```
//!
//! ## Supported Subset
//!
//! - Major types 0-5 decode to [`Value`]
//! - Tags (major type 6) are skipped; the tagged item is decoded in their place
//! - Floats and simple values (major type 7) are read and discarded
//! - 8-byte arguments and indefinite lengths are rejected
//! - Duplicate map keys: last write wins (configurable)
//!
//! ## Resource Limits
//!
//! Default limits:
//! - Maximum document size: 2 GB
//! - Maximum nesting depth: 512

pub mod byte_order;
pub mod de;
pub mod decoder;
pub mod error;
pub mod header;
pub mod map;
pub mod types;
pub mod value;

// Re-export commonly used items at the crate root
pub use byte_order::{ByteOrderReader, Endianness};
pub use de::{from_slice, from_slice_with_config, from_value};
pub use decoder::{Decoder, DecoderConfig, ResultSequence};
pub use error::{Error, Result};
pub use header::{parse_next, Item, ItemBody};
pub use map::{pairs_to_map, DuplicateKeyMode};
pub use types::{length_info, limits, major_type, MajorType};
pub use value::Value;

// The cbor! macro is automatically exported at crate root via #[macro_export]

/// Decode every item in a CBOR stream.
///
/// # Example
///
/// ```rust
/// use cbor_stream::{decode, Value};
///
/// let values = decode(&[0x01, 0x20, 0x80]).unwrap();
/// assert_eq!(values, vec![Value::UInt(1), Value::NegInt(-1), Value::Array(vec![])]);
/// ```
pub fn decode(data: &[u8]) -> Result<Vec<Value>> {
    decode_with_config(data, DecoderConfig::default())
}

/// Decode every item in a CBOR stream with custom configuration.
pub fn decode_with_config(data: &[u8], config: DecoderConfig) -> Result<Vec<Value>> {
    let seq = Decoder::with_config(data, config).decode()?;
    Ok(seq.into_values())
}

/// Decode a CBOR stream that holds exactly one item.
///
/// # Example
///
/// ```rust
/// use cbor_stream::{decode_value, Error};
///
/// assert_eq!(decode_value(&[0x64, b'I', b'E', b'T', b'F']).unwrap().as_str(), Some("IETF"));
/// assert_eq!(decode_value(&[0x01, 0x02]), Err(Error::ExpectedSingleValue(2)));
/// ```
pub fn decode_value(data: &[u8]) -> Result<Value> {
    de::single_value(decode(data)?)
}
