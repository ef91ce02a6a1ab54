// ABOUTME: Recursive-descent CBOR stream decoder.
// ABOUTME: Walks items header by header and recurses into arrays and maps, reporting bytes consumed.

#![allow(clippy::missing_errors_doc)]

use crate::byte_order::ByteOrderReader;
use crate::error::{Error, Result};
use crate::header::{self, ItemBody};
use crate::map::{pairs_to_map, DuplicateKeyMode};
use crate::types::{limits, MajorType};
use crate::value::Value;

/// Validate and convert bytes to a UTF-8 string.
/// Uses simdutf8 for SIMD-accelerated validation when the feature is enabled.
#[cfg(feature = "simd-utf8")]
#[inline]
fn validate_utf8(bytes: &[u8]) -> Result<&str> {
    simdutf8::basic::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
}

#[cfg(not(feature = "simd-utf8"))]
#[inline]
fn validate_utf8(bytes: &[u8]) -> Result<&str> {
    Ok(std::str::from_utf8(bytes)?)
}

/// Configuration options for the decoder.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Maximum container nesting depth
    pub max_depth: usize,
    /// Maximum document size in bytes
    pub max_document_size: usize,
    /// How to handle duplicate map keys (default: KeepLast)
    pub duplicate_key_mode: DuplicateKeyMode,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: limits::MAX_DEPTH,
            max_document_size: limits::MAX_DOCUMENT_SIZE,
            duplicate_key_mode: DuplicateKeyMode::default(),
        }
    }
}

/// The values decoded from one window, plus how far into the window decoding got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSequence {
    values: Vec<Value>,
    items: usize,
    bytes_consumed: usize,
}

impl ResultSequence {
    /// The decoded values, in stream order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the sequence, returning the decoded values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Number of items read. Differs from `values().len()` when floats or
    /// simple values were dropped.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items
    }

    /// Bytes read from the start of the window.
    #[must_use]
    pub fn bytes_consumed(&self) -> usize {
        self.bytes_consumed
    }
}

impl std::ops::Deref for ResultSequence {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.values
    }
}

/// A CBOR decoder over a byte slice.
///
/// The input is only ever borrowed immutably, so decoding the same decoder
/// twice yields equal results.
pub struct Decoder<'a> {
    data: &'a [u8],
    config: DecoderConfig,
    reader: ByteOrderReader,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder for the given data.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, DecoderConfig::default())
    }

    /// Create a new decoder with custom configuration.
    #[must_use]
    pub fn with_config(data: &'a [u8], config: DecoderConfig) -> Self {
        Self::with_reader(data, config, ByteOrderReader::native())
    }

    /// Create a new decoder with custom configuration and byte-order reader.
    #[must_use]
    pub fn with_reader(data: &'a [u8], config: DecoderConfig, reader: ByteOrderReader) -> Self {
        Self {
            data,
            config,
            reader,
        }
    }

    /// Get the decoder configuration.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Check the whole input against the document size limit.
    #[inline]
    pub fn check_document_size(&self) -> Result<()> {
        if self.data.len() > self.config.max_document_size {
            return Err(Error::MaxDocumentSizeExceeded);
        }
        Ok(())
    }

    /// Decode every item in the input.
    pub fn decode(&self) -> Result<ResultSequence> {
        self.decode_stream(self.data, None)
    }

    /// Decode items from `window` until it is exhausted or, when
    /// `expected_count` is given, until that many items have been read.
    ///
    /// Trailing bytes past the last counted item are left unread and are not
    /// included in [`ResultSequence::bytes_consumed`].
    ///
    /// The window is held to the same size limit as the whole document.
    pub fn decode_stream(&self, window: &[u8], expected_count: Option<usize>) -> Result<ResultSequence> {
        if window.len() > self.config.max_document_size {
            return Err(Error::MaxDocumentSizeExceeded);
        }
        self.decode_at_depth(window, expected_count, 0)
    }

    fn decode_at_depth(
        &self,
        window: &[u8],
        expected_count: Option<usize>,
        depth: usize,
    ) -> Result<ResultSequence> {
        if depth > self.config.max_depth {
            return Err(Error::MaxDepthExceeded);
        }

        // Every item takes at least one byte, so the window bounds the allocation.
        let capacity = expected_count.map_or(0, |n| n.min(window.len()));
        let mut values = Vec::with_capacity(capacity);
        let mut items = 0;
        let mut pos = 0;

        while pos < window.len() {
            if expected_count.is_some_and(|n| items >= n) {
                break;
            }

            let item = header::parse_next(&window[pos..], &self.reader)?;
            log::trace!(
                "depth {depth} offset {pos}: {} indicator {} header {}B",
                item.major.name(),
                item.length_indicator,
                item.header_len
            );

            match (item.major, item.body) {
                (MajorType::UnsignedInt, ItemBody::Immediate(n)) => {
                    values.push(Value::UInt(u64::from(n)));
                }
                (MajorType::NegativeInt, ItemBody::Immediate(n)) => {
                    values.push(Value::NegInt(-1 - i64::from(n)));
                }
                (MajorType::ByteString, ItemBody::ByteLength(payload)) => {
                    values.push(Value::Bytes(payload.to_vec()));
                }
                (MajorType::TextString, ItemBody::ByteLength(payload)) => {
                    values.push(Value::Text(validate_utf8(payload)?.to_owned()));
                }
                (MajorType::Tag, _) => {
                    // The tagged content is the next item and counts in its place.
                    pos += item.header_len;
                    continue;
                }
                (MajorType::Array | MajorType::Map, ItemBody::ElementCount(_)) => {
                    let expected = item.child_count().unwrap_or_default();
                    let children =
                        self.decode_at_depth(&window[pos + item.header_len..], Some(expected), depth + 1)?;
                    if children.items != expected {
                        return Err(Error::IncompleteContainer {
                            expected,
                            found: children.items,
                        });
                    }
                    // Dropped floats and simple values fill a slot but leave no value.
                    if children.values.len() != expected {
                        return Err(Error::IncompleteContainer {
                            expected,
                            found: children.values.len(),
                        });
                    }
                    log::trace!(
                        "depth {depth} offset {pos}: closed {} of {expected} items, {}B",
                        item.major.name(),
                        children.bytes_consumed
                    );

                    let value = if item.major == MajorType::Map {
                        Value::Map(pairs_to_map(children.values, self.config.duplicate_key_mode)?)
                    } else {
                        Value::Array(children.values)
                    };
                    values.push(value);
                    pos += item.header_len + children.bytes_consumed;
                    items += 1;
                    continue;
                }
                // Floats and simple values are read but not kept.
                _ => {}
            }

            pos += item.total_consumed().unwrap_or(item.header_len);
            items += 1;
        }

        Ok(ResultSequence {
            values,
            items,
            bytes_consumed: pos,
        })
    }
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
