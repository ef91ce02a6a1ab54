// ABOUTME: Parses one CBOR item header: major type, length indicator and argument.
// ABOUTME: Slices string payloads; containers only report their declared child count.

use crate::byte_order::ByteOrderReader;
use crate::error::{Error, Result};
use crate::types::{length_info, MajorType};

/// What follows an item's header.
///
/// Strings carry a byte length, containers an element count. Keeping the two
/// apart stops a container count from being used to skip bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemBody<'a> {
    /// The argument itself is the value: integers, tag numbers, simple
    /// values and float bits.
    Immediate(u32),
    /// Byte or text string payload, already bounds-checked.
    ByteLength(&'a [u8]),
    /// Declared number of array elements, or map pairs.
    ElementCount(usize),
}

/// One decoded item header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'a> {
    pub major: MajorType,
    /// The 5-bit low field of the initial byte (0-31).
    pub length_indicator: u8,
    /// Initial byte plus any extended length bytes.
    pub header_len: usize,
    pub body: ItemBody<'a>,
}

impl<'a> Item<'a> {
    /// Resolved payload length: payload bytes for strings, the declared
    /// count for containers, zero for immediates.
    #[must_use]
    pub fn payload_len(&self) -> usize {
        match self.body {
            ItemBody::Immediate(_) => 0,
            ItemBody::ByteLength(payload) => payload.len(),
            ItemBody::ElementCount(count) => count,
        }
    }

    /// Bytes this item occupies in its window, or `None` for containers whose
    /// span is only known once their children have been decoded.
    #[must_use]
    pub fn total_consumed(&self) -> Option<usize> {
        match self.body {
            ItemBody::Immediate(_) => Some(self.header_len),
            ItemBody::ByteLength(payload) => Some(self.header_len + payload.len()),
            ItemBody::ElementCount(_) => None,
        }
    }

    /// Number of child items a container must hold: the array length, or
    /// twice the pair count for maps.
    #[must_use]
    pub fn child_count(&self) -> Option<usize> {
        match (self.major, self.body) {
            (MajorType::Map, ItemBody::ElementCount(pairs)) => Some(pairs.saturating_mul(2)),
            (_, ItemBody::ElementCount(count)) => Some(count),
            _ => None,
        }
    }
}

/// Parse the item starting at the first byte of `window`.
pub fn parse_next<'a>(window: &'a [u8], reader: &ByteOrderReader) -> Result<Item<'a>> {
    let &initial = window.first().ok_or(Error::Truncated)?;
    let length_indicator = initial & length_info::MASK;
    let major = MajorType::from_initial_byte(initial);

    let (argument, header_len) = if length_indicator <= length_info::IMMEDIATE_MAX {
        (u32::from(length_indicator), 1)
    } else if let Some(width) = length_info::argument_width(length_indicator) {
        let field = window.get(1..=width).ok_or(Error::Truncated)?;
        (reader.read_unsigned_be(field)?, 1 + width)
    } else if length_info::is_reserved(length_indicator) {
        return Err(Error::ReservedLength(length_indicator));
    } else {
        // 27 (8-byte argument) and 31 (indefinite length)
        return Err(Error::UnsupportedLength(length_indicator));
    };

    let length = argument as usize;
    let body = match major {
        MajorType::ByteString | MajorType::TextString => {
            let end = header_len.checked_add(length).ok_or(Error::Truncated)?;
            let payload = window.get(header_len..end).ok_or(Error::Truncated)?;
            ItemBody::ByteLength(payload)
        }
        MajorType::Array | MajorType::Map => ItemBody::ElementCount(length),
        MajorType::UnsignedInt | MajorType::NegativeInt | MajorType::Tag | MajorType::Float => {
            ItemBody::Immediate(argument)
        }
    };

    Ok(Item {
        major,
        length_indicator,
        header_len,
        body,
    })
}
