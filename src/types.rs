// ABOUTME: Defines CBOR major types, length-indicator codes and default limits.
// ABOUTME: Constants map directly to the initial-byte layout of RFC 8949.

/// Raw 3-bit major type values (the high bits of an item's initial byte).
pub mod major_type {
    pub const UNSIGNED_INT: u8 = 0;
    pub const NEGATIVE_INT: u8 = 1;
    pub const BYTE_STRING: u8 = 2;
    pub const TEXT_STRING: u8 = 3;
    pub const ARRAY: u8 = 4;
    pub const MAP: u8 = 5;
    pub const TAG: u8 = 6;
    pub const FLOAT: u8 = 7;

    /// Shift applied to the initial byte to reach the major type.
    pub const SHIFT: u8 = 5;
}

/// Values of the 5-bit length indicator (the low bits of an item's initial byte).
pub mod length_info {
    /// Mask selecting the length indicator from the initial byte.
    pub const MASK: u8 = 0x1f;

    /// Largest indicator that carries its value directly.
    pub const IMMEDIATE_MAX: u8 = 23;

    pub const ONE_BYTE: u8 = 24;
    pub const TWO_BYTES: u8 = 25;
    pub const FOUR_BYTES: u8 = 26;
    pub const EIGHT_BYTES: u8 = 27;

    // Reserved: 28-30
    pub const RESERVED_MIN: u8 = 28;
    pub const RESERVED_MAX: u8 = 30;

    pub const INDEFINITE: u8 = 31;

    /// Check if an indicator is one of the reserved values 28-30
    #[inline]
    pub const fn is_reserved(info: u8) -> bool {
        info >= RESERVED_MIN && info <= RESERVED_MAX
    }

    /// Number of argument bytes following the initial byte for 24-26,
    /// or `None` for every other indicator.
    #[inline]
    pub const fn argument_width(info: u8) -> Option<usize> {
        match info {
            ONE_BYTE => Some(1),
            TWO_BYTES => Some(2),
            FOUR_BYTES => Some(4),
            _ => None,
        }
    }
}

/// The category of a CBOR item, taken from the top 3 bits of its initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorType {
    UnsignedInt,
    NegativeInt,
    ByteString,
    TextString,
    Array,
    Map,
    /// Semantic tag. The tag number is read and discarded.
    Tag,
    /// Floats and simple values. Recognized and discarded.
    Float,
}

impl MajorType {
    /// Classify an item by its initial byte.
    #[inline]
    pub const fn from_initial_byte(byte: u8) -> Self {
        match byte >> major_type::SHIFT {
            major_type::UNSIGNED_INT => MajorType::UnsignedInt,
            major_type::NEGATIVE_INT => MajorType::NegativeInt,
            major_type::BYTE_STRING => MajorType::ByteString,
            major_type::TEXT_STRING => MajorType::TextString,
            major_type::ARRAY => MajorType::Array,
            major_type::MAP => MajorType::Map,
            major_type::TAG => MajorType::Tag,
            _ => MajorType::Float,
        }
    }

    /// The raw 3-bit value of this major type.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            MajorType::UnsignedInt => major_type::UNSIGNED_INT,
            MajorType::NegativeInt => major_type::NEGATIVE_INT,
            MajorType::ByteString => major_type::BYTE_STRING,
            MajorType::TextString => major_type::TEXT_STRING,
            MajorType::Array => major_type::ARRAY,
            MajorType::Map => major_type::MAP,
            MajorType::Tag => major_type::TAG,
            MajorType::Float => major_type::FLOAT,
        }
    }

    /// Upper-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            MajorType::UnsignedInt => "UNSIGNED_INT",
            MajorType::NegativeInt => "NEGATIVE_INT",
            MajorType::ByteString => "BYTE_STRING",
            MajorType::TextString => "TEXT_STRING",
            MajorType::Array => "ARRAY",
            MajorType::Map => "MAP",
            MajorType::Tag => "OTHER_SEM",
            MajorType::Float => "FLOAT",
        }
    }

    /// Byte and text strings carry a payload after the header.
    #[inline]
    pub const fn has_payload(self) -> bool {
        matches!(self, MajorType::ByteString | MajorType::TextString)
    }

    /// Arrays and maps declare a child count instead of a byte length.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, MajorType::Array | MajorType::Map)
    }
}

/// Default resource limits.
pub mod limits {
    /// Maximum document size in bytes (2 billion)
    pub const MAX_DOCUMENT_SIZE: usize = 2_000_000_000;

    /// Maximum container nesting depth
    pub const MAX_DEPTH: usize = 512;
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
