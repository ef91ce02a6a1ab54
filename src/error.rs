// ABOUTME: Error types for CBOR stream decoding.
// ABOUTME: Each variant has a stable snake_case identifier used by the test vectors.

use std::fmt;

/// The result type for CBOR decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a CBOR stream.
///
/// Every error aborts the whole decode call. The input buffer is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A big-endian field was not 1, 2 or 4 bytes wide.
    /// Test vectors: "invalid_length"
    InvalidLength(usize),

    /// 8-byte argument (indicator 27) or indefinite-length marker (indicator 31).
    /// Test vectors: "unsupported_length"
    UnsupportedLength(u8),

    /// Length indicator 28, 29 or 30.
    /// Test vectors: "reserved_length"
    ReservedLength(u8),

    /// A header or declared payload extends past the end of the input.
    /// Test vectors: "truncated"
    Truncated,

    /// A container did not hold as many items as its header declared.
    /// Test vectors: "incomplete_container"
    IncompleteContainer {
        /// Items declared by the header (twice the pair count for maps).
        expected: usize,
        /// Items actually found before the input ran out.
        found: usize,
    },

    /// Invalid UTF-8 byte sequence in a text string.
    /// Test vectors: "invalid_utf8"
    InvalidUtf8,

    /// A key/value sequence with an odd number of entries.
    /// Test vectors: "odd_pair_count"
    OddPairCount(usize),

    /// Container nesting too deep.
    /// Test vectors: "max_depth_exceeded"
    MaxDepthExceeded,

    /// Document exceeds size limit.
    /// Test vectors: "max_document_size_exceeded"
    MaxDocumentSizeExceeded,

    /// Duplicate map key (only raised with `DuplicateKeyMode::Error`).
    /// Test vectors: "duplicate_key"
    DuplicateKey,

    /// A single-value entry point found zero or several top-level items.
    ExpectedSingleValue(usize),

    /// Custom error message (for serde integration).
    Custom(String),
}

impl Error {
    /// Returns the standardized error type name for test matching.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Error::InvalidLength(_) => "invalid_length",
            Error::UnsupportedLength(_) => "unsupported_length",
            Error::ReservedLength(_) => "reserved_length",
            Error::Truncated => "truncated",
            Error::IncompleteContainer { .. } => "incomplete_container",
            Error::InvalidUtf8 => "invalid_utf8",
            Error::OddPairCount(_) => "odd_pair_count",
            Error::MaxDepthExceeded => "max_depth_exceeded",
            Error::MaxDocumentSizeExceeded => "max_document_size_exceeded",
            Error::DuplicateKey => "duplicate_key",
            Error::ExpectedSingleValue(_) => "expected_single_value",
            Error::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength(len) => {
                write!(f, "invalid field width: {len} bytes (expected 1, 2 or 4)")
            }
            Error::UnsupportedLength(info) => write!(f, "unsupported length indicator: {info}"),
            Error::ReservedLength(info) => write!(f, "reserved length indicator: {info}"),
            Error::Truncated => write!(f, "unexpected end of input"),
            Error::IncompleteContainer { expected, found } => {
                write!(f, "incomplete container: expected {expected} items, found {found}")
            }
            Error::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
            Error::OddPairCount(len) => write!(f, "odd number of map entries: {len}"),
            Error::MaxDepthExceeded => write!(f, "maximum container depth exceeded"),
            Error::MaxDocumentSizeExceeded => write!(f, "maximum document size exceeded"),
            Error::DuplicateKey => write!(f, "duplicate key in map"),
            Error::ExpectedSingleValue(count) => {
                write!(f, "expected a single top-level value, found {count}")
            }
            Error::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(_: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
