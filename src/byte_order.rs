// ABOUTME: Reads big-endian unsigned fields of 1, 2 or 4 bytes.
// ABOUTME: Host byte order is injected into the reader rather than probed on every call.

use crate::error::{Error, Result};

/// Byte order of the host the reader interprets native integers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Byte order of the compilation target.
    pub const NATIVE: Endianness = if cfg!(target_endian = "little") {
        Endianness::Little
    } else {
        Endianness::Big
    };

    /// Determine host byte order at runtime by writing a known 2-byte
    /// pattern and reading it back as a 16-bit word.
    #[must_use]
    pub fn probe() -> Self {
        let word = u16::from_ne_bytes([0xcc, 0xdd]);
        if word == 0xddcc {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Self::NATIVE
    }
}

/// Converts big-endian encoded fields into host integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteOrderReader {
    host: Endianness,
}

impl ByteOrderReader {
    /// Create a reader for a host with the given byte order.
    #[must_use]
    pub const fn new(host: Endianness) -> Self {
        Self { host }
    }

    /// Create a reader for the compilation target.
    #[must_use]
    pub const fn native() -> Self {
        Self::new(Endianness::NATIVE)
    }

    /// The host byte order this reader was configured with.
    #[must_use]
    pub const fn host(&self) -> Endianness {
        self.host
    }

    /// Read a big-endian unsigned integer from a field of exactly 1, 2 or 4 bytes.
    ///
    /// The field is copied into a fixed-width buffer, reversed when the host is
    /// little-endian, then interpreted in native order.
    pub fn read_unsigned_be(&self, bytes: &[u8]) -> Result<u32> {
        match *bytes {
            [b] => Ok(u32::from(b)),
            [b0, b1] => {
                let mut buf = [b0, b1];
                if self.host == Endianness::Little {
                    buf.reverse();
                }
                Ok(u32::from(u16::from_ne_bytes(buf)))
            }
            [b0, b1, b2, b3] => {
                let mut buf = [b0, b1, b2, b3];
                if self.host == Endianness::Little {
                    buf.reverse();
                }
                Ok(u32::from_ne_bytes(buf))
            }
            _ => Err(Error::InvalidLength(bytes.len())),
        }
    }
}
