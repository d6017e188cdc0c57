//! Error types for decoding and pixel operations.
//!
//! Decoding failures ([`DecodeError`]) describe malformed input bytes.
//! Operation failures ([`OperationError`]) describe a request that the
//! buffer cannot satisfy, such as drawing a line on a color image.

use thiserror::Error;

/// Malformed or unsupported PNM input.
///
/// No partial buffer is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Unsupported format: only binary P5 and P6 are readable")]
    UnsupportedFormat,

    #[error("Negative value in header at byte {offset}")]
    NegativeHeaderValue { offset: usize },

    #[error("Unsupported max value {0} (expected 255)")]
    UnsupportedMaxValue(u64),

    #[error("Pixel data size mismatch: expected {expected} bytes, found {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("Header ended after {tokens} of 4 values")]
    IncompleteHeader { tokens: usize },

    #[error("Unexpected byte 0x{byte:02x} in header at byte {offset}")]
    UnexpectedHeaderByte { byte: u8, offset: usize },

    #[error("Header value too large at byte {offset}")]
    HeaderValueOverflow { offset: usize },

    #[error("Image dimensions {width}x{height} are too large")]
    DimensionsOverflow { width: u64, height: u64 },
}

/// A pixel operation that cannot be applied to the given buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("Unsupported color mode: {0}")]
    UnsupportedColorMode(&'static str),

    #[error("Unsupported color space: {0}")]
    UnsupportedColorSpace(String),

    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(String),

    #[error("Unsupported bit rate {0} (expected 1..=8)")]
    UnsupportedBitRate(u8),

    #[error("Planes do not match: {0}")]
    MismatchedPlanes(String),

    #[error("Sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: u64, actual: u64 },
}
