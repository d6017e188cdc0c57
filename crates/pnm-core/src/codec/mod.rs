//! Binary PNM (P5/P6) reader and writer.
//!
//! # Example
//!
//! ```
//! use pnm_core::{decode, encode};
//!
//! let bytes = b"P5\n2 1\n255\n\x00\xff";
//! let image = decode(bytes).unwrap();
//! assert_eq!(image.samples(), &[0, 255]);
//! assert_eq!(encode(&image), bytes);
//! ```

mod tokenizer;

pub use tokenizer::{parse_header, PnmHeader};

use crate::buffer::{sample_len, PixelBuffer, MAX_VALUE};
use crate::error::DecodeError;

/// Decode a binary PNM file held in memory.
///
/// # Errors
///
/// Header problems are reported as they are found; once the header is
/// complete the max value must be 255 and the payload must hold exactly
/// `width * height * channels` bytes.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let header = parse_header(bytes)?;

    if header.max_value != u64::from(MAX_VALUE) {
        return Err(DecodeError::UnsupportedMaxValue(header.max_value));
    }

    let overflow = DecodeError::DimensionsOverflow {
        width: header.width,
        height: header.height,
    };
    let expected = sample_len(header.width, header.height, header.mode).ok_or(overflow.clone())?;

    let data = tokenizer::skip_leading_comments(&bytes[header.data_offset..], expected);
    if data.len() != expected {
        return Err(DecodeError::SizeMismatch {
            expected: expected as u64,
            actual: data.len() as u64,
        });
    }

    tracing::debug!(
        width = header.width,
        height = header.height,
        mode = header.mode.name(),
        "decoded PNM"
    );

    PixelBuffer::new(header.width, header.height, header.mode, data.to_vec())
        .map_err(|_| overflow)
}

/// Encode a buffer as `P5`/`P6` with a newline before the pixel data.
pub fn encode(buffer: &PixelBuffer) -> Vec<u8> {
    let header = format!(
        "P{}\n{} {}\n{}\n",
        buffer.mode().format_digit(),
        buffer.width(),
        buffer.height(),
        buffer.max_value()
    );
    let mut out = Vec::with_capacity(header.len() + buffer.samples().len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(buffer.samples());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_grey() {
        let image = decode(b"P5\n2 2\n255\n\x0a\x14\x1e\x28").unwrap();
        assert_eq!(image.mode(), ColorMode::Grey);
        assert_eq!((image.width(), image.height()), (2, 2));
        assert_eq!(image.samples(), &[10, 20, 30, 40]);
    }

    #[test]
    fn test_decode_color() {
        let image = decode(b"P6 1 2 255\n\x01\x02\x03\x04\x05\x06").unwrap();
        assert_eq!(image.mode(), ColorMode::Color);
        assert_eq!(image.pixel(0, 1), Some(&[4, 5, 6][..]));
    }

    #[test]
    fn test_separator_bytes_in_pixel_data() {
        // Samples that look like whitespace, '#' and digits are plain data.
        let mut bytes = b"P5\n3 2\n255\n".to_vec();
        let payload = [b'\n', b' ', b'#', b'5', 0, b'\r'];
        bytes.extend_from_slice(&payload);
        let image = decode(&bytes).unwrap();
        assert_eq!(image.samples(), &payload);
    }

    #[test]
    fn test_truncated_data() {
        assert_eq!(
            decode(b"P5\n2 2\n255\n\x01\x02\x03"),
            Err(DecodeError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_trailing_data() {
        assert_eq!(
            decode(b"P5\n1 1\n255\n\x01\x02"),
            Err(DecodeError::SizeMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_unsupported_max_value() {
        assert_eq!(
            decode(b"P5\n1 1\n65535\n\x00\x00"),
            Err(DecodeError::UnsupportedMaxValue(65535))
        );
    }

    #[test]
    fn test_dimensions_overflow() {
        assert!(matches!(
            decode(b"P6\n18446744073709551615 2\n255\n"),
            Err(DecodeError::DimensionsOverflow { .. })
        ));
    }

    #[test]
    fn test_encode_header_layout() {
        let image = PixelBuffer::new(3, 1, ColorMode::Color, vec![9; 9]).unwrap();
        let bytes = encode(&image);
        assert_eq!(&bytes[..11], b"P6\n3 1\n255\n");
        assert_eq!(&bytes[11..], &[9; 9]);
    }

    #[test]
    fn test_round_trip() {
        let samples: Vec<u8> = (0..=255).cycle().take(5 * 4 * 3).collect();
        let image = PixelBuffer::new(5, 4, ColorMode::Color, samples).unwrap();
        assert_eq!(decode(&encode(&image)), Ok(image));

        let empty = PixelBuffer::new(0, 0, ColorMode::Grey, Vec::new()).unwrap();
        assert_eq!(decode(&encode(&empty)), Ok(empty));
    }
}
