//! Forward single-pass PNM header tokenizer.
//!
//! The header is `P<code> <width> <height> <maxval>` with arbitrary
//! whitespace and `#` comments between the values. Digits are accumulated
//! as they are read; the tokenizer switches to pixel data as soon as the
//! fourth value and its single trailing separator have been consumed, so
//! pixel bytes are never inspected for separators.

use crate::buffer::ColorMode;
use crate::error::DecodeError;

/// Number of integer values in a header.
const HEADER_VALUES: usize = 4;

/// A parsed PNM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PnmHeader {
    pub mode: ColorMode,
    pub width: u64,
    pub height: u64,
    pub max_value: u64,
    /// Offset of the first byte after the header.
    pub data_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Comment,
}

#[inline]
fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0)
}

#[inline]
fn is_line_end(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n')
}

/// Token accumulation state.
struct Tokens {
    values: [u64; HEADER_VALUES],
    count: usize,
    current: Option<u64>,
}

impl Tokens {
    fn new() -> Self {
        Self {
            values: [0; HEADER_VALUES],
            count: 0,
            current: None,
        }
    }

    fn push_digit(&mut self, digit: u8, offset: usize) -> Result<(), DecodeError> {
        let value = self
            .current
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
            .ok_or(DecodeError::HeaderValueOverflow { offset })?;
        self.current = Some(value);
        Ok(())
    }

    /// Close the token being read, if any. Returns true once all header
    /// values are present.
    fn finish(&mut self) -> Result<bool, DecodeError> {
        if let Some(value) = self.current.take() {
            if self.count == 0 && ColorMode::from_format_code(value).is_none() {
                return Err(DecodeError::UnsupportedFormat);
            }
            self.values[self.count] = value;
            self.count += 1;
        }
        Ok(self.count == HEADER_VALUES)
    }
}

/// Parse the header at the start of `bytes`.
///
/// # Errors
///
/// See [`DecodeError`]; the format code is checked as soon as it is read.
pub fn parse_header(bytes: &[u8]) -> Result<PnmHeader, DecodeError> {
    if bytes.first() != Some(&b'P') || !bytes.get(1).is_some_and(u8::is_ascii_digit) {
        return Err(DecodeError::UnsupportedFormat);
    }

    let mut tokens = Tokens::new();
    let mut state = State::Header;

    for (offset, &byte) in bytes.iter().enumerate().skip(1) {
        match state {
            State::Comment => {
                if is_line_end(byte) {
                    if tokens.count == HEADER_VALUES {
                        return Ok(header(&tokens, offset + 1));
                    }
                    state = State::Header;
                }
            }
            State::Header => match byte {
                b'0'..=b'9' => tokens.push_digit(byte, offset)?,
                b'#' => {
                    tokens.finish()?;
                    state = State::Comment;
                }
                b'-' if bytes.get(offset + 1).is_some_and(u8::is_ascii_digit) => {
                    return Err(DecodeError::NegativeHeaderValue { offset });
                }
                _ if is_separator(byte) => {
                    if tokens.finish()? {
                        return Ok(header(&tokens, offset + 1));
                    }
                }
                _ => return Err(DecodeError::UnexpectedHeaderByte { byte, offset }),
            },
        }
    }

    // A value ending exactly at EOF has no trailing separator.
    let tokens_read = tokens.count + usize::from(tokens.current.is_some());
    Err(DecodeError::IncompleteHeader {
        tokens: tokens_read.min(HEADER_VALUES - 1),
    })
}

fn header(tokens: &Tokens, data_offset: usize) -> PnmHeader {
    let [code, width, height, max_value] = tokens.values;
    PnmHeader {
        // Validated in `Tokens::finish`.
        mode: ColorMode::from_format_code(code).unwrap_or(ColorMode::Grey),
        width,
        height,
        max_value,
        data_offset,
    }
}

/// Drop comment lines sitting between the header and the pixel data.
///
/// Only applies while `data` is longer than the expected payload, so a
/// payload whose first sample happens to be `#` (35) is left alone.
pub fn skip_leading_comments(mut data: &[u8], expected: usize) -> &[u8] {
    while data.len() > expected && data.first() == Some(&b'#') {
        let Some(end) = data.iter().position(|&b| is_line_end(b)) else {
            break;
        };
        let mut next = end + 1;
        if data[end] == b'\r' && data.get(next) == Some(&b'\n') && data.len() - next > expected {
            next += 1;
        }
        data = &data[next..];
    }
    data
}
