//! pnm-core: binary PNM images and the operations on them.
//!
//! This library reads and writes binary PGM/PPM files (P5 and P6 with a
//! max value of 255) and provides the pixel operations used by the
//! `pnmlab` tool.
//!
//! # Quick Start
//!
//! ```
//! use pnm_core::{decode, encode, Axis};
//!
//! let mut image = decode(b"P5\n2 2\n255\n\x0a\x14\x1e\x28").unwrap();
//! image.invert();
//! image.mirror(Axis::Horizontal);
//! assert_eq!(image.samples(), &[235, 245, 215, 225]);
//!
//! let bytes = encode(&image);
//! assert!(bytes.starts_with(b"P5\n2 2\n255\n"));
//! ```
//!
//! # Operations
//!
//! All operations are methods on [`PixelBuffer`] or free functions over it:
//!
//! - [`PixelBuffer::invert`], [`PixelBuffer::mirror`], [`PixelBuffer::rotate`]
//! - [`PixelBuffer::draw_thick_line`] and [`PixelBuffer::draw_point`] for
//!   anti-aliased lines on grey images
//! - [`PixelBuffer::dither`] with any [`DitherAlgorithm`]
//! - [`PixelBuffer::convert_color_space`], [`merge_channels`],
//!   [`pull_channel`] and [`split_channels`]
//!
//! # Gamma
//!
//! Blending and quantization happen in linear light. Stored samples are
//! decoded with a [`Gamma`] curve first (sRGB by default, or a plain power
//! law) and encoded again afterwards. Averaging encoded samples directly
//! makes anti-aliased edges and dithered mid-tones too dark.
//!
//! # Errors
//!
//! Malformed files produce a [`DecodeError`]; requests a buffer cannot
//! satisfy produce an [`OperationError`]. Nothing in this crate panics on
//! bad input, prints, or exits.

pub mod buffer;
pub mod codec;
pub mod color;
pub mod dither;
pub mod error;
pub mod raster;
pub mod transform;


pub use buffer::{ColorMode, PixelBuffer, MAX_VALUE};
pub use codec::{decode, encode};
pub use color::{merge_channels, pull_channel, split_channels, ColorSpace, Gamma};
pub use dither::{closest_palette_color, DitherAlgorithm, DitherOptions};
pub use error::{DecodeError, OperationError};
pub use raster::{LineRect, Point, ScanStrategy};
pub use transform::{Axis, Rotation};
