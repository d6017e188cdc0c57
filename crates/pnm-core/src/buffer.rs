//! The pixel buffer shared by every operation.

use crate::error::OperationError;

/// The only max value this crate reads or writes.
pub const MAX_VALUE: u16 = 255;

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// One sample per pixel (P5).
    Grey,
    /// Interleaved R, G, B samples per pixel (P6).
    Color,
}

impl ColorMode {
    /// Samples per pixel.
    #[inline]
    pub const fn channel_count(self) -> usize {
        match self {
            ColorMode::Grey => 1,
            ColorMode::Color => 3,
        }
    }

    /// The digit following `P` in the file header.
    #[inline]
    pub const fn format_digit(self) -> u8 {
        match self {
            ColorMode::Grey => 5,
            ColorMode::Color => 6,
        }
    }

    /// Map a header format code back to a mode.
    pub const fn from_format_code(code: u64) -> Option<Self> {
        match code {
            5 => Some(ColorMode::Grey),
            6 => Some(ColorMode::Color),
            _ => None,
        }
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            ColorMode::Grey => "grey",
            ColorMode::Color => "color",
        }
    }
}

/// Number of samples a `width` x `height` image in `mode` holds, if it fits
/// in memory addressing.
pub fn sample_len(width: u64, height: u64, mode: ColorMode) -> Option<usize> {
    let width = usize::try_from(width).ok()?;
    let height = usize::try_from(height).ok()?;
    width
        .checked_mul(height)?
        .checked_mul(mode.channel_count())
}

/// An 8-bit image: dimensions, channel layout and interleaved samples.
///
/// `samples().len() == width * height * channel_count` holds for every
/// value that can be observed; constructors reject anything else and no
/// method resizes the sample vector without updating the dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u64,
    height: u64,
    max_value: u16,
    mode: ColorMode,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing samples.
    ///
    /// # Errors
    ///
    /// [`OperationError::SampleCountMismatch`] when `samples` does not hold
    /// exactly `width * height * channel_count` bytes, or
    /// [`OperationError::IndexOutOfBounds`] when that product overflows.
    pub fn new(
        width: u64,
        height: u64,
        mode: ColorMode,
        samples: Vec<u8>,
    ) -> Result<Self, OperationError> {
        let expected = sample_len(width, height, mode).ok_or_else(|| {
            OperationError::IndexOutOfBounds(format!("{width}x{height} image is too large"))
        })?;
        if samples.len() != expected {
            return Err(OperationError::SampleCountMismatch {
                expected: expected as u64,
                actual: samples.len() as u64,
            });
        }
        Ok(Self {
            width,
            height,
            max_value: MAX_VALUE,
            mode,
            samples,
        })
    }

    /// A buffer with every sample set to `value`.
    pub fn filled(
        width: u64,
        height: u64,
        mode: ColorMode,
        value: u8,
    ) -> Result<Self, OperationError> {
        let len = sample_len(width, height, mode).ok_or_else(|| {
            OperationError::IndexOutOfBounds(format!("{width}x{height} image is too large"))
        })?;
        Self::new(width, height, mode, vec![value; len])
    }

    #[inline]
    pub fn width(&self) -> u64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u64 {
        self.height
    }

    #[inline]
    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.mode.channel_count()
    }

    #[inline]
    pub fn is_grey(&self) -> bool {
        self.mode == ColorMode::Grey
    }

    #[inline]
    pub fn is_color(&self) -> bool {
        self.mode == ColorMode::Color
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Mutable access to the samples. The slice cannot change length.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// The channel group of pixel `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u64, y: u64) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let (width, _) = self.dims();
        let channels = self.channel_count();
        let start = (y as usize * width + x as usize) * channels;
        self.samples.get(start..start + channels)
    }

    /// Width and height as `usize`.
    ///
    /// Both fit because the sample vector was allocated from their product.
    #[inline]
    pub(crate) fn dims(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    /// Swap in a new image wholesale (used by rotate and channel operations).
    pub(crate) fn replace(
        &mut self,
        width: u64,
        height: u64,
        mode: ColorMode,
        samples: Vec<u8>,
    ) -> Result<(), OperationError> {
        *self = Self::new(width, height, mode, samples)?;
        Ok(())
    }
}
