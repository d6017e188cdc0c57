//! Dithering options.

use crate::color::Gamma;

/// Configuration shared by every [`DitherAlgorithm`](super::DitherAlgorithm).
///
/// # Defaults
///
/// - Bit rate: 1 (black and white)
/// - Gamma: sRGB
///
/// # Example
///
/// ```
/// use pnm_core::{DitherOptions, Gamma};
///
/// let options = DitherOptions::new().bit_rate(2).gamma(Gamma::Power(2.2));
/// assert_eq!(options.bit_rate, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Bits kept per sample, `1..=8`.
    ///
    /// Default: `1`
    pub bit_rate: u8,

    /// Curve between stored samples and the linear values being quantized.
    ///
    /// Default: [`Gamma::Srgb`]
    pub gamma: Gamma,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            bit_rate: 1,
            gamma: Gamma::Srgb,
        }
    }
}

impl DitherOptions {
    /// Same as `DitherOptions::default()`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of bits kept per sample.
    #[inline]
    pub fn bit_rate(mut self, bits: u8) -> Self {
        self.bit_rate = bits;
        self
    }

    /// Set the gamma curve.
    #[inline]
    pub fn gamma(mut self, gamma: Gamma) -> Self {
        self.gamma = gamma;
        self
    }
}
