//! Quantization to fewer bits per sample, with dithering.
//!
//! Every algorithm runs the same row-major loop over each sample:
//!
//! 1. decode the stored sample to linear light and add a bias,
//! 2. snap the result to the nearest level that `bit_rate` bits can hold,
//! 3. encode that level back to a byte.
//!
//! The algorithms differ only in where the bias comes from: nothing, a
//! threshold matrix, a random source, or the error diffused from earlier
//! pixels through a [`Kernel`]. Color images are dithered per channel.
//!
//! # Example
//!
//! ```
//! use pnm_core::{ColorMode, DitherAlgorithm, DitherOptions, PixelBuffer};
//!
//! let mut image = PixelBuffer::filled(16, 16, ColorMode::Grey, 128).unwrap();
//! image
//!     .dither(DitherAlgorithm::FloydSteinberg, &DitherOptions::new())
//!     .unwrap();
//! assert!(image.samples().iter().all(|&s| s == 0 || s == 255));
//! ```

mod kernel;
mod options;
mod threshold;

pub use kernel::{Kernel, ATKINSON, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE, SIERRA};
pub use options::DitherOptions;
pub use threshold::{halftone_bias, ordered_bias, BAYER_8X8, HALFTONE_4X4};

use std::fmt;

use rand::Rng;

use crate::buffer::PixelBuffer;
use crate::color::Gamma;
use crate::error::OperationError;

/// Dithering algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherAlgorithm {
    /// Plain quantization.
    None,
    /// 8x8 Bayer matrix.
    Ordered,
    /// Uniform noise.
    Random,
    /// Floyd-Steinberg error diffusion.
    #[default]
    FloydSteinberg,
    /// Jarvis-Judice-Ninke error diffusion.
    JarvisJudiceNinke,
    /// Sierra-3 error diffusion.
    Sierra,
    /// Atkinson error diffusion (75% propagation).
    Atkinson,
    /// 4x4 clustered-dot screen.
    Halftone,
}

impl DitherAlgorithm {
    pub const ALL: [DitherAlgorithm; 8] = [
        DitherAlgorithm::None,
        DitherAlgorithm::Ordered,
        DitherAlgorithm::Random,
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::JarvisJudiceNinke,
        DitherAlgorithm::Sierra,
        DitherAlgorithm::Atkinson,
        DitherAlgorithm::Halftone,
    ];

    /// The diffusion kernel, for error diffusion algorithms.
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            DitherAlgorithm::FloydSteinberg => Some(&FLOYD_STEINBERG),
            DitherAlgorithm::JarvisJudiceNinke => Some(&JARVIS_JUDICE_NINKE),
            DitherAlgorithm::Sierra => Some(&SIERRA),
            DitherAlgorithm::Atkinson => Some(&ATKINSON),
            DitherAlgorithm::None
            | DitherAlgorithm::Ordered
            | DitherAlgorithm::Random
            | DitherAlgorithm::Halftone => None,
        }
    }

    /// Kebab-case name, as used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::None => "none",
            DitherAlgorithm::Ordered => "ordered",
            DitherAlgorithm::Random => "random",
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::JarvisJudiceNinke => "jarvis-judice-ninke",
            DitherAlgorithm::Sierra => "sierra",
            DitherAlgorithm::Atkinson => "atkinson",
            DitherAlgorithm::Halftone => "halftone",
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Nearest 8-bit value representable with `bit_rate` bits.
///
/// Keeps the top `bit_rate` bits and repeats them downwards to fill the
/// byte, so the levels run evenly from 0 to 255. `bit_rate` must be in
/// `1..=8`.
pub fn closest_palette_color(value: u8, bit_rate: u8) -> u8 {
    let bits = i32::from(bit_rate.clamp(1, 8));
    let top = u32::from(value) >> (8 - bits);
    let mut out = 0u32;
    let mut shift = 8 - bits;
    while shift > -bits {
        out |= if shift >= 0 {
            top << shift
        } else {
            top >> -shift
        };
        shift -= bits;
    }
    out as u8
}

/// Quantization error, in byte units, waiting to be added to each sample.
struct ErrorAccumulator {
    width: usize,
    height: usize,
    channels: usize,
    errors: Vec<f64>,
}

impl ErrorAccumulator {
    fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            errors: vec![0.0; width * height * channels],
        }
    }

    #[inline]
    fn get(&self, index: usize) -> f64 {
        self.errors[index]
    }

    /// Spread `error` from sample `(x, y, channel)` to its kernel targets.
    /// Targets outside the image are skipped.
    fn spread(&mut self, x: usize, y: usize, channel: usize, error: f64, kernel: &Kernel) {
        let divisor = f64::from(kernel.divisor);
        for &(dx, dy, weight) in kernel.entries {
            let nx = x as i64 + i64::from(dx);
            let ny = y as i64 + i64::from(dy);
            if nx < 0 || ny < 0 || nx as usize >= self.width || ny as usize >= self.height {
                continue;
            }
            let index = (ny as usize * self.width + nx as usize) * self.channels + channel;
            self.errors[index] += error * f64::from(weight) / divisor;
        }
    }
}

impl PixelBuffer {
    /// Reduce every sample to `options.bit_rate` bits with `algorithm`.
    ///
    /// # Errors
    ///
    /// [`OperationError::UnsupportedBitRate`] unless the bit rate is in
    /// `1..=8`.
    pub fn dither(
        &mut self,
        algorithm: DitherAlgorithm,
        options: &DitherOptions,
    ) -> Result<(), OperationError> {
        self.dither_with_rng(algorithm, options, &mut rand::thread_rng())
    }

    /// [`dither`](Self::dither) with the random source used by
    /// [`DitherAlgorithm::Random`].
    pub fn dither_with_rng<R: Rng + ?Sized>(
        &mut self,
        algorithm: DitherAlgorithm,
        options: &DitherOptions,
        rng: &mut R,
    ) -> Result<(), OperationError> {
        let bit_rate = options.bit_rate;
        if !(1..=8).contains(&bit_rate) {
            return Err(OperationError::UnsupportedBitRate(bit_rate));
        }
        tracing::debug!(%algorithm, bit_rate, gamma = ?options.gamma, "dithering");

        let (width, height) = self.dims();
        let channels = self.channel_count();
        let gamma = options.gamma;
        let kernel = algorithm.kernel();
        let mut errors = kernel.map(|_| ErrorAccumulator::new(width, height, channels));
        let samples = self.samples_mut();

        for y in 0..height {
            for x in 0..width {
                for channel in 0..channels {
                    let index = (y * width + x) * channels + channel;
                    let linear = gamma.decode_byte(samples[index]);
                    let accumulated = errors.as_ref().map_or(0.0, |e| e.get(index));

                    let bias = match algorithm {
                        DitherAlgorithm::None => 0.0,
                        DitherAlgorithm::Ordered => ordered_bias(x, y, bit_rate),
                        DitherAlgorithm::Halftone => halftone_bias(x, y, bit_rate),
                        DitherAlgorithm::Random => {
                            (rng.gen::<f64>() - 0.5) / f64::from(bit_rate)
                        }
                        DitherAlgorithm::FloydSteinberg
                        | DitherAlgorithm::JarvisJudiceNinke
                        | DitherAlgorithm::Sierra
                        | DitherAlgorithm::Atkinson => accumulated / 255.0,
                    };

                    let value = (linear + bias).clamp(0.0, 1.0);
                    let quantized = closest_palette_color((value * 255.0).round() as u8, bit_rate);
                    samples[index] = gamma.encode_to_byte(f64::from(quantized) / 255.0);

                    if let (Some(kernel), Some(errors)) = (kernel, errors.as_mut()) {
                        let error = linear * 255.0 + accumulated - f64::from(quantized);
                        errors.spread(x, y, channel, error, kernel);
                    }
                }
            }
        }
        Ok(())
    }

    /// Overwrite the image with a left-to-right ramp from black to white,
    /// evenly spaced in linear light. A one-pixel-wide image is all black.
    pub fn fill_gradient(&mut self, gamma: Gamma) {
        let (width, _) = self.dims();
        let channels = self.channel_count();
        let ramp: Vec<u8> = (0..width)
            .map(|j| {
                if width <= 1 {
                    0
                } else {
                    gamma.encode_to_byte(j as f64 / (width - 1) as f64)
                }
            })
            .collect();

        let stride = width * channels;
        if stride == 0 {
            return;
        }
        for row in self.samples_mut().chunks_exact_mut(stride) {
            for (pixel, &value) in row.chunks_exact_mut(channels).zip(&ramp) {
                pixel.fill(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;
    use crate::color::{merge_channels, split_channels};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const LINEAR: Gamma = Gamma::Power(1.0);

    fn grey(width: u64, height: u64, value: u8) -> PixelBuffer {
        PixelBuffer::filled(width, height, ColorMode::Grey, value).unwrap()
    }

    fn ramp(width: u64, height: u64) -> PixelBuffer {
        let samples = (0..width * height).map(|i| (i * 255 / (width * height - 1)) as u8);
        PixelBuffer::new(width, height, ColorMode::Grey, samples.collect()).unwrap()
    }

    fn white_count(image: &PixelBuffer) -> usize {
        image.samples().iter().filter(|&&s| s == 255).count()
    }

    #[test]
    fn test_closest_palette_color_eight_bits_is_identity() {
        for value in 0..=255u8 {
            assert_eq!(closest_palette_color(value, 8), value);
        }
    }

    #[test]
    fn test_closest_palette_color_levels() {
        let levels = |bits: u8| {
            let mut seen: Vec<u8> = (0..=255u8).map(|v| closest_palette_color(v, bits)).collect();
            seen.dedup();
            seen
        };
        assert_eq!(levels(1), vec![0, 255]);
        assert_eq!(levels(2), vec![0, 85, 170, 255]);
        assert_eq!(levels(3).len(), 8);
        assert_eq!(levels(4).len(), 16);
        assert_eq!(closest_palette_color(127, 1), 0);
        assert_eq!(closest_palette_color(128, 1), 255);
    }

    #[test]
    fn test_closest_palette_color_is_monotonic() {
        for bits in 1..=8 {
            let mut previous = 0;
            for value in 0..=255u8 {
                let level = closest_palette_color(value, bits);
                assert!(level >= previous, "{bits} bits not monotonic at {value}");
                previous = level;
            }
            assert_eq!(previous, 255);
        }
    }

    #[test]
    fn test_rejects_bit_rate() {
        for bits in [0, 9] {
            let mut image = grey(2, 2, 100);
            let result = image.dither(DitherAlgorithm::None, &DitherOptions::new().bit_rate(bits));
            assert_eq!(result, Err(OperationError::UnsupportedBitRate(bits)));
            assert_eq!(image, grey(2, 2, 100));
        }
    }

    #[test]
    fn test_none_at_eight_bits_is_identity() {
        let mut image = ramp(16, 16);
        let options = DitherOptions::new().bit_rate(8).gamma(LINEAR);
        image.dither(DitherAlgorithm::None, &options).unwrap();
        assert_eq!(image, ramp(16, 16));
    }

    #[test]
    fn test_one_bit_output_is_binary() {
        for algorithm in DitherAlgorithm::ALL {
            let mut image = ramp(20, 10);
            let mut rng = StdRng::seed_from_u64(7);
            image
                .dither_with_rng(algorithm, &DitherOptions::new(), &mut rng)
                .unwrap();
            assert!(
                image.samples().iter().all(|&s| s == 0 || s == 255),
                "{algorithm} produced grey levels"
            );
        }
    }

    #[test]
    fn test_floyd_steinberg_preserves_mean() {
        let mut image = grey(32, 32, 128);
        let options = DitherOptions::new().gamma(LINEAR);
        image.dither(DitherAlgorithm::FloydSteinberg, &options).unwrap();
        let fraction = white_count(&image) as f64 / 1024.0;
        assert!((fraction - 128.0 / 255.0).abs() < 0.04, "white fraction {fraction}");
    }

    #[test]
    fn test_error_diffusion_works_in_linear_light() {
        // sRGB 128 is about 21.6% linear light.
        let mut image = grey(32, 32, 128);
        image
            .dither(DitherAlgorithm::FloydSteinberg, &DitherOptions::new())
            .unwrap();
        let fraction = white_count(&image) as f64 / 1024.0;
        assert!((fraction - 0.216).abs() < 0.04, "white fraction {fraction}");
    }

    #[test]
    fn test_ordered_mid_grey() {
        let mut image = grey(8, 8, 128);
        let options = DitherOptions::new().gamma(LINEAR);
        image.dither(DitherAlgorithm::Ordered, &options).unwrap();
        // Matrix values 32..=64 push the sample to white.
        assert_eq!(white_count(&image), 33);
    }

    #[test]
    fn test_halftone_mid_grey() {
        let mut image = grey(4, 4, 128);
        let options = DitherOptions::new().gamma(LINEAR);
        image.dither(DitherAlgorithm::Halftone, &options).unwrap();
        assert_eq!(white_count(&image), 8);
        assert_eq!(image.pixel(1, 1), Some(&[255][..]), "matrix value 16");
        assert_eq!(image.pixel(3, 3), Some(&[0][..]), "matrix value 1");
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let run = |seed| {
            let mut image = ramp(16, 8);
            let mut rng = StdRng::seed_from_u64(seed);
            image
                .dither_with_rng(DitherAlgorithm::Random, &DitherOptions::new(), &mut rng)
                .unwrap();
            image
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_color_channels_are_independent() {
        let samples = (0..8 * 8 * 3).map(|i| (i * 37 % 256) as u8).collect();
        let image = PixelBuffer::new(8, 8, ColorMode::Color, samples).unwrap();
        let options = DitherOptions::new().bit_rate(2);

        let mut whole = image.clone();
        whole.dither(DitherAlgorithm::Sierra, &options).unwrap();

        let mut planes = split_channels(&image).unwrap();
        for plane in &mut planes {
            plane.dither(DitherAlgorithm::Sierra, &options).unwrap();
        }
        let [r, g, b] = &planes;
        assert_eq!(whole, merge_channels(r, g, b).unwrap());
    }

    #[test]
    fn test_tiny_images_skip_out_of_range_targets() {
        for algorithm in DitherAlgorithm::ALL {
            for (width, height) in [(1, 1), (1, 5), (5, 1), (0, 0)] {
                let mut image = grey(width, height, 90);
                image.dither(algorithm, &DitherOptions::new()).unwrap();
            }
        }
    }

    #[test]
    fn test_fill_gradient() {
        let mut image = grey(5, 2, 9);
        image.fill_gradient(LINEAR);
        assert_eq!(image.samples(), &[0, 64, 128, 191, 255, 0, 64, 128, 191, 255]);

        let mut single = grey(1, 3, 9);
        single.fill_gradient(Gamma::Srgb);
        assert_eq!(single.samples(), &[0, 0, 0]);
    }

    #[test]
    fn test_fill_gradient_color() {
        let mut image = PixelBuffer::filled(3, 1, ColorMode::Color, 9).unwrap();
        image.fill_gradient(Gamma::Srgb);
        assert_eq!(image.samples(), &[0, 0, 0, 188, 188, 188, 255, 255, 255]);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(DitherAlgorithm::JarvisJudiceNinke.to_string(), "jarvis-judice-ninke");
        assert_eq!(DitherAlgorithm::default(), DitherAlgorithm::FloydSteinberg);
        assert!(DitherAlgorithm::Atkinson.kernel().is_some());
        assert!(DitherAlgorithm::Halftone.kernel().is_none());
    }
}
