//! Per-pixel color-space conversion of P6 buffers.
//!
//! Every space stores three channels in bytes. Conversion goes through
//! normalized RGB (`0.0..=1.0`): `rgb = from.to_rgb(pixel)`, then
//! `pixel = to.from_rgb(rgb)`, rounded and clamped back to bytes.

use std::fmt;
use std::str::FromStr;

use crate::buffer::PixelBuffer;
use crate::error::OperationError;

/// Supported color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Rgb,
    Hsl,
    Hsv,
    /// BT.601 luma coefficients.
    YCbCr601,
    /// BT.709 luma coefficients.
    YCbCr709,
    YCoCg,
    Cmy,
}

/// Luma weights `(Kr, Kb)` for the YCbCr variants.
const BT601: (f64, f64) = (0.299, 0.114);
const BT709: (f64, f64) = (0.2126, 0.0722);

impl ColorSpace {
    pub const ALL: [ColorSpace; 7] = [
        ColorSpace::Rgb,
        ColorSpace::Hsl,
        ColorSpace::Hsv,
        ColorSpace::YCbCr601,
        ColorSpace::YCbCr709,
        ColorSpace::YCoCg,
        ColorSpace::Cmy,
    ];

    /// The tag accepted by [`FromStr`].
    pub const fn tag(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::Hsl => "HSL",
            ColorSpace::Hsv => "HSV",
            ColorSpace::YCbCr601 => "YCbCr.601",
            ColorSpace::YCbCr709 => "YCbCr.709",
            ColorSpace::YCoCg => "YCoCg",
            ColorSpace::Cmy => "CMY",
        }
    }

    /// Convert normalized channels in this space to normalized RGB.
    pub fn to_rgb(self, [a, b, c]: [f64; 3]) -> [f64; 3] {
        match self {
            ColorSpace::Rgb => [a, b, c],
            ColorSpace::Hsl => hsl_to_rgb(a, b, c),
            ColorSpace::Hsv => hsv_to_rgb(a, b, c),
            ColorSpace::YCbCr601 => ycbcr_to_rgb(a, b, c, BT601),
            ColorSpace::YCbCr709 => ycbcr_to_rgb(a, b, c, BT709),
            ColorSpace::YCoCg => {
                let (co, cg) = (b - 0.5, c - 0.5);
                [a + co - cg, a + cg, a - co - cg]
            }
            ColorSpace::Cmy => [1.0 - a, 1.0 - b, 1.0 - c],
        }
    }

    /// Convert normalized RGB to normalized channels in this space.
    pub fn from_rgb(self, [r, g, b]: [f64; 3]) -> [f64; 3] {
        match self {
            ColorSpace::Rgb => [r, g, b],
            ColorSpace::Hsl => rgb_to_hsl(r, g, b),
            ColorSpace::Hsv => rgb_to_hsv(r, g, b),
            ColorSpace::YCbCr601 => rgb_to_ycbcr(r, g, b, BT601),
            ColorSpace::YCbCr709 => rgb_to_ycbcr(r, g, b, BT709),
            ColorSpace::YCoCg => [
                r / 4.0 + g / 2.0 + b / 4.0,
                r / 2.0 - b / 2.0 + 0.5,
                -r / 4.0 + g / 2.0 - b / 4.0 + 0.5,
            ],
            ColorSpace::Cmy => [1.0 - r, 1.0 - g, 1.0 - b],
        }
    }
}

impl FromStr for ColorSpace {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|space| space.tag() == s)
            .ok_or_else(|| OperationError::UnsupportedColorSpace(s.to_string()))
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Scale a normalized value to a byte, rounding and clamping.
#[inline]
pub fn round_to_byte(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue in `[0, 1)` for the six-sector model; 0 for achromatic colors.
fn hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        (g - b) / delta
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    let mut degrees = sector * 60.0;
    if degrees < 0.0 {
        degrees += 360.0;
    }
    degrees / 360.0
}

/// Build RGB from chroma `c`, secondary component `x`, offset `m` and hue.
fn from_sectors(h: f64, c: f64, m: f64) -> [f64; 3] {
    let h = h * 6.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match (h.floor() as i64).clamp(0, 5) {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}

fn rgb_to_hsl(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };
    [hue(r, g, b, max, delta), s, l]
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    from_sectors(h, c, l - c / 2.0)
}

fn rgb_to_hsv(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let s = if max == 0.0 { 0.0 } else { delta / max };
    [hue(r, g, b, max, delta), s, max]
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let c = v * s;
    from_sectors(h, c, v - c)
}

fn rgb_to_ycbcr(r: f64, g: f64, b: f64, (kr, kb): (f64, f64)) -> [f64; 3] {
    let kg = 1.0 - kr - kb;
    let y = kr * r + kg * g + kb * b;
    let cb = (b - y) / (2.0 * (1.0 - kb)) + 0.5;
    let cr = (r - y) / (2.0 * (1.0 - kr)) + 0.5;
    [y, cb, cr]
}

fn ycbcr_to_rgb(y: f64, cb: f64, cr: f64, (kr, kb): (f64, f64)) -> [f64; 3] {
    let kg = 1.0 - kr - kb;
    let r = y + 2.0 * (1.0 - kr) * (cr - 0.5);
    let b = y + 2.0 * (1.0 - kb) * (cb - 0.5);
    let g = (y - kr * r - kb * b) / kg;
    [r, g, b]
}

impl PixelBuffer {
    /// Reinterpret every pixel from `from` and store it as `to`.
    ///
    /// # Errors
    ///
    /// [`OperationError::UnsupportedColorMode`] on grey buffers.
    pub fn convert_color_space(
        &mut self,
        from: ColorSpace,
        to: ColorSpace,
    ) -> Result<(), OperationError> {
        if !self.is_color() {
            return Err(OperationError::UnsupportedColorMode(
                "color-space conversion needs a color image",
            ));
        }
        tracing::debug!(%from, %to, "converting color space");
        if from == to {
            return Ok(());
        }

        for pixel in self.samples_mut().chunks_exact_mut(3) {
            let normalized = [
                f64::from(pixel[0]) / 255.0,
                f64::from(pixel[1]) / 255.0,
                f64::from(pixel[2]) / 255.0,
            ];
            let converted = to.from_rgb(from.to_rgb(normalized));
            for (sample, value) in pixel.iter_mut().zip(converted) {
                *sample = round_to_byte(value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;

    const GRID: [[u8; 3]; 12] = [
        [0, 0, 0],
        [255, 255, 255],
        [128, 128, 128],
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [120, 100, 90],
        [64, 64, 64],
        [200, 200, 200],
        [90, 100, 120],
        [10, 20, 30],
        [100, 150, 100],
    ];

    fn grid_image() -> PixelBuffer {
        PixelBuffer::new(12, 1, ColorMode::Color, GRID.concat()).unwrap()
    }

    fn max_deviation(a: &[u8], b: &[u8]) -> u8 {
        a.iter().zip(b).map(|(x, y)| x.abs_diff(*y)).max().unwrap_or(0)
    }

    #[test]
    fn test_parse_tags() {
        for space in ColorSpace::ALL {
            assert_eq!(space.tag().parse::<ColorSpace>(), Ok(space));
        }
        assert_eq!(
            "LAB".parse::<ColorSpace>(),
            Err(OperationError::UnsupportedColorSpace("LAB".to_string()))
        );
        assert!("rgb".parse::<ColorSpace>().is_err(), "tags are case-sensitive");
    }

    #[test]
    fn test_round_trips_stay_close() {
        for space in ColorSpace::ALL {
            let mut image = grid_image();
            image.convert_color_space(ColorSpace::Rgb, space).unwrap();
            image.convert_color_space(space, ColorSpace::Rgb).unwrap();
            let deviation = max_deviation(image.samples(), grid_image().samples());
            assert!(deviation <= 2, "{space} round trip drifted by {deviation}");
        }
    }

    #[test]
    fn test_cmy_is_complement() {
        let mut image = grid_image();
        image.convert_color_space(ColorSpace::Rgb, ColorSpace::Cmy).unwrap();
        let expected: Vec<u8> = grid_image().samples().iter().map(|v| 255 - v).collect();
        assert_eq!(image.samples(), expected.as_slice());
    }

    #[test]
    fn test_hsl_primaries() {
        let mut image =
            PixelBuffer::new(2, 1, ColorMode::Color, vec![255, 0, 0, 0, 0, 255]).unwrap();
        image.convert_color_space(ColorSpace::Rgb, ColorSpace::Hsl).unwrap();
        // Red: hue 0, full saturation, half lightness. Blue: hue 240/360.
        assert_eq!(image.samples(), &[0, 255, 128, 170, 255, 128]);
    }

    #[test]
    fn test_ycbcr_grey_is_neutral() {
        for space in [ColorSpace::YCbCr601, ColorSpace::YCbCr709, ColorSpace::YCoCg] {
            let mut image = PixelBuffer::new(1, 1, ColorMode::Color, vec![77, 77, 77]).unwrap();
            image.convert_color_space(ColorSpace::Rgb, space).unwrap();
            assert_eq!(image.samples(), &[77, 128, 128], "{space}");
        }
    }

    #[test]
    fn test_identity_conversion() {
        let mut image = grid_image();
        image.convert_color_space(ColorSpace::Hsv, ColorSpace::Hsv).unwrap();
        assert_eq!(image, grid_image());
    }

    #[test]
    fn test_grey_rejected() {
        let mut image = PixelBuffer::new(1, 1, ColorMode::Grey, vec![0]).unwrap();
        assert!(matches!(
            image.convert_color_space(ColorSpace::Rgb, ColorSpace::Hsl),
            Err(OperationError::UnsupportedColorMode(_))
        ));
    }

    #[test]
    fn test_round_to_byte() {
        assert_eq!(round_to_byte(0.5), 128);
        assert_eq!(round_to_byte(1.2), 255);
        assert_eq!(round_to_byte(-0.1), 0);
    }
}
