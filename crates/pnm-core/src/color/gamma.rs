//! Transfer functions between stored sample values and linear light.
//!
//! All functions take and return normalized values in `0.0..=1.0`.

/// Gamma curve used when blending or quantizing samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gamma {
    /// The piecewise sRGB curve (IEC 61966-2-1).
    #[default]
    Srgb,
    /// A plain power law: decode is `v^g`, encode is `v^(1/g)`.
    Power(f64),
}

impl Gamma {
    /// Map a numeric gamma parameter: `0` selects sRGB, anything else a
    /// power law with that exponent.
    pub fn from_param(gamma: f64) -> Self {
        if gamma == 0.0 {
            Gamma::Srgb
        } else {
            Gamma::Power(gamma)
        }
    }

    /// Stored value to linear light.
    #[inline]
    pub fn decode(self, value: f64) -> f64 {
        match self {
            Gamma::Srgb => {
                if value <= 0.04045 {
                    value / 12.92
                } else {
                    ((value + 0.055) / 1.055).powf(2.4)
                }
            }
            Gamma::Power(g) => value.max(0.0).powf(g),
        }
    }

    /// Linear light to stored value. The input is clamped to `0.0..=1.0`.
    #[inline]
    pub fn encode(self, value: f64) -> f64 {
        let value = value.clamp(0.0, 1.0);
        match self {
            Gamma::Srgb => {
                if value <= 0.003_130_8 {
                    value * 12.92
                } else {
                    1.055 * value.powf(1.0 / 2.4) - 0.055
                }
            }
            Gamma::Power(g) => value.powf(1.0 / g),
        }
    }

    /// Decode an 8-bit sample.
    #[inline]
    pub fn decode_byte(self, sample: u8) -> f64 {
        self.decode(f64::from(sample) / 255.0)
    }

    /// Encode linear light and scale it to a rounded, clamped byte.
    #[inline]
    pub fn encode_to_byte(self, value: f64) -> u8 {
        (self.encode(value) * 255.0).round().clamp(0.0, 255.0) as u8
    }
}
