//! Threshold matrices for ordered and halftone dithering.
//!
//! Entries are indexed `[row % N][column % N]`. A matrix value `k` maps to a
//! threshold of `k / (levels)`, and the bias added to a pixel is that
//! threshold minus one half, divided by the bit rate.

/// 8x8 Bayer matrix holding each of `1..=64` once. Thresholds are `k / 64`.
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [1, 49, 13, 61, 4, 52, 16, 64],
    [33, 17, 45, 29, 36, 20, 48, 32],
    [9, 57, 5, 53, 12, 60, 8, 56],
    [41, 25, 37, 21, 44, 28, 40, 24],
    [3, 51, 15, 63, 2, 50, 14, 62],
    [35, 19, 47, 31, 34, 18, 46, 30],
    [11, 59, 7, 55, 10, 58, 6, 54],
    [43, 27, 39, 23, 42, 26, 38, 22],
];

/// 4x4 clustered-dot halftone screen holding each of `1..=16` once.
/// Thresholds are `k / 17`.
pub const HALFTONE_4X4: [[u8; 4]; 4] = [
    [7, 13, 11, 4],
    [12, 16, 14, 8],
    [10, 15, 6, 2],
    [5, 9, 3, 1],
];

/// Ordered-dither bias for pixel `(x, y)`.
#[inline]
pub fn ordered_bias(x: usize, y: usize, bit_rate: u8) -> f64 {
    let k = BAYER_8X8[y % 8][x % 8];
    (f64::from(k) / 64.0 - 0.5) / f64::from(bit_rate)
}

/// Halftone bias for pixel `(x, y)`.
#[inline]
pub fn halftone_bias(x: usize, y: usize, bit_rate: u8) -> f64 {
    let k = HALFTONE_4X4[y % 4][x % 4];
    (f64::from(k) / 17.0 - 0.5) / f64::from(bit_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted<const N: usize>(rows: &[[u8; N]]) -> Vec<u8> {
        let mut values: Vec<u8> = rows.iter().flatten().copied().collect();
        values.sort_unstable();
        values
    }

    #[test]
    fn test_bayer_is_a_permutation() {
        assert_eq!(sorted(&BAYER_8X8), (1..=64).collect::<Vec<u8>>());
    }

    #[test]
    fn test_halftone_is_a_permutation() {
        assert_eq!(sorted(&HALFTONE_4X4), (1..=16).collect::<Vec<u8>>());
    }

    #[test]
    fn test_bias_range() {
        for y in 0..8 {
            for x in 0..8 {
                let ordered = ordered_bias(x, y, 1);
                let halftone = halftone_bias(x, y, 1);
                assert!(ordered > -0.5 && ordered <= 0.5, "ordered bias {ordered}");
                assert!(halftone > -0.5 && halftone < 0.5, "halftone bias {halftone}");
            }
        }
    }

    #[test]
    fn test_bias_scales_with_bit_rate() {
        assert_eq!(ordered_bias(7, 0, 1), 0.5);
        assert_eq!(ordered_bias(7, 0, 4), 0.125);
        assert_eq!(ordered_bias(8, 8, 2), ordered_bias(0, 0, 2));
    }
}
