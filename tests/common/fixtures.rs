//! Sample images and config documents.

/// 2x2 grey image with samples 10, 20, 30, 40 in row-major order.
pub const GREY_2X2: &[u8] = b"P5\n2 2\n255\n\x0a\x14\x1e\x28";

/// 2x1 color image: (10, 20, 30) then (200, 100, 50).
pub const COLOR_2X1: &[u8] = b"P6\n2 1\n255\n\x0a\x14\x1e\xc8\x64\x32";

/// Same pixels as [`COLOR_2X1`] with comments before the first header value.
pub const COLOR_2X1_COMMENTED: &[u8] =
    b"P6\n# written by a scanner\n# second line\n2 1\n255\n\x0a\x14\x1e\xc8\x64\x32";

/// Black grey image of the given size.
pub fn black_grey(width: u64, height: u64) -> Vec<u8> {
    let mut bytes = format!("P5\n{width} {height}\n255\n").into_bytes();
    bytes.resize(bytes.len() + (width * height) as usize, 0);
    bytes
}

/// Grey image with every sample set to `value`.
pub fn flat_grey(width: u64, height: u64, value: u8) -> Vec<u8> {
    let mut bytes = format!("P5\n{width} {height}\n255\n").into_bytes();
    bytes.resize(bytes.len() + (width * height) as usize, value);
    bytes
}

/// Config that changes the line defaults and selects linear gamma.
pub const LINE_CONFIG: &str = "gamma: 1.0\nline:\n  color: 100\n  thickness: 1.0\n";
