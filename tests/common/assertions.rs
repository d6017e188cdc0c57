//! Assertion helpers for tests.

use std::path::Path;

use pnm_core::{ColorMode, PixelBuffer};
use pretty_assertions::assert_eq;

use super::app::CliOutput;

/// Decode the image at `path`, failing the test with context if it is not
/// a valid P5/P6 file.
pub fn read_pnm(path: &Path) -> PixelBuffer {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    pnm_core::decode(&bytes)
        .unwrap_or_else(|e| panic!("{} is not a valid PNM file: {e}", path.display()))
}

/// Assert the image at `path` has the given shape.
pub fn assert_pnm(path: &Path, mode: ColorMode, width: u64, height: u64) -> PixelBuffer {
    let image = read_pnm(path);
    assert_eq!(
        (image.mode(), image.width(), image.height()),
        (mode, width, height),
        "Unexpected shape for {}",
        path.display()
    );
    image
}

/// Assert the image at `path` has exactly these samples.
pub fn assert_samples(path: &Path, expected: &[u8]) {
    let image = read_pnm(path);
    assert_eq!(image.samples(), expected, "Samples of {}", path.display());
}

/// Assert the command exited successfully.
pub fn assert_success(output: &CliOutput) {
    assert!(
        output.status.success(),
        "Expected success, got {:?}. Stderr: {}",
        output.status,
        output.stderr
    );
}

/// Assert the command failed and mentioned `needle` on stderr.
pub fn assert_failure(output: &CliOutput, needle: &str) {
    assert!(
        !output.status.success(),
        "Expected failure, got success. Stdout: {}",
        output.stdout
    );
    assert!(
        output.stderr.contains(needle),
        "Expected stderr to contain {needle:?}, got: {}",
        output.stderr
    );
}
