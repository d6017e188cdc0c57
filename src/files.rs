//! Image file naming rules and disk I/O.
//!
//! Single images use `.pnm`, `.pgm` or `.ppm`. A color image may also be
//! stored as three grey planes: the name `photo.pgm` then stands for
//! `photo_1.pgm`, `photo_2.pgm` and `photo_3.pgm`.

use std::path::{Path, PathBuf};

use pnm_core::{decode, encode, merge_channels, split_channels, PixelBuffer};

use crate::error::AppError;

/// Extensions accepted for a single image of either kind.
pub const IMAGE_EXTENSIONS: &[&str] = &["pnm", "pgm", "ppm"];

/// Extensions accepted for a single color image.
pub const COLOR_EXTENSIONS: &[&str] = &["ppm", "pnm"];

/// Extension required for plane sets.
pub const PLANE_EXTENSIONS: &[&str] = &["pgm"];

fn describe(allowed: &[&str]) -> &'static str {
    match allowed {
        ["pgm"] => ".pgm",
        ["ppm", "pnm"] => ".ppm or .pnm",
        _ => ".pnm, .pgm or .ppm",
    }
}

/// Check that `path` ends in one of `allowed` (case-insensitive).
pub fn check_extension(path: &Path, allowed: &[&str]) -> Result<(), AppError> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)));
    if matches {
        Ok(())
    } else {
        Err(AppError::InvalidExtension {
            path: path.to_path_buf(),
            expected: describe(allowed),
        })
    }
}

/// Expand `name.pgm` into `name_1.pgm`, `name_2.pgm`, `name_3.pgm`.
pub fn plane_paths(path: &Path) -> Result<[PathBuf; 3], AppError> {
    check_extension(path, PLANE_EXTENSIONS)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok([1, 2, 3].map(|i| path.with_file_name(format!("{stem}_{i}.{ext}"))))
}

/// Read and decode one image file.
pub fn read_image(path: &Path) -> Result<PixelBuffer, AppError> {
    let bytes = std::fs::read(path).map_err(|e| AppError::io(path, e))?;
    let image = decode(&bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read image");
    Ok(image)
}

/// Encode and write one image file.
pub fn write_image(path: &Path, image: &PixelBuffer) -> Result<(), AppError> {
    let bytes = encode(image);
    std::fs::write(path, &bytes).map_err(|e| AppError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote image");
    Ok(())
}

/// A color image on disk: one file, or three grey planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorFiles {
    Single(PathBuf),
    Planes([PathBuf; 3]),
}

impl ColorFiles {
    /// Interpret `path` for a file count of 1 or 3.
    pub fn new(path: &Path, count: u8) -> Result<Self, AppError> {
        match count {
            1 => {
                check_extension(path, COLOR_EXTENSIONS)?;
                Ok(ColorFiles::Single(path.to_path_buf()))
            }
            3 => Ok(ColorFiles::Planes(plane_paths(path)?)),
            other => Err(AppError::InvalidFileCount(other)),
        }
    }

    /// The paths this set reads from or writes to.
    pub fn paths(&self) -> Vec<&Path> {
        match self {
            ColorFiles::Single(path) => vec![path.as_path()],
            ColorFiles::Planes(paths) => paths.iter().map(PathBuf::as_path).collect(),
        }
    }

    /// Load the color image, merging planes if needed.
    pub fn read(&self) -> Result<PixelBuffer, AppError> {
        match self {
            ColorFiles::Single(path) => read_image(path),
            ColorFiles::Planes([a, b, c]) => {
                let planes = [read_image(a)?, read_image(b)?, read_image(c)?];
                Ok(merge_channels(&planes[0], &planes[1], &planes[2])?)
            }
        }
    }

    /// Store the color image, splitting it into planes if needed.
    pub fn write(&self, image: &PixelBuffer) -> Result<(), AppError> {
        match self {
            ColorFiles::Single(path) => write_image(path, image),
            ColorFiles::Planes(paths) => {
                let planes = split_channels(image)?;
                for (path, plane) in paths.iter().zip(&planes) {
                    write_image(path, plane)?;
                }
                Ok(())
            }
        }
    }
}
