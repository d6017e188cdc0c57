//! File-level jobs behind each subcommand: read, apply one operation,
//! write.

use std::fmt;
use std::path::Path;

use pnm_core::{
    Axis, ColorMode, ColorSpace, DitherAlgorithm, DitherOptions, Gamma, OperationError,
    PixelBuffer, Point, Rotation, ScanStrategy,
};

use crate::error::AppError;
use crate::files::{check_extension, read_image, write_image, ColorFiles, IMAGE_EXTENSIONS};

/// What a job produced, for status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSummary {
    pub width: u64,
    pub height: u64,
    pub mode: ColorMode,
    pub max_value: u16,
}

impl From<&PixelBuffer> for ImageSummary {
    fn from(image: &PixelBuffer) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            mode: image.mode(),
            max_value: image.max_value(),
        }
    }
}

impl fmt::Display for ImageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.mode {
            ColorMode::Grey => "grey",
            ColorMode::Color => "color",
        };
        write!(
            f,
            "P{} {}x{} {kind}, max value {}",
            self.mode.format_digit(),
            self.width,
            self.height,
            self.max_value
        )
    }
}

/// Parameters for [`draw_line_file`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineJob {
    pub from: Point,
    pub to: Point,
    pub color: u8,
    pub thickness: f64,
    pub gamma: Gamma,
    pub strategy: ScanStrategy,
}

/// Parameters for [`dither_file`].
#[derive(Debug, Clone, PartialEq)]
pub struct DitherJob {
    pub algorithm: DitherAlgorithm,
    pub options: DitherOptions,
    /// Replace the input with a gradient before dithering.
    pub gradient: bool,
}

/// Read `input`, apply `operation`, write the result to `output`.
pub fn process_file<F>(input: &Path, output: &Path, operation: F) -> Result<ImageSummary, AppError>
where
    F: FnOnce(&mut PixelBuffer) -> Result<(), OperationError>,
{
    check_extension(input, IMAGE_EXTENSIONS)?;
    check_extension(output, IMAGE_EXTENSIONS)?;

    let mut image = read_image(input)?;
    operation(&mut image)?;
    write_image(output, &image)?;

    let summary = ImageSummary::from(&image);
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        width = summary.width,
        height = summary.height,
        "Processed image"
    );
    Ok(summary)
}

pub fn invert_file(input: &Path, output: &Path) -> Result<ImageSummary, AppError> {
    process_file(input, output, |image| {
        image.invert();
        Ok(())
    })
}

pub fn mirror_file(input: &Path, output: &Path, axis: Axis) -> Result<ImageSummary, AppError> {
    process_file(input, output, |image| {
        image.mirror(axis);
        Ok(())
    })
}

pub fn rotate_file(
    input: &Path,
    output: &Path,
    rotation: Rotation,
) -> Result<ImageSummary, AppError> {
    process_file(input, output, |image| image.rotate(rotation))
}

pub fn draw_line_file(input: &Path, output: &Path, job: &LineJob) -> Result<ImageSummary, AppError> {
    process_file(input, output, |image| {
        image.draw_thick_line_with(
            job.from,
            job.to,
            job.color,
            job.thickness,
            job.gamma,
            job.strategy,
        )
    })
}

pub fn dither_file(input: &Path, output: &Path, job: &DitherJob) -> Result<ImageSummary, AppError> {
    process_file(input, output, |image| {
        if job.gradient {
            image.fill_gradient(job.options.gamma);
        }
        image.dither(job.algorithm, &job.options)
    })
}

/// Convert a color image between color spaces, reading and writing either
/// a single file or three planes.
pub fn convert_files(
    input: &ColorFiles,
    output: &ColorFiles,
    from: ColorSpace,
    to: ColorSpace,
) -> Result<ImageSummary, AppError> {
    let mut image = input.read()?;
    image.convert_color_space(from, to)?;
    output.write(&image)?;

    tracing::info!(%from, %to, files = output.paths().len(), "Converted color space");
    Ok(ImageSummary::from(&image))
}

/// Decode `input` and report its header.
pub fn describe_file(input: &Path) -> Result<ImageSummary, AppError> {
    check_extension(input, IMAGE_EXTENSIONS)?;
    let image = read_image(input)?;
    Ok(ImageSummary::from(&image))
}
