//! Splitting a color image into grey planes and merging them back.

use crate::buffer::{ColorMode, PixelBuffer};
use crate::error::OperationError;

/// Interleave three grey planes into one color image, in R, G, B order.
///
/// # Errors
///
/// [`OperationError::UnsupportedColorMode`] if any plane is not grey,
/// [`OperationError::MismatchedPlanes`] if their dimensions or max values
/// differ.
pub fn merge_channels(
    first: &PixelBuffer,
    second: &PixelBuffer,
    third: &PixelBuffer,
) -> Result<PixelBuffer, OperationError> {
    let planes = [first, second, third];
    if planes.iter().any(|plane| !plane.is_grey()) {
        return Err(OperationError::UnsupportedColorMode(
            "only grey planes can be merged",
        ));
    }
    for (index, plane) in planes.iter().enumerate().skip(1) {
        if plane.width() != first.width()
            || plane.height() != first.height()
            || plane.max_value() != first.max_value()
        {
            return Err(OperationError::MismatchedPlanes(format!(
                "plane {} is {}x{} (max {}), plane 1 is {}x{} (max {})",
                index + 1,
                plane.width(),
                plane.height(),
                plane.max_value(),
                first.width(),
                first.height(),
                first.max_value()
            )));
        }
    }

    let mut samples = Vec::with_capacity(first.samples().len() * 3);
    for ((a, b), c) in first
        .samples()
        .iter()
        .zip(second.samples())
        .zip(third.samples())
    {
        samples.extend_from_slice(&[*a, *b, *c]);
    }
    PixelBuffer::new(first.width(), first.height(), ColorMode::Color, samples)
}

/// Copy channel `index` (0, 1 or 2) of a color image into a grey image.
///
/// # Errors
///
/// [`OperationError::UnsupportedColorMode`] on a grey source,
/// [`OperationError::IndexOutOfBounds`] for an index above 2.
pub fn pull_channel(source: &PixelBuffer, index: usize) -> Result<PixelBuffer, OperationError> {
    if !source.is_color() {
        return Err(OperationError::UnsupportedColorMode(
            "channels can only be pulled from a color image",
        ));
    }
    if index >= ColorMode::Color.channel_count() {
        return Err(OperationError::IndexOutOfBounds(format!(
            "channel {index} of a 3-channel image"
        )));
    }
    let samples = source
        .samples()
        .chunks_exact(3)
        .map(|pixel| pixel[index])
        .collect();
    PixelBuffer::new(source.width(), source.height(), ColorMode::Grey, samples)
}

/// All three channels of a color image as grey planes.
pub fn split_channels(source: &PixelBuffer) -> Result<[PixelBuffer; 3], OperationError> {
    Ok([
        pull_channel(source, 0)?,
        pull_channel(source, 1)?,
        pull_channel(source, 2)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plane(value: u8) -> PixelBuffer {
        PixelBuffer::new(2, 1, ColorMode::Grey, vec![value, value + 1]).unwrap()
    }

    #[test]
    fn test_merge_interleaves() {
        let merged = merge_channels(&plane(10), &plane(20), &plane(30)).unwrap();
        assert!(merged.is_color());
        assert_eq!(merged.samples(), &[10, 20, 30, 11, 21, 31]);
    }

    #[test]
    fn test_split_then_merge() {
        let image =
            PixelBuffer::new(2, 1, ColorMode::Color, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let [r, g, b] = split_channels(&image).unwrap();
        assert_eq!(r.samples(), &[1, 4]);
        assert_eq!(g.samples(), &[2, 5]);
        assert_eq!(b.samples(), &[3, 6]);
        assert_eq!(merge_channels(&r, &g, &b).unwrap(), image);
    }

    #[test]
    fn test_merge_rejects_mismatched_planes() {
        let tall = PixelBuffer::new(1, 2, ColorMode::Grey, vec![0, 0]).unwrap();
        assert!(matches!(
            merge_channels(&plane(0), &tall, &plane(0)),
            Err(OperationError::MismatchedPlanes(_))
        ));
    }

    #[test]
    fn test_merge_rejects_color_plane() {
        let color = PixelBuffer::new(2, 1, ColorMode::Color, vec![0; 6]).unwrap();
        assert!(matches!(
            merge_channels(&plane(0), &plane(0), &color),
            Err(OperationError::UnsupportedColorMode(_))
        ));
    }

    #[test]
    fn test_pull_channel_errors() {
        let color = PixelBuffer::new(1, 1, ColorMode::Color, vec![7, 8, 9]).unwrap();
        assert!(matches!(
            pull_channel(&color, 3),
            Err(OperationError::IndexOutOfBounds(_))
        ));
        assert!(matches!(
            pull_channel(&plane(0), 0),
            Err(OperationError::UnsupportedColorMode(_))
        ));
        assert_eq!(pull_channel(&color, 2).unwrap().samples(), &[9]);
    }
}
