//! Whole-buffer geometric transforms: invert, mirror and rotate.
//!
//! Every transform moves whole channel groups, so color pixels keep their
//! R, G, B order.

use crate::buffer::{sample_len, PixelBuffer};
use crate::error::OperationError;

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Swap left and right within each row.
    Horizontal,
    /// Swap top and bottom rows.
    Vertical,
}

/// Quarter-turn direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl PixelBuffer {
    /// Replace every sample `v` with `255 - v`.
    pub fn invert(&mut self) {
        for sample in self.samples_mut() {
            *sample = 255 - *sample;
        }
    }

    /// Mirror the image in place.
    pub fn mirror(&mut self, axis: Axis) {
        let (width, height) = self.dims();
        let channels = self.channel_count();
        let stride = width * channels;
        let samples = self.samples_mut();

        match axis {
            Axis::Horizontal => {
                for row in samples.chunks_exact_mut(stride.max(1)) {
                    for x in 0..width / 2 {
                        let left = x * channels;
                        let right = (width - 1 - x) * channels;
                        let (head, tail) = row.split_at_mut(right);
                        head[left..left + channels].swap_with_slice(&mut tail[..channels]);
                    }
                }
            }
            Axis::Vertical => {
                for y in 0..height / 2 {
                    let top = y * stride;
                    let bottom = (height - 1 - y) * stride;
                    let (head, tail) = samples.split_at_mut(bottom);
                    head[top..top + stride].swap_with_slice(&mut tail[..stride]);
                }
            }
        }
    }

    /// Rotate by a quarter turn. Width and height swap.
    ///
    /// # Errors
    ///
    /// [`OperationError::IndexOutOfBounds`] if the rotated buffer cannot be
    /// addressed.
    pub fn rotate(&mut self, rotation: Rotation) -> Result<(), OperationError> {
        let (width, height) = self.dims();
        let channels = self.channel_count();
        let (new_width, new_height) = (height, width);

        let len = sample_len(self.height(), self.width(), self.mode()).ok_or_else(|| {
            OperationError::IndexOutOfBounds(format!(
                "cannot allocate rotated {new_width}x{new_height} image"
            ))
        })?;
        let mut rotated = vec![0u8; len];
        let source = self.samples();

        for y in 0..height {
            for x in 0..width {
                let (new_x, new_y) = match rotation {
                    Rotation::Clockwise => (new_width - 1 - y, x),
                    Rotation::CounterClockwise => (y, new_height - 1 - x),
                };
                let from = (y * width + x) * channels;
                let to = (new_y * new_width + new_x) * channels;
                rotated[to..to + channels].copy_from_slice(&source[from..from + channels]);
            }
        }

        let mode = self.mode();
        self.replace(new_width as u64, new_height as u64, mode, rotated)
    }
}
