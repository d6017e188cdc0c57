//! Anti-aliased thick lines on grey images.
//!
//! A line is modelled as the rectangle swept by the segment (see
//! [`LineRect`]). Each candidate pixel gets the exact area of its unit cell
//! covered by that rectangle, and the line color is blended into it with
//! that area as opacity. Blending happens in linear light using the
//! caller's [`Gamma`].
//!
//! # Example
//!
//! ```
//! use pnm_core::{ColorMode, Gamma, PixelBuffer, Point};
//!
//! let mut image = PixelBuffer::filled(12, 3, ColorMode::Grey, 0).unwrap();
//! image
//!     .draw_thick_line(Point::new(0.0, 1.5), Point::new(10.0, 1.5), 255, 1.0, Gamma::Srgb)
//!     .unwrap();
//! assert_eq!(image.pixel(4, 1), Some(&[255][..]));
//! assert_eq!(image.pixel(4, 0), Some(&[0][..]));
//! ```

mod geometry;
mod octant;

pub use geometry::{LineRect, Point};

use crate::buffer::PixelBuffer;
use crate::color::Gamma;
use crate::error::OperationError;

/// Margin, in pixels, added around the line's bounding box.
const BOX_MARGIN: i64 = 2;

/// How candidate pixels are enumerated. Both produce the same image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Every pixel of the line's bounding box plus a small margin.
    #[default]
    BoundingBox,
    /// A Bresenham walk along the line's major axis with a perpendicular
    /// span at each step.
    OctantWalk,
}

impl PixelBuffer {
    /// Draw a segment of the given `thickness` from `p0` to `p1`.
    ///
    /// Non-positive or NaN thickness and non-finite endpoints draw nothing.
    ///
    /// # Errors
    ///
    /// [`OperationError::UnsupportedColorMode`] on color buffers.
    pub fn draw_thick_line(
        &mut self,
        p0: Point,
        p1: Point,
        color: u8,
        thickness: f64,
        gamma: Gamma,
    ) -> Result<(), OperationError> {
        self.draw_thick_line_with(p0, p1, color, thickness, gamma, ScanStrategy::default())
    }

    /// [`draw_thick_line`](Self::draw_thick_line) with an explicit
    /// [`ScanStrategy`].
    pub fn draw_thick_line_with(
        &mut self,
        p0: Point,
        p1: Point,
        color: u8,
        thickness: f64,
        gamma: Gamma,
        strategy: ScanStrategy,
    ) -> Result<(), OperationError> {
        if !self.is_grey() {
            return Err(OperationError::UnsupportedColorMode(
                "lines can only be drawn on grey images",
            ));
        }
        if !(thickness > 0.0) || !p0.is_finite() || !p1.is_finite() {
            return Ok(());
        }

        tracing::debug!(
            x0 = p0.x,
            y0 = p0.y,
            x1 = p1.x,
            y1 = p1.y,
            thickness,
            ?strategy,
            "drawing line"
        );

        let rect = LineRect::new(p0, p1, thickness);
        let width = i64::try_from(self.width()).unwrap_or(i64::MAX);
        let height = i64::try_from(self.height()).unwrap_or(i64::MAX);

        let cells = match strategy {
            ScanStrategy::BoundingBox => bounding_box_cells(&rect, width, height),
            ScanStrategy::OctantWalk => octant::candidate_cells(p0, p1, thickness, width, height),
        };
        for (x, y) in cells {
            let coverage = rect.coverage(x, y);
            if coverage > 0.0 {
                self.draw_point(x, y, coverage, color, gamma);
            }
        }
        Ok(())
    }

    /// Blend `color` into pixel `(x, y)` with `opacity` in `0.0..=1.0`.
    ///
    /// Out-of-bounds coordinates, zero opacity and color buffers are left
    /// untouched.
    pub fn draw_point(&mut self, x: i64, y: i64, opacity: f64, color: u8, gamma: Gamma) {
        if !self.is_grey() || !(opacity > 0.0) || x < 0 || y < 0 {
            return;
        }
        let (width, height) = self.dims();
        let (x, y) = (x as u64, y as u64);
        if x >= width as u64 || y >= height as u64 {
            return;
        }

        let opacity = opacity.min(1.0);
        let index = y as usize * width + x as usize;
        let sample = &mut self.samples_mut()[index];
        let background = gamma.decode_byte(*sample);
        let foreground = gamma.decode_byte(color);
        *sample = gamma.encode_to_byte(background + (foreground - background) * opacity);
    }
}

/// Pixels of the rectangle's bounding box plus [`BOX_MARGIN`], clipped to
/// the image, in row-major order.
fn bounding_box_cells(rect: &LineRect, width: i64, height: i64) -> Vec<(i64, i64)> {
    let (min_x, min_y, max_x, max_y) = rect.bounds();
    let x0 = (min_x.floor() as i64).saturating_sub(BOX_MARGIN).max(0);
    let y0 = (min_y.floor() as i64).saturating_sub(BOX_MARGIN).max(0);
    let x1 = (max_x.ceil() as i64).saturating_add(BOX_MARGIN).min(width - 1);
    let y1 = (max_y.ceil() as i64).saturating_add(BOX_MARGIN).min(height - 1);

    (y0..=y1)
        .flat_map(|y| (x0..=x1).map(move |x| (x, y)))
        .collect()
}
