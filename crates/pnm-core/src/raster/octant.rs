//! Octant-aware Bresenham walk over the cells a thick line may touch.
//!
//! The walk steps one cell at a time along the major axis of the extended
//! centreline and yields a perpendicular span around each step. The span
//! is wide enough that every cell with non-zero coverage is produced.

use std::collections::BTreeSet;

use super::geometry::Point;

/// Minor-axis coordinates are clamped to this magnitude; anything that far
/// out cannot be inside an image.
const LIMIT: i64 = 1 << 40;

/// Candidate cells `(x, y)` inside a `width` x `height` image for a line of
/// `thickness` from `p0` to `p1`. Cells are unique and in row-major order.
pub(crate) fn candidate_cells(
    p0: Point,
    p1: Point,
    thickness: f64,
    width: i64,
    height: i64,
) -> Vec<(i64, i64)> {
    let mut cells = BTreeSet::new();
    let half = thickness / 2.0;
    let length = (p1.x - p0.x).hypot(p1.y - p0.y);

    // Work in (major, minor) coordinates.
    let steep = (p1.y - p0.y).abs() > (p1.x - p0.x).abs();
    let swap = |p: Point| if steep { Point::new(p.y, p.x) } else { p };
    let (mut start, mut end) = (swap(p0), swap(p1));
    if start.x > end.x {
        std::mem::swap(&mut start, &mut end);
    }
    let (major_limit, minor_limit) = if steep { (height, width) } else { (width, height) };

    let run = end.x - start.x;
    let slope = if run == 0.0 { 0.0 } else { (end.y - start.y) / run };
    let pad = (thickness.ceil() as i64).saturating_add(2).min(LIMIT);
    let span = if run == 0.0 {
        half.ceil() as i64
    } else {
        (half * length / run).ceil() as i64
    }
    .saturating_add(3)
    .min(LIMIT);

    let a0 = (start.x.floor() as i64).saturating_sub(pad).max(0);
    let a1 = (end.x.ceil() as i64).saturating_add(pad).min(major_limit - 1);
    if a0 > a1 {
        return Vec::new();
    }
    let minor_at = |a: i64| {
        ((start.y + slope * (a as f64 - start.x)).round() as i64).clamp(-LIMIT, LIMIT)
    };
    let (b0, b1) = (minor_at(a0), minor_at(a1));

    let da = a1 - a0;
    let db = (b1 - b0).abs();
    let step = if b1 >= b0 { 1 } else { -1 };
    let mut err = 2 * db - da;
    let mut b = b0;

    for a in a0..=a1 {
        let low = (b - span).max(0);
        let high = (b + span).min(minor_limit - 1);
        for minor in low..=high {
            let (x, y) = if steep { (minor, a) } else { (a, minor) };
            cells.insert((y, x));
        }
        if err > 0 {
            b += step;
            err -= 2 * da;
        }
        err += 2 * db;
    }

    cells.into_iter().map(|(y, x)| (x, y)).collect()
}
