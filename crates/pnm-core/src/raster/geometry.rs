//! Thick-line geometry and exact pixel-cell coverage.

use std::ops::{Add, Sub};

/// Tolerance for point-in-polygon and intersection tests.
const EPS: f64 = 1e-9;

/// A point in image space. Pixel `(x, y)` covers `[x, x+1] × [y, y+1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The rectangle swept by a segment of a given thickness.
///
/// Corners are `A = p0 + n`, `B = p1 + n`, `C = p1 - n`, `D = p0 - n`,
/// where `n` is the unit normal scaled by half the thickness. A zero-length
/// segment becomes an axis-aligned square of side `thickness` centred on
/// the point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRect {
    corners: [Point; 4],
}

impl LineRect {
    pub fn new(p0: Point, p1: Point, thickness: f64) -> Self {
        let half = thickness / 2.0;
        let delta = p1 - p0;
        let length = delta.x.hypot(delta.y);

        let (start, end, ux, uy) = if length == 0.0 {
            (
                Point::new(p0.x - half, p0.y),
                Point::new(p0.x + half, p0.y),
                1.0,
                0.0,
            )
        } else {
            (p0, p1, delta.x / length, delta.y / length)
        };

        let n = Point::new(uy * half, -ux * half);
        Self {
            corners: [start + n, end + n, end - n, start - n],
        }
    }

    /// The corners in `A, B, C, D` order.
    pub fn corners(&self) -> [Point; 4] {
        self.corners
    }

    /// `(min_x, min_y, max_x, max_y)` of the corners.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.corners.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
        )
    }

    /// Whether `point` lies inside or on the border of the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        let mut positive = false;
        let mut negative = false;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            let side = (b - a).cross(point - a);
            positive |= side > EPS;
            negative |= side < -EPS;
        }
        !(positive && negative)
    }

    /// Area of pixel cell `(x, y)` covered by the rectangle, in `[0, 1]`.
    pub fn coverage(&self, x: i64, y: i64) -> f64 {
        let (x0, y0) = (x as f64, y as f64);
        let (x1, y1) = (x0 + 1.0, y0 + 1.0);
        let cell = [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ];

        if cell.iter().all(|&corner| self.contains(corner)) {
            return 1.0;
        }

        let in_cell = |p: &Point| {
            p.x >= x0 - EPS && p.x <= x1 + EPS && p.y >= y0 - EPS && p.y <= y1 + EPS
        };

        let mut polygon: Vec<Point> = Vec::with_capacity(16);
        polygon.extend(self.corners.iter().copied().filter(in_cell));
        polygon.extend(cell.iter().copied().filter(|&c| self.contains(c)));
        for i in 0..4 {
            let (a, b) = (self.corners[i], self.corners[(i + 1) % 4]);
            for j in 0..4 {
                let (c, d) = (cell[j], cell[(j + 1) % 4]);
                if let Some(p) = intersect(a, b, c, d) {
                    polygon.push(p);
                }
            }
        }

        if polygon.len() < 3 {
            return 0.0;
        }
        polygon_area(&mut polygon).clamp(0.0, 1.0)
    }
}

/// Intersection of segments `ab` and `cd`, if they cross.
fn intersect(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross(s);
    if denom.abs() < EPS {
        return None;
    }
    let qp = c - a;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    if (-EPS..=1.0 + EPS).contains(&t) && (-EPS..=1.0 + EPS).contains(&u) {
        Some(Point::new(a.x + t * r.x, a.y + t * r.y))
    } else {
        None
    }
}

/// Area of the convex polygon spanned by `points`, in any order.
fn polygon_area(points: &mut [Point]) -> f64 {
    let count = points.len() as f64;
    let centroid = points
        .iter()
        .fold(Point::default(), |acc, &p| acc + p);
    let centroid = Point::new(centroid.x / count, centroid.y / count);

    points.sort_by(|p, q| {
        let angle_p = (p.y - centroid.y).atan2(p.x - centroid.x);
        let angle_q = (q.y - centroid.y).atan2(q.x - centroid.x);
        angle_p.total_cmp(&angle_q)
    });

    let twice_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(&p, &q)| p.cross(q))
        .sum();
    twice_area.abs() / 2.0
}
