//! # Geometry Kernel
//!
//! Pure functions on plan-space points and polygons (metres). Nothing here
//! fails: degenerate numeric cases fall back to a defined value instead.
//!
//! | Operation | Degenerate case | Fallback |
//! |-----------|-----------------|----------|
//! | [`polygon_area`] | fewer than 3 points | `0.0` |
//! | [`offset`] | not a quadrilateral | input returned unchanged |
//! | [`offset`] | vertex on the centroid | vertex returned unchanged |
//! | [`segment_intersection`] | parallel, or crossing outside the segments | `None` |
//!
//! Zoning ratios (COS / CUF) and setback checks live in [`zoning`].
//!
//! ## Example
//!
//! ```rust
//! use plan_core::geometry::{rectangle, polygon_area, offset};
//!
//! let room = rectangle(0.0, 0.0, 5.0, 4.0);
//! assert!((polygon_area(&room) - 20.0).abs() < 1e-9);
//!
//! let grown = offset(&room, 0.5);
//! assert!(polygon_area(&grown) > 20.0);
//! ```

pub mod zoning;

use serde::{Deserialize, Serialize};

/// Determinant magnitude below which two lines are treated as parallel
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// A point in plan space, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f64 {
        distance(self, other)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// An implicitly closed polygon (the last vertex connects to the first).
///
/// Quadrilaterals are kept apart from other polygons because only they
/// support [`offset`]; a general polygon passes through unchanged until a
/// real polygon offset exists.
///
/// Serializes as a plain list of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub enum Polygon {
    /// Exactly four vertices
    Rectangle([Point; 4]),
    /// Any other vertex count
    General(Vec<Point>),
}

impl Polygon {
    /// Build a polygon from an ordered vertex list.
    pub fn from_points(points: Vec<Point>) -> Self {
        match <[Point; 4]>::try_from(points) {
            Ok(quad) => Polygon::Rectangle(quad),
            Err(points) => Polygon::General(points),
        }
    }

    pub fn points(&self) -> &[Point] {
        match self {
            Polygon::Rectangle(quad) => quad,
            Polygon::General(points) => points,
        }
    }

    pub fn len(&self) -> usize {
        self.points().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    /// Vertex average. `None` for an empty polygon.
    pub fn centroid(&self) -> Option<Point> {
        let points = self.points();
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let sx: f64 = points.iter().map(|p| p.x).sum();
        let sy: f64 = points.iter().map(|p| p.y).sum();
        Some(Point::new(sx / n, sy / n))
    }

    /// Absolute area, see [`polygon_area`]
    pub fn area(&self) -> f64 {
        polygon_area(self)
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Polygon::from_points(points)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        match polygon {
            Polygon::Rectangle(quad) => quad.to_vec(),
            Polygon::General(points) => points,
        }
    }
}

/// Corners of an axis-aligned rectangle, counter-clockwise from `(x, y)`.
pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Polygon {
    Polygon::Rectangle([
        Point::new(x, y),
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        Point::new(x, y + height),
    ])
}

/// Area of a rectangle from its dimensions
pub fn rectangle_area(width: f64, height: f64) -> f64 {
    width * height
}

/// Absolute polygon area by the shoelace formula.
///
/// Returns `0.0` for fewer than three points.
pub fn polygon_area(polygon: &Polygon) -> f64 {
    let points = polygon.points();
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let twice_signed: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();

    twice_signed.abs() / 2.0
}

/// Move every vertex of a quadrilateral along its ray from the centroid.
///
/// Each vertex at distance `r` from the centroid ends up at `r + distance`:
/// positive grows the shape, negative shrinks it. A vertex sitting on the
/// centroid stays where it is. Anything that is not a quadrilateral is
/// returned unchanged.
pub fn offset(polygon: &Polygon, distance: f64) -> Polygon {
    let quad = match polygon {
        Polygon::Rectangle(quad) => quad,
        Polygon::General(_) => return polygon.clone(),
    };

    let cx = quad.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = quad.iter().map(|p| p.y).sum::<f64>() / 4.0;

    let moved = quad.map(|p| {
        let dx = p.x - cx;
        let dy = p.y - cy;
        let r = dx.hypot(dy);
        if r == 0.0 {
            return p;
        }
        let factor = (r + distance) / r;
        Point::new(cx + dx * factor, cy + dy * factor)
    });

    Polygon::Rectangle(moved)
}

/// Intersection point of segments `p1-p2` and `p3-p4`.
///
/// `None` when the lines are (nearly) parallel or when they cross outside
/// either segment. Endpoints count as part of the segment.
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y)))
    } else {
        None
    }
}

/// Euclidean distance between two points
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}
