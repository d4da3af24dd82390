//! Quadratic-curve geometry for drawing connections as gentle arcs.

use std::fmt;

/// Bend applied to connection lines unless the caller asks for another.
pub const DEFAULT_CURVATURE: f64 = 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal canvas coordinate.
	pub x: f64,
	/// Vertical canvas coordinate, growing downward.
	pub y: f64,
}

impl Point {
	/// A point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A quadratic curve from `start` to `end` bent through `control`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvedPath {
	/// Where the curve begins.
	pub start: Point,
	/// Quadratic control point.
	pub control: Point,
	/// Where the curve ends.
	pub end: Point,
}

/// Control point sits on the segment midpoint, pushed sideways by
/// `curvature` times the segment vector rotated a quarter turn. Coincident
/// endpoints collapse the curve to a single point.
pub fn curved_path(x1: f64, y1: f64, x2: f64, y2: f64, curvature: f64) -> CurvedPath {
	let (mid_x, mid_y) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
	let (dx, dy) = (x2 - x1, y2 - y1);

	CurvedPath {
		start: Point::new(x1, y1),
		control: Point::new(mid_x - dy * curvature, mid_y + dx * curvature),
		end: Point::new(x2, y2),
	}
}

impl CurvedPath {
	/// Point on the curve at parameter `t` in `[0, 1]`.
	pub fn point_at(&self, t: f64) -> Point {
		let u = 1.0 - t;
		Point::new(
			u * u * self.start.x + 2.0 * u * t * self.control.x + t * t * self.end.x,
			u * u * self.start.y + 2.0 * u * t * self.control.y + t * t * self.end.y,
		)
	}
}

/// SVG path data, e.g. `M 0 0 Q 5 5 10 0`.
impl fmt::Display for CurvedPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"M {} {} Q {} {} {} {}",
			self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
		)
	}
}
