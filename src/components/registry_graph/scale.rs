//! Mapping between layout units and canvas pixels.

use crate::registry::Viewport;

/// Canvas padding kept clear around the viewport, in pixels.
pub const PADDING: f64 = 28.0;

/// Affine layout → screen mapping. Layout y grows upwards, screen y downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub kx: f64,
	pub ky: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			kx: 1.0,
			ky: 1.0,
		}
	}
}

impl ViewTransform {
	/// Stretch `viewport` over a `width` × `height` canvas minus [`PADDING`].
	pub fn fit(viewport: &Viewport, width: f64, height: f64) -> Self {
		let (inner_w, inner_h) = (
			(width - 2.0 * PADDING).max(1.0),
			(height - 2.0 * PADDING).max(1.0),
		);
		let kx = inner_w / viewport.width().max(f64::EPSILON);
		let ky = inner_h / viewport.height().max(f64::EPSILON);
		let (cx, cy) = viewport.center();
		Self {
			x: width / 2.0 - cx * kx,
			y: height / 2.0 + cy * ky,
			kx,
			ky,
		}
	}

	pub fn to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(self.x + gx * self.kx, self.y - gy * self.ky)
	}

	/// Move a fraction `t` of the way towards `target`.
	pub fn approach(&mut self, target: &Self, t: f64) {
		let t = t.clamp(0.0, 1.0);
		self.x += (target.x - self.x) * t;
		self.y += (target.y - self.y) * t;
		self.kx += (target.kx - self.kx) * t;
		self.ky += (target.ky - self.ky) * t;
	}
}
