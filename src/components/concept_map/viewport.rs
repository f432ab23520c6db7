/// Smallest zoom factor.
pub const MIN_SCALE: f64 = 0.5;
/// Largest zoom factor.
pub const MAX_SCALE: f64 = 2.0;
const ZOOM_IN_FACTOR: f64 = 1.1;
const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Direction of one zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
	/// Enlarge by 10%.
	In,
	/// Shrink by 10%.
	Out,
}

impl ZoomDirection {
	/// Scrolling down (positive `delta_y`) zooms out, anything else zooms in.
	pub fn from_wheel(delta_y: f64) -> Self {
		if delta_y > 0.0 { Self::Out } else { Self::In }
	}
}

/// Scale and offset between model space and canvas pixels.
///
/// `to_model` subtracts the offset before dividing by the scale so that it
/// is the exact inverse of `to_screen`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	scale: f64,
	/// Horizontal shift in screen pixels.
	pub offset_x: f64,
	/// Vertical shift in screen pixels.
	pub offset_y: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			scale: 1.0,
			offset_x: 0.0,
			offset_y: 0.0,
		}
	}
}

impl Viewport {
	/// Viewport with the scale clamped into `[MIN_SCALE, MAX_SCALE]`.
	pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
		Self {
			scale: scale.clamp(MIN_SCALE, MAX_SCALE),
			offset_x,
			offset_y,
		}
	}

	/// Current zoom factor.
	pub fn scale(&self) -> f64 {
		self.scale
	}

	/// Model coordinates to canvas pixels.
	pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
		(
			x * self.scale + self.offset_x,
			y * self.scale + self.offset_y,
		)
	}

	/// Canvas pixels to model coordinates.
	pub fn to_model(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.offset_x) / self.scale,
			(sy - self.offset_y) / self.scale,
		)
	}

	/// One wheel tick of zoom, anchored at the model origin.
	pub fn zoom(&mut self, direction: ZoomDirection) {
		let factor = match direction {
			ZoomDirection::In => ZOOM_IN_FACTOR,
			ZoomDirection::Out => ZOOM_OUT_FACTOR,
		};
		self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
	}
}
