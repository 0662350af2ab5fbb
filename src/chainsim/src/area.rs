use crate::V2;
use protocol::pr_model::PrArea;

pub const AREA_WIDTH: f32 = 1.5;
pub const AREA_HEIGHT: f32 = 1.0;
/// Largest change of either side per step.
pub const AREA_STEP: f32 = 0.001;

/// Walls centered on the origin. The current size trails the target so
/// walls never jump when the caller resizes.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
	width: f32,
	height: f32,
	target_width: f32,
	target_height: f32,
	step: f32,
}

impl Default for Area {
	fn default() -> Self {
		Self::new(AREA_WIDTH, AREA_HEIGHT)
	}
}

impl Area {
	pub fn new(width: f32, height: f32) -> Self {
		Self {
			width,
			height,
			target_width: width,
			target_height: height,
			step: AREA_STEP,
		}
	}

	pub fn with_step(mut self, step: f32) -> Self {
		self.step = step;
		self
	}

	pub fn width(&self) -> f32 {
		self.width
	}

	pub fn height(&self) -> f32 {
		self.height
	}

	pub fn target(&self) -> [f32; 2] {
		[self.target_width, self.target_height]
	}

	pub fn set_target(&mut self, width: f32, height: f32) {
		self.target_width = width;
		self.target_height = height;
	}

	pub fn approach(&mut self) {
		let s = self.step;
		self.width += (self.target_width - self.width).clamp(-s, s);
		self.height += (self.target_height - self.height).clamp(-s, s);
	}

	/// True if a disc of radius `r` at `pos` pokes out by no more than
	/// `tol`.
	pub fn contains(&self, pos: V2, r: f32, tol: f32) -> bool {
		let hw = 0.5 * self.width + tol;
		let hh = 0.5 * self.height + tol;
		pos[0] - r >= -hw && pos[0] + r <= hw && pos[1] - r >= -hh && pos[1] + r <= hh
	}

	pub fn render(&self) -> PrArea {
		PrArea {
			width: self.width,
			height: self.height,
		}
	}
}
