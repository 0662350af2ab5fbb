use crate::V2;

/// Maps window pixels into the simulator's normalized units.
///
/// The shorter window edge spans one unit, so the area handed to the
/// simulator is `[aspect, 1]` or `[1, aspect]`.
pub struct View {
	screen_r: V2, // half size
}

impl Default for View {
	fn default() -> Self {
		Self {
			screen_r: V2::new(576., 384.),
		}
	}
}

impl View {
	pub fn new(size: [u32; 2]) -> Self {
		let mut result = Self::default();
		result.resize(size);
		result
	}

	pub fn resize(&mut self, new_size: [u32; 2]) {
		self.screen_r[0] = new_size[0].max(1) as f32 / 2.;
		self.screen_r[1] = new_size[1].max(1) as f32 / 2.;
	}

	pub fn normalized_area(&self) -> [f32; 2] {
		let w = self.screen_r[0];
		let h = self.screen_r[1];
		if w > h {
			[w / h, 1.0]
		} else if w < h {
			[1.0, h / w]
		} else {
			[1.0, 1.0]
		}
	}

	// screen to world, y up
	pub fn s2w(&self, pos: V2) -> V2 {
		let edge = 2. * self.screen_r[0].max(self.screen_r[1]);
		let d = pos - self.screen_r;
		V2::new(d[0] / edge, -d[1] / edge)
	}

	/// Cursor offset from the window center, clamped to unit length.
	pub fn cursor_accel(&self, pos: V2) -> V2 {
		let accel = self.s2w(pos);
		if accel.norm_squared() > 1.0 {
			accel.normalize()
		} else {
			accel
		}
	}
}
