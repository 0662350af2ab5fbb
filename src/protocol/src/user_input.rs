use crate::view::View;
use crate::V2;

/// Largest time step ever handed to the simulator.
pub const MAX_DT: f32 = 1.0 / 60.0;
/// Frames arriving sooner than this are skipped.
pub const MIN_FRAME_DT: f32 = 0.015;
pub const TORSION_STEP: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TorsionKey {
	Stronger,
	Weaker,
}

/// Everything the simulator consumes for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
	pub dt: f32,
	pub accel: V2,
	pub torsion: f32,
	pub target_area: Option<[f32; 2]>,
}

impl FrameInput {
	pub fn new(dt: f32, accel: V2, torsion: f32) -> Self {
		Self {
			dt,
			accel,
			torsion,
			target_area: None,
		}
	}

	pub fn with_target_area(mut self, width: f32, height: f32) -> Self {
		self.target_area = Some([width, height]);
		self
	}

	/// Applies the caller-side contract: `dt <= MAX_DT`, `|accel| <= 1`,
	/// `torsion` in `[0, 1]`.
	pub fn clamped(mut self) -> Self {
		self.dt = self.dt.min(MAX_DT);
		if self.accel.norm_squared() > 1.0 {
			self.accel = self.accel.normalize();
		}
		self.torsion = self.torsion.clamp(0.0, 1.0);
		self
	}
}

/// Frame pacing and input conditioning for a windowed front end.
pub struct UserInput {
	view: View,
	time_prev: f32,
	torsion: f32,
}

impl UserInput {
	pub fn new(window_size: [u32; 2], now: f32) -> Self {
		Self {
			view: View::new(window_size),
			time_prev: now,
			torsion: 0.0,
		}
	}

	pub fn resize(&mut self, new_size: [u32; 2]) {
		self.view.resize(new_size);
	}

	pub fn torsion(&self) -> f32 {
		self.torsion
	}

	pub fn press(&mut self, key: TorsionKey) {
		self.torsion = match key {
			TorsionKey::Stronger => (self.torsion + TORSION_STEP).min(1.0),
			TorsionKey::Weaker => (self.torsion - TORSION_STEP).max(0.0),
		};
	}

	/// Returns `None` until at least `MIN_FRAME_DT` has passed since the
	/// last accepted frame.
	pub fn poll(&mut self, now: f32, cursor: V2) -> Option<FrameInput> {
		let dt = (now - self.time_prev).min(MAX_DT);
		if dt < MIN_FRAME_DT {
			return None;
		}
		self.time_prev = now;
		let [w, h] = self.view.normalized_area();
		let accel = self.view.cursor_accel(cursor);
		Some(FrameInput::new(dt, accel, self.torsion).with_target_area(w, h))
	}
}
