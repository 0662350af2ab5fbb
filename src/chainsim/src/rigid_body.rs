use crate::error::{SimError, SimResult};
use crate::V2;

/// Linear velocity kept per step.
pub const DAMPING: f32 = 0.999;

/// Point mass with semi-implicit Euler integration.
///
/// `pos_tmp`/`vel_tmp` hold a one-step look-ahead used only by contact
/// detection, they are overwritten every step.
#[derive(Clone, Debug)]
pub struct RigidBody {
	mass: f32,
	mass_inv: f32,
	damping: f32,
	pub pos: V2,
	pub vel: V2,
	pub pos_tmp: V2,
	pub vel_tmp: V2,
	pub force: V2,
	pub impulse: V2,
}

impl RigidBody {
	pub fn new(mass: f32) -> SimResult<Self> {
		if !(mass.is_finite() && mass > 0.0) {
			return Err(SimError::InvalidMass(mass));
		}
		Ok(Self {
			mass,
			mass_inv: 1.0 / mass,
			damping: DAMPING,
			pos: V2::zeros(),
			vel: V2::zeros(),
			pos_tmp: V2::zeros(),
			vel_tmp: V2::zeros(),
			force: V2::zeros(),
			impulse: V2::zeros(),
		})
	}

	pub fn with_pos(mut self, pos: V2) -> Self {
		self.pos = pos;
		self.pos_tmp = pos;
		self
	}

	pub fn with_vel(mut self, vel: V2) -> Self {
		self.vel = vel;
		self.vel_tmp = vel;
		self
	}

	pub fn with_damping(mut self, damping: f32) -> Self {
		self.damping = damping;
		self
	}

	pub fn get_mass(&self) -> f32 {
		self.mass
	}

	pub fn get_imass(&self) -> f32 {
		self.mass_inv
	}

	pub fn reset_forces_and_impulses(&mut self) {
		self.force = V2::zeros();
		self.impulse = V2::zeros();
	}

	pub fn accumulate_force(&mut self, f: V2) {
		self.force += f;
	}

	pub fn add_impulse(&mut self, j: V2) {
		self.impulse += j;
	}

	/// Velocity this body would reach under its current force alone.
	pub fn free_vel(&self, dt: f32) -> V2 {
		self.vel + self.force * dt * self.mass_inv
	}

	pub fn update_phase_space_tmp(&mut self, dt: f32) {
		self.vel_tmp = self.free_vel(dt);
		self.pos_tmp = self.pos + self.vel_tmp * dt;
	}

	pub fn update_phase_space(&mut self, dt: f32) {
		self.vel += (self.force * dt + self.impulse) * self.mass_inv;
		self.pos += self.vel * dt;
		self.vel *= self.damping;
	}

	pub fn kinetic_energy(&self) -> f32 {
		0.5 * self.mass * self.vel.norm_squared()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn test_rejects_bad_mass() {
		assert!(matches!(RigidBody::new(0.0), Err(SimError::InvalidMass(_))));
		assert!(RigidBody::new(-2.0).is_err());
		assert!(RigidBody::new(f32::NAN).is_err());
		assert!(RigidBody::new(f32::INFINITY).is_err());
		let b = RigidBody::new(4.0).unwrap();
		assert_relative_eq!(b.get_imass(), 0.25);
	}

	#[test]
	fn test_tmp_does_not_commit() {
		let mut b = RigidBody::new(2.0).unwrap().with_pos(V2::new(1.0, 0.0));
		b.accumulate_force(V2::new(0.0, -4.0));
		b.update_phase_space_tmp(0.5);
		assert_relative_eq!(b.vel_tmp[1], -1.0);
		assert_relative_eq!(b.pos_tmp[1], -0.5);
		assert_eq!(b.pos, V2::new(1.0, 0.0));
		assert_eq!(b.vel, V2::zeros());
	}

	#[test]
	fn test_update_with_impulse_and_damping() {
		let mut b = RigidBody::new(2.0).unwrap();
		b.accumulate_force(V2::new(2.0, 0.0));
		b.accumulate_force(V2::new(2.0, 0.0));
		b.add_impulse(V2::new(0.0, 1.0));
		b.update_phase_space(0.1);
		// v = (4 * 0.1, 1) / 2
		assert_relative_eq!(b.pos[0], 0.02, epsilon = 1e-7);
		assert_relative_eq!(b.pos[1], 0.05, epsilon = 1e-7);
		assert_relative_eq!(b.vel[0], 0.2 * DAMPING, epsilon = 1e-7);
		assert_relative_eq!(b.vel[1], 0.5 * DAMPING, epsilon = 1e-7);

		b.reset_forces_and_impulses();
		assert_eq!(b.force, V2::zeros());
		assert_eq!(b.impulse, V2::zeros());
	}
}
