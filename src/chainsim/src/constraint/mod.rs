pub mod contact;
pub mod link;
pub mod wall;

use crate::disc::ChainedDisc;
use crate::rigid_body::RigidBody;
use crate::V2;

/// Anything the constraints solver can read masses and velocities from.
pub trait BodyRef {
	fn body(&self) -> &RigidBody;
	fn body_mut(&mut self) -> &mut RigidBody;
}

impl BodyRef for RigidBody {
	fn body(&self) -> &RigidBody {
		self
	}

	fn body_mut(&mut self) -> &mut RigidBody {
		self
	}
}

impl BodyRef for ChainedDisc {
	fn body(&self) -> &RigidBody {
		&self.body
	}

	fn body_mut(&mut self) -> &mut RigidBody {
		&mut self.body
	}
}

/// One complementarity row. Body indices are only valid for the step the
/// row was built in.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintRow {
	pub body_0: usize,
	pub body_1: Option<usize>, // None for walls
	pub n0: V2,
	pub n1: V2,
	pub b: f32,
	pub lambda: f32,
}

impl ConstraintRow {
	pub fn new(body_0: usize, body_1: Option<usize>, n0: V2, n1: V2, b: f32) -> Self {
		Self {
			body_0,
			body_1,
			n0,
			n1,
			b,
			lambda: 0.0,
		}
	}

	fn normal_for(&self, id: usize) -> Option<V2> {
		if self.body_0 == id {
			Some(self.n0)
		} else if self.body_1 == Some(id) {
			Some(self.n1)
		} else {
			None
		}
	}

	/// Effective-mass coupling of two rows through their shared bodies.
	pub fn coupling<B: BodyRef>(&self, other: &ConstraintRow, bodies: &[B]) -> f32 {
		let mut m = 0.0;
		if let Some(n) = other.normal_for(self.body_0) {
			m += self.n0.dot(&n) * bodies[self.body_0].body().get_imass();
		}
		if let Some(id) = self.body_1 {
			if let Some(n) = other.normal_for(id) {
				m += self.n1.dot(&n) * bodies[id].body().get_imass();
			}
		}
		m
	}

	/// `-b` plus the normal velocity the bodies would reach under their
	/// accumulated forces alone.
	pub fn free_velocity<B: BodyRef>(&self, bodies: &[B], dt: f32) -> f32 {
		let mut q = -self.b;
		q += self.n0.dot(&bodies[self.body_0].body().free_vel(dt));
		if let Some(id) = self.body_1 {
			q += self.n1.dot(&bodies[id].body().free_vel(dt));
		}
		q
	}

	pub fn apply_impulse<B: BodyRef>(&self, bodies: &mut [B]) {
		bodies[self.body_0]
			.body_mut()
			.add_impulse(self.n0 * self.lambda);
		if let Some(id) = self.body_1 {
			bodies[id].body_mut().add_impulse(self.n1 * self.lambda);
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum VelocityConstraint {
	/// Contact, one-sided impulse.
	Unilateral(ConstraintRow),
	/// Chain link, impulse of either sign.
	Bilateral(ConstraintRow),
}

impl VelocityConstraint {
	pub fn row(&self) -> &ConstraintRow {
		match self {
			Self::Unilateral(row) | Self::Bilateral(row) => row,
		}
	}

	pub fn row_mut(&mut self) -> &mut ConstraintRow {
		match self {
			Self::Unilateral(row) | Self::Bilateral(row) => row,
		}
	}

	pub fn is_bilateral(&self) -> bool {
		matches!(self, Self::Bilateral(_))
	}
}
