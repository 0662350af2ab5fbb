use tracing::debug;

use crate::config::SolverConfig;
use crate::constraint::{BodyRef, VelocityConstraint};
use crate::mlcp::PgsSolver;

/// Outcome of one solve, for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolveStats {
	pub bilateral: usize,
	pub unilateral: usize,
	pub iterations: usize,
	pub error: f32,
}

impl SolveStats {
	pub fn dim(&self) -> usize {
		self.bilateral + self.unilateral
	}
}

/// Turns one step's constraints into a single MLCP and writes the
/// multipliers back. Bilateral rows come first.
pub struct ConstraintsSolver {
	mlcp: PgsSolver<f32>,
	cfm_sigma: f32,
	cfm_gamma: f32,
	bilateral: Vec<VelocityConstraint>,
	unilateral: Vec<VelocityConstraint>,
}

impl Default for ConstraintsSolver {
	fn default() -> Self {
		Self::new(&SolverConfig::default())
	}
}

impl ConstraintsSolver {
	pub fn new(config: &SolverConfig) -> Self {
		Self {
			mlcp: PgsSolver::new(
				config.epsilon,
				config.max_iterations,
				config.max_stagnation,
			),
			cfm_sigma: config.cfm_sigma,
			cfm_gamma: config.cfm_gamma,
			bilateral: Vec::new(),
			unilateral: Vec::new(),
		}
	}

	pub fn reset(&mut self) {
		self.bilateral.clear();
		self.unilateral.clear();
	}

	pub fn add(&mut self, c: VelocityConstraint) {
		match c {
			VelocityConstraint::Bilateral(_) => self.bilateral.push(c),
			VelocityConstraint::Unilateral(_) => self.unilateral.push(c),
		}
	}

	pub fn len(&self) -> usize {
		self.bilateral.len() + self.unilateral.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Constraints in MLCP row order.
	pub fn constraints(&self) -> impl Iterator<Item = &VelocityConstraint> {
		self.bilateral.iter().chain(self.unilateral.iter())
	}

	/// Hands the solved constraints out in row order and forgets them.
	pub fn drain(&mut self) -> impl Iterator<Item = VelocityConstraint> + '_ {
		self.bilateral.drain(..).chain(self.unilateral.drain(..))
	}

	pub fn run<B: BodyRef>(&mut self, dt: f32, bodies: &[B]) -> SolveStats {
		let mut stats = SolveStats {
			bilateral: self.bilateral.len(),
			unilateral: self.unilateral.len(),
			..Default::default()
		};
		if self.is_empty() {
			return stats;
		}
		self.mlcp.prepare(stats.dim());
		self.construct_m_and_q(dt, bodies);
		self.mlcp.run();
		self.assign_lambdas();

		stats.iterations = self.mlcp.iterations();
		stats.error = self.mlcp.error();
		debug!(
			"mlcp: {} bilateral, {} unilateral, {} iterations, error {:e}",
			stats.bilateral, stats.unilateral, stats.iterations, stats.error
		);
		stats
	}

	fn construct_m_and_q<B: BodyRef>(&mut self, dt: f32, bodies: &[B]) {
		let bilateral = &self.bilateral;
		let unilateral = &self.unilateral;
		let mlcp = &mut self.mlcp;
		let dim_bi = bilateral.len();
		let dim = dim_bi + unilateral.len();
		let row = move |i: usize| {
			if i < dim_bi {
				bilateral[i].row()
			} else {
				unilateral[i - dim_bi].row()
			}
		};
		for i in 0..dim {
			let c_i = row(i);
			for j in i..dim {
				let m_ij = c_i.coupling(row(j), bodies);
				if i == j {
					mlcp.set_m(i, j, m_ij + self.cfm_sigma);
				} else {
					mlcp.set_m(i, j, m_ij);
					mlcp.set_m(j, i, m_ij);
				}
			}
			mlcp.set_q(i, c_i.free_velocity(bodies, dt) * self.cfm_gamma);
			if i < dim_bi {
				mlcp.set_no_limits(i);
			} else {
				mlcp.set_unilateral_limits(i);
			}
		}
	}

	fn assign_lambdas(&mut self) {
		let mlcp = &self.mlcp;
		for (i, c) in self
			.bilateral
			.iter_mut()
			.chain(self.unilateral.iter_mut())
			.enumerate()
		{
			c.row_mut().lambda = mlcp.z(i);
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::constraint::ConstraintRow;
	use crate::rigid_body::RigidBody;
	use crate::V2;
	use approx::assert_relative_eq;

	fn x() -> V2 {
		V2::new(1.0, 0.0)
	}

	#[test]
	fn test_empty_run_is_noop() {
		let bodies = vec![RigidBody::new(1.0).unwrap()];
		let mut solver = ConstraintsSolver::default();
		solver.reset();
		let stats = solver.run(1.0 / 60.0, &bodies);
		assert_eq!(stats, SolveStats::default());
		assert!(solver.is_empty());
		assert_eq!(solver.mlcp.capacity(), 0);
		solver.reset();
		assert_eq!(solver.run(1.0 / 60.0, &bodies).dim(), 0);
	}

	#[test]
	fn test_bilateral_rows_first() {
		let mut solver = ConstraintsSolver::default();
		let wall = ConstraintRow::new(0, None, x(), x(), 0.0);
		let link = ConstraintRow::new(0, Some(1), x(), -x(), 0.0);
		solver.add(VelocityConstraint::Unilateral(wall));
		solver.add(VelocityConstraint::Bilateral(link));
		let order: Vec<bool> = solver.constraints().map(|c| c.is_bilateral()).collect();
		assert_eq!(order, vec![true, false]);
	}

	#[test]
	fn test_wall_stops_body() {
		// body moving into a wall at 2 m/s, no penetration yet
		let bodies = vec![RigidBody::new(1.0).unwrap().with_vel(V2::new(-2.0, 0.0))];
		let mut solver = ConstraintsSolver::default();
		solver.reset();
		solver.add(VelocityConstraint::Unilateral(ConstraintRow::new(
			0,
			None,
			x(),
			x(),
			0.0,
		)));
		let stats = solver.run(0.1, &bodies);
		assert_eq!(stats.unilateral, 1);
		let lambda = solver.constraints().next().unwrap().row().lambda;
		// (1 + sigma) lambda = 2 * gamma
		assert_relative_eq!(lambda, 2.0 * 0.999 / (1.0 + 1e-6), epsilon = 1e-5);
	}

	#[test]
	fn test_separating_contact_does_not_pull() {
		let bodies = vec![RigidBody::new(1.0).unwrap().with_vel(V2::new(2.0, 0.0))];
		let mut solver = ConstraintsSolver::default();
		solver.add(VelocityConstraint::Unilateral(ConstraintRow::new(
			0,
			None,
			x(),
			x(),
			0.0,
		)));
		solver.run(0.1, &bodies);
		assert_eq!(solver.constraints().next().unwrap().row().lambda, 0.0);
	}

	#[test]
	fn test_link_pulls_back() {
		// bodies 0 and 1 flying apart along x, link wants zero relative speed
		let bodies = vec![
			RigidBody::new(1.0).unwrap().with_vel(V2::new(1.0, 0.0)),
			RigidBody::new(1.0).unwrap().with_vel(V2::new(-1.0, 0.0)),
		];
		let mut solver = ConstraintsSolver::default();
		solver.add(VelocityConstraint::Bilateral(ConstraintRow::new(
			0,
			Some(1),
			x(),
			-x(),
			0.0,
		)));
		solver.run(0.1, &bodies);
		let mut drained: Vec<_> = solver.drain().collect();
		assert!(solver.is_empty());
		let row = drained.remove(0);
		// relative speed 2, effective mass 1/2
		assert_relative_eq!(row.row().lambda, -1.0 * 0.999, epsilon = 1e-4);
	}

	#[test]
	fn test_shared_body_coupling() {
		// a chain of three with both links stretched at the same rate
		let bodies = vec![
			RigidBody::new(1.0).unwrap().with_vel(V2::new(-1.0, 0.0)),
			RigidBody::new(1.0).unwrap(),
			RigidBody::new(1.0).unwrap().with_vel(V2::new(1.0, 0.0)),
		];
		let mut solver = ConstraintsSolver::default();
		for (a, b) in [(1, 0), (2, 1)] {
			solver.add(VelocityConstraint::Bilateral(ConstraintRow::new(
				a,
				Some(b),
				x(),
				-x(),
				0.0,
			)));
		}
		solver.run(0.1, &bodies);
		let mut bodies = bodies;
		for c in solver.drain() {
			c.row().apply_impulse(&mut bodies);
		}
		for b in bodies.iter_mut() {
			b.update_phase_space(0.1);
		}
		// all three end up moving together
		assert_relative_eq!(bodies[0].vel[0], bodies[1].vel[0], epsilon = 1e-2);
		assert_relative_eq!(bodies[2].vel[0], bodies[1].vel[0], epsilon = 1e-2);
	}
}
