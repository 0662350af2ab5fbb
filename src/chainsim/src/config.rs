use serde::Deserialize;

use crate::area::{AREA_HEIGHT, AREA_STEP, AREA_WIDTH};
use crate::error::{SimError, SimResult};
use crate::mlcp::{PGS_EPSILON, PGS_MAX_ITERATIONS, PGS_MAX_STAGNATION};
use crate::rigid_body::DAMPING;
use crate::G;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
	pub cfm_sigma: f32, // added to the diagonal of M
	pub cfm_gamma: f32, // scales q
	pub epsilon: f32,
	pub max_iterations: usize,
	pub max_stagnation: usize,
}

impl Default for SolverConfig {
	fn default() -> Self {
		Self {
			cfm_sigma: 1.0e-6,
			cfm_gamma: 0.999,
			epsilon: PGS_EPSILON,
			max_iterations: PGS_MAX_ITERATIONS,
			max_stagnation: PGS_MAX_STAGNATION,
		}
	}
}

impl SolverConfig {
	pub fn validate(&self) -> SimResult<()> {
		check("solver.cfm_sigma", self.cfm_sigma, |v| v >= 0.0)?;
		check("solver.cfm_gamma", self.cfm_gamma, |v| v > 0.0 && v <= 1.0)?;
		check("solver.epsilon", self.epsilon, |v| v >= 0.0)
	}

	pub fn with_cfm(mut self, sigma: f32, gamma: f32) -> Self {
		self.cfm_sigma = sigma;
		self.cfm_gamma = gamma;
		self
	}

	pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
		self.max_iterations = max_iterations;
		self
	}
}

/// Every field has a default, so a scenario file only lists what it
/// changes, e.g. `{ "gravity": 4.0, "solver": { "max_iterations": 200 } }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
	pub gravity: f32,
	pub damping: f32,
	pub area: [f32; 2],
	pub area_step: f32,
	pub friction_coeff: f32, // torsional friction
	pub spring_coeff: f32, // torsional bending
	pub seed: u64,
	pub solver: SolverConfig,
}

impl Default for SimConfig {
	fn default() -> Self {
		Self {
			gravity: G,
			damping: DAMPING,
			area: [AREA_WIDTH, AREA_HEIGHT],
			area_step: AREA_STEP,
			friction_coeff: 0.01,
			spring_coeff: 10.0,
			seed: 0,
			solver: SolverConfig::default(),
		}
	}
}

impl SimConfig {
	/// Rejects values that would make the step blow up or gain energy.
	pub fn validate(&self) -> SimResult<()> {
		check("gravity", self.gravity, |_| true)?;
		check("damping", self.damping, |v| v > 0.0 && v <= 1.0)?;
		check("area.width", self.area[0], |v| v > 0.0)?;
		check("area.height", self.area[1], |v| v > 0.0)?;
		check("area_step", self.area_step, |v| v >= 0.0)?;
		check("friction_coeff", self.friction_coeff, |v| v >= 0.0)?;
		check("spring_coeff", self.spring_coeff, |v| v >= 0.0)?;
		self.solver.validate()
	}

	pub fn with_gravity(mut self, gravity: f32) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_damping(mut self, damping: f32) -> Self {
		self.damping = damping;
		self
	}

	pub fn with_area(mut self, width: f32, height: f32) -> Self {
		self.area = [width, height];
		self
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}

	pub fn with_solver(mut self, solver: SolverConfig) -> Self {
		self.solver = solver;
		self
	}
}

// non-finite values always fail
fn check(field: &'static str, value: f32, ok: impl Fn(f32) -> bool) -> SimResult<()> {
	if value.is_finite() && ok(value) {
		Ok(())
	} else {
		Err(SimError::InvalidConfig { field, value })
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_partial_json() {
		let config: SimConfig = serde_json::from_str(
			r#"{ "gravity": 4.0, "solver": { "max_iterations": 200 } }"#,
		)
		.unwrap();
		assert_eq!(config.gravity, 4.0);
		assert_eq!(config.damping, DAMPING);
		assert_eq!(config.solver.max_iterations, 200);
		assert_eq!(config.solver.cfm_gamma, 0.999);
		assert_eq!(config.area, [AREA_WIDTH, AREA_HEIGHT]);
	}

	#[test]
	fn test_builder() {
		let config = SimConfig::default()
			.with_area(2.0, 2.0)
			.with_seed(7)
			.with_solver(SolverConfig::default().with_max_iterations(10));
		assert_eq!(config.area, [2.0, 2.0]);
		assert_eq!(config.seed, 7);
		assert_eq!(config.solver.max_iterations, 10);
	}

	#[test]
	fn test_validate() {
		assert!(SimConfig::default().validate().is_ok());
		let bad = [
			SimConfig::default().with_damping(1.5),
			SimConfig::default().with_damping(0.0),
			SimConfig::default().with_area(-1.0, 1.0),
			SimConfig::default().with_gravity(f32::NAN),
			SimConfig {
				area_step: -0.001,
				..Default::default()
			},
			SimConfig::default().with_solver(SolverConfig::default().with_cfm(1e-6, 1.5)),
		];
		for config in bad.iter() {
			assert!(matches!(
				config.validate(),
				Err(SimError::InvalidConfig { .. })
			));
		}
		let err = SimConfig::default().with_damping(1.5).validate().unwrap_err();
		assert!(matches!(
			err,
			SimError::InvalidConfig { field: "damping", .. }
		));
	}
}
