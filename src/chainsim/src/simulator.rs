use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::area::Area;
use crate::config::SimConfig;
use crate::constraint::contact::detect_pair;
use crate::constraint::link::link_discs;
use crate::constraint::wall::detect_walls;
use crate::constraint::VelocityConstraint;
use crate::constraints_solver::{ConstraintsSolver, SolveStats};
use crate::disc::{ChainedDisc, DiscTemplate};
use crate::error::{SimError, SimResult};
use crate::scenario::{random_color, Scenario};
use crate::torsion::TorsionalSpring;
use crate::{V2, MAX_DISCS};
use protocol::pr_model::PrModel;
use protocol::user_input::FrameInput;

/// Owns the discs and runs one constraint solve per step.
pub struct Simulator {
	config: SimConfig,
	area: Area,
	discs: Vec<ChainedDisc>,
	constraints: Vec<VelocityConstraint>,
	solver: ConstraintsSolver,
	spring: TorsionalSpring,
	rng: StdRng,
	last_stats: SolveStats,
}

impl Default for Simulator {
	fn default() -> Self {
		Self::from_scenario(&Scenario::default_chain())
			.expect("built-in scenario is valid")
	}
}

impl Simulator {
	/// Empty world with the given tunables.
	pub fn new(config: SimConfig) -> SimResult<Self> {
		config.validate()?;
		let area = Area::new(config.area[0], config.area[1]).with_step(config.area_step);
		let spring = TorsionalSpring {
			gravity: config.gravity,
			friction_coeff: config.friction_coeff,
			spring_coeff: config.spring_coeff,
		};
		Ok(Self {
			solver: ConstraintsSolver::new(&config.solver),
			rng: StdRng::seed_from_u64(config.seed),
			area,
			spring,
			config,
			discs: Vec::new(),
			constraints: Vec::new(),
			last_stats: SolveStats::default(),
		})
	}

	pub fn from_scenario(scenario: &Scenario) -> SimResult<Self> {
		let mut result = Self::new(scenario.config.clone())?;
		for t in scenario.discs.iter() {
			result.add_disc(t)?;
		}
		for [a, b] in scenario.links.iter() {
			result.link(*a, *b)?;
		}
		info!(
			"simulator: {} discs, {} links",
			result.discs.len(),
			scenario.links.len()
		);
		Ok(result)
	}

	fn push_disc(&mut self, mut disc: ChainedDisc) -> usize {
		disc.body = disc.body.with_damping(self.config.damping);
		self.discs.push(disc);
		self.discs.len() - 1
	}

	/// Appends a free disc and returns its index.
	pub fn add_disc(&mut self, t: &DiscTemplate) -> SimResult<usize> {
		if self.discs.len() >= MAX_DISCS {
			return Err(SimError::TooManyDiscs(self.discs.len() + 1));
		}
		let color = random_color(&mut self.rng);
		let disc = ChainedDisc::from_template(t, color)?;
		Ok(self.push_disc(disc))
	}

	/// Makes `b` the chain successor of `a`.
	pub fn link(&mut self, a: usize, b: usize) -> SimResult<()> {
		let count = self.discs.len();
		for index in [a, b] {
			if index >= count {
				return Err(SimError::DiscOutOfBounds { index, count });
			}
		}
		if a == b || self.discs[a].next.is_some() || self.discs[b].prev.is_some() {
			return Err(SimError::InvalidLink(a, b));
		}
		// chains stay open: `a` must not already follow `b`
		let mut cursor = self.discs[b].next;
		while let Some(id) = cursor {
			if id == a {
				return Err(SimError::InvalidLink(a, b));
			}
			cursor = self.discs[id].next;
		}
		self.discs[a].next = Some(b);
		self.discs[b].prev = Some(a);
		Ok(())
	}

	pub fn discs(&self) -> &[ChainedDisc] {
		&self.discs
	}

	pub fn area(&self) -> &Area {
		&self.area
	}

	pub fn config(&self) -> &SimConfig {
		&self.config
	}

	/// Solver report of the last step.
	pub fn last_stats(&self) -> SolveStats {
		self.last_stats
	}

	pub fn set_target_area_size(&mut self, width: f32, height: f32) {
		self.area.set_target(width, height);
	}

	pub fn kinetic_energy(&self) -> f32 {
		self.discs.iter().map(|d| d.body.kinetic_energy()).sum()
	}

	pub fn pr_model(&self) -> PrModel {
		PrModel {
			discs: self.discs.iter().map(|d| d.render()).collect(),
			area: self.area.render(),
		}
	}

	pub fn apply_input(&mut self, input: &FrameInput) {
		if let Some([w, h]) = input.target_area {
			self.set_target_area_size(w, h);
		}
		self.update(input.dt, input.accel, input.torsion);
	}

	/// Advances the world by `dt` under the external acceleration `accel`
	/// (scaled by gravity) with the given torsional spring strength.
	pub fn update(&mut self, dt: f32, accel: V2, torsion: f32) {
		if !(dt.is_finite() && dt > 0.0) {
			warn!("skip step: bad dt {}", dt);
			return;
		}
		self.area.approach();
		self.accumulate_forces(accel, torsion);
		for disc in self.discs.iter_mut() {
			disc.body.update_phase_space_tmp(dt);
		}
		self.detect_collisions(dt);
		self.construct_bilateral_constraints(dt);

		self.solver.reset();
		for c in self.constraints.drain(..) {
			self.solver.add(c);
		}
		self.last_stats = self.solver.run(dt, &self.discs);
		for c in self.solver.drain() {
			c.row().apply_impulse(&mut self.discs);
		}

		for disc in self.discs.iter_mut() {
			disc.body.update_phase_space(dt);
		}
	}

	fn accumulate_forces(&mut self, accel: V2, torsion: f32) {
		for disc in self.discs.iter_mut() {
			let body = &mut disc.body;
			body.reset_forces_and_impulses();
			body.accumulate_force(accel * body.get_mass() * self.config.gravity);
		}
		for id in 0..self.discs.len() {
			if let Err(e) = self.spring.apply(&mut self.discs, id, torsion) {
				warn!("torsional spring skipped at disc {}: {}", id, e);
			}
		}
	}

	fn detect_collisions(&mut self, dt: f32) {
		for i in 0..self.discs.len() {
			for j in i + 1..self.discs.len() {
				if let Some(c) = detect_pair(&self.discs, i, j, dt) {
					self.constraints.push(c);
				}
			}
			detect_walls(&self.discs, i, &self.area, dt, &mut self.constraints);
		}
	}

	fn construct_bilateral_constraints(&mut self, dt: f32) {
		for i in 0..self.discs.len() {
			let j = match self.discs[i].next {
				Some(j) => j,
				None => continue,
			};
			match link_discs(&self.discs, i, j, dt) {
				Ok(c) => self.constraints.push(c),
				Err(e) => warn!("link {} -> {} skipped: {}", i, j, e),
			}
		}
		debug!("{} constraints", self.constraints.len());
	}
}
