use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::rigid_body::RigidBody;
use crate::V2;
use protocol::pr_model::PrDisc;

/// Initial state of one disc. `color` is sampled when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscTemplate {
	pub mass: f32,
	pub radius: f32,
	pub pos: [f32; 2],
	#[serde(default)]
	pub vel: [f32; 2],
	#[serde(default)]
	pub color: Option<[f32; 4]>,
}

impl DiscTemplate {
	pub fn new(mass: f32, radius: f32, pos: [f32; 2]) -> Self {
		Self {
			mass,
			radius,
			pos,
			vel: [0.0; 2],
			color: None,
		}
	}

	pub fn with_vel(mut self, vel: [f32; 2]) -> Self {
		self.vel = vel;
		self
	}

	pub fn with_color(mut self, color: [f32; 4]) -> Self {
		self.color = Some(color);
		self
	}
}

/// Disc in the simulator arena. `prev`/`next` index the same arena.
#[derive(Clone, Debug)]
pub struct ChainedDisc {
	pub body: RigidBody,
	radius: f32,
	pub color: [f32; 4],
	pub prev: Option<usize>,
	pub next: Option<usize>,
}

impl ChainedDisc {
	pub fn new(mass: f32, radius: f32, color: [f32; 4]) -> SimResult<Self> {
		if !(radius.is_finite() && radius > 0.0) {
			return Err(SimError::InvalidRadius(radius));
		}
		Ok(Self {
			body: RigidBody::new(mass)?,
			radius,
			color,
			prev: None,
			next: None,
		})
	}

	pub fn from_template(t: &DiscTemplate, color: [f32; 4]) -> SimResult<Self> {
		let mut disc = Self::new(t.mass, t.radius, t.color.unwrap_or(color))?;
		disc.body = disc
			.body
			.with_pos(V2::from(t.pos))
			.with_vel(V2::from(t.vel));
		Ok(disc)
	}

	pub fn get_radius(&self) -> f32 {
		self.radius
	}

	pub fn get_pos(&self) -> V2 {
		self.body.pos
	}

	pub fn is_adjacent(&self, id: usize) -> bool {
		self.prev == Some(id) || self.next == Some(id)
	}

	/// Only discs inside the chain carry the torsional spring.
	pub fn is_interior(&self) -> bool {
		self.prev.is_some() && self.next.is_some()
	}

	pub fn render(&self) -> PrDisc {
		PrDisc {
			pos: [self.body.pos[0], self.body.pos[1]],
			radius: self.radius,
			color: self.color,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_rejects_bad_radius() {
		let color = [0.5, 0.5, 0.5, 1.0];
		assert!(matches!(
			ChainedDisc::new(1.0, 0.0, color),
			Err(SimError::InvalidRadius(_))
		));
		assert!(matches!(
			ChainedDisc::new(0.0, 0.1, color),
			Err(SimError::InvalidMass(_))
		));
	}

	#[test]
	fn test_template() {
		let t = DiscTemplate::new(0.2, 0.1, [0.3, -0.1]).with_vel([1.0, 0.0]);
		let d = ChainedDisc::from_template(&t, [0.1, 0.2, 0.3, 1.0]).unwrap();
		assert_eq!(d.get_pos(), V2::new(0.3, -0.1));
		assert_eq!(d.body.vel, V2::new(1.0, 0.0));
		assert_eq!(d.color, [0.1, 0.2, 0.3, 1.0]);
		assert!(!d.is_interior());

		let t = t.with_color([1.0; 4]);
		let d = ChainedDisc::from_template(&t, [0.0; 4]).unwrap();
		assert_eq!(d.render().color, [1.0; 4]);
	}

	#[test]
	fn test_links() {
		let mut d = ChainedDisc::new(1.0, 0.1, [1.0; 4]).unwrap();
		d.prev = Some(3);
		assert!(d.is_adjacent(3));
		assert!(!d.is_adjacent(5));
		assert!(!d.is_interior());
		d.next = Some(5);
		assert!(d.is_adjacent(5));
		assert!(d.is_interior());
	}
}
