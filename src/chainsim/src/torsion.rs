use crate::disc::ChainedDisc;
use crate::error::SimResult;
use crate::v2::{perp, unit};
use crate::G;

/// Bending resistance of the chain, acting on a disc and its two
/// neighbours.
///
/// Two force pairs are applied: an angular friction proportional to the
/// relative angular velocity of the two segments, and a bending force that
/// grows with the turn angle and saturates past 90 degrees.
#[derive(Clone, Debug)]
pub struct TorsionalSpring {
	pub gravity: f32,
	pub friction_coeff: f32,
	pub spring_coeff: f32,
}

impl Default for TorsionalSpring {
	fn default() -> Self {
		Self {
			gravity: G,
			friction_coeff: 0.01,
			spring_coeff: 10.0,
		}
	}
}

impl TorsionalSpring {
	/// Accumulates spring forces around disc `id`. Discs at either end of
	/// the chain or outside it are left alone. Fails when a neighbour sits
	/// on top of `id`, in which case no force was applied.
	pub fn apply(&self, discs: &mut [ChainedDisc], id: usize, strength: f32) -> SimResult<()> {
		let (i0, i2) = match (discs[id].prev, discs[id].next) {
			(Some(i0), Some(i2)) => (i0, i2),
			_ => return Ok(()),
		};
		let b0 = &discs[i0].body;
		let b1 = &discs[id].body;
		let b2 = &discs[i2].body;

		let vec_01 = b1.pos - b0.pos;
		let vec_12 = b2.pos - b1.pos;
		let len_01 = vec_01.magnitude();
		let len_12 = vec_12.magnitude();
		let u01 = unit(vec_01)?;
		let u12 = unit(vec_12)?;
		let perp_01 = perp(u01);
		let perp_12 = perp(u12);

		let v01_rel = (b0.vel - b1.vel) / len_01;
		let v21_rel = (b2.vel - b1.vel) / len_12;
		let ang_vel_0 = -v01_rel.dot(&perp_01);
		let ang_vel_2 = v21_rel.dot(&perp_12);
		let rel_ang_vel = ang_vel_2 - ang_vel_0;

		// signed sine of the turn, saturated for turns past 90 degrees
		let turn = if u01.dot(&u12) > 0.0 {
			u01.dot(&perp_12)
		} else if u01.dot(&perp_12) > 0.0 {
			1.0
		} else {
			-1.0
		};
		let signed_magnitude = turn * self.gravity * strength;

		let (m0, m1, m2) = (b0.get_mass(), b1.get_mass(), b2.get_mass());
		let friction = rel_ang_vel * self.friction_coeff;
		let bend = signed_magnitude * self.spring_coeff;

		discs[i0]
			.body
			.accumulate_force(perp_01 * ((bend - friction) * m0));
		discs[id]
			.body
			.accumulate_force((perp_01 + perp_12) * ((friction - bend) * m1));
		discs[i2]
			.body
			.accumulate_force(perp_12 * ((bend - friction) * m2));
		Ok(())
	}
}
