use crate::area::Area;
use crate::constraint::{ConstraintRow, VelocityConstraint};
use crate::disc::ChainedDisc;
use crate::V2;

/// Emits one contact per wall of `area` the disc is about to cross.
///
/// The crossing test uses the look-ahead position but the bias uses the
/// committed one, so a disc still inside the area gets a negative bias
/// that only lets the solver slow it down to reach the wall.
pub fn detect_walls(
	discs: &[ChainedDisc],
	id: usize,
	area: &Area,
	dt: f32,
	out: &mut Vec<VelocityConstraint>,
) {
	let disc = &discs[id];
	let r = disc.get_radius();
	let p = disc.get_pos();
	let p_tmp = disc.body.pos_tmp;
	let hw = 0.5 * area.width();
	let hh = 0.5 * area.height();
	let mut push = |n0: V2, signed_dist: f32| {
		out.push(VelocityConstraint::Unilateral(ConstraintRow::new(
			id,
			None,
			n0,
			n0,
			-signed_dist / dt,
		)));
	};
	if p_tmp[0] - r <= -hw {
		push(V2::new(1., 0.), p[0] - r + hw);
	}
	if p_tmp[0] + r >= hw {
		push(V2::new(-1., 0.), -(p[0] + r - hw));
	}
	if p_tmp[1] - r <= -hh {
		push(V2::new(0., 1.), p[1] - r + hh);
	}
	if p_tmp[1] + r >= hh {
		push(V2::new(0., -1.), -(p[1] + r - hh));
	}
}
