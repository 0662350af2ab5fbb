use crate::constraint::{ConstraintRow, VelocityConstraint};
use crate::disc::ChainedDisc;
use crate::EPSILON;

/// Contact between two discs that are not chain neighbours.
///
/// The look-ahead positions decide whether the pair is close enough, the
/// committed positions give the normal and the bias.
pub fn detect_pair(
	discs: &[ChainedDisc],
	i: usize,
	j: usize,
	dt: f32,
) -> Option<VelocityConstraint> {
	let d0 = &discs[i];
	let d1 = &discs[j];
	if d0.is_adjacent(j) || d1.is_adjacent(i) {
		return None;
	}
	let min_dist = d0.get_radius() + d1.get_radius();
	let dp_tmp = d0.body.pos_tmp - d1.body.pos_tmp;
	if dp_tmp.norm_squared() > min_dist * min_dist + EPSILON {
		return None;
	}
	let dp = d0.get_pos() - d1.get_pos();
	let l = dp.magnitude();
	if l < EPSILON {
		return None;
	}
	let n0 = dp / l;
	let signed_dist = l - min_dist;
	Some(VelocityConstraint::Unilateral(ConstraintRow::new(
		i,
		Some(j),
		n0,
		-n0,
		-signed_dist / dt,
	)))
}
