use crate::constraint::{ConstraintRow, VelocityConstraint};
use crate::disc::ChainedDisc;
use crate::error::SimResult;
use crate::v2::unit;

/// Rigid link between chain neighbours `i` and `j`, emitted every step.
///
/// The bias is positive when the pair is compressed and negative when it
/// is stretched, the solver may push or pull.
pub fn link_discs(
	discs: &[ChainedDisc],
	i: usize,
	j: usize,
	dt: f32,
) -> SimResult<VelocityConstraint> {
	let d0 = &discs[i];
	let d1 = &discs[j];
	let dp = d0.get_pos() - d1.get_pos();
	let n0 = unit(dp)?;
	let signed_dist = dp.magnitude() - (d0.get_radius() + d1.get_radius());
	Ok(VelocityConstraint::Bilateral(ConstraintRow::new(
		i,
		Some(j),
		n0,
		-n0,
		-signed_dist / dt,
	)))
}
