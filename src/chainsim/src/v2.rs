use crate::error::{SimError, SimResult};
use crate::V2;

/// Counter-clockwise perpendicular, `(-y, x)`.
pub fn perp(v: V2) -> V2 {
	V2::new(-v[1], v[0])
}

/// Normalizes `v`, refusing zero length instead of producing NaN.
pub fn unit(v: V2) -> SimResult<V2> {
	let l = v.magnitude();
	if !l.is_normal() {
		return Err(SimError::ZeroLength);
	}
	Ok(v / l)
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn test_perp() {
		let v = V2::new(2.0, 1.0);
		let p = perp(v);
		assert_eq!(p, V2::new(-1.0, 2.0));
		assert_relative_eq!(v.dot(&p), 0.0);
		// ccw: x axis goes to y axis
		assert_eq!(perp(V2::new(1.0, 0.0)), V2::new(0.0, 1.0));
	}

	#[test]
	fn test_unit() {
		let n = unit(V2::new(3.0, -4.0)).unwrap();
		assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-6);
		assert_relative_eq!(n[0], 0.6, epsilon = 1e-6);
		assert!(matches!(unit(V2::zeros()), Err(SimError::ZeroLength)));
	}
}
