use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Floating point types the solver runs on.
pub trait Scalar:
	Copy
	+ PartialOrd
	+ Debug
	+ Default
	+ Add<Output = Self>
	+ Sub<Output = Self>
	+ Mul<Output = Self>
	+ Div<Output = Self>
	+ Neg<Output = Self>
{
	fn zero() -> Self;
	fn max_value() -> Self;
	fn abs(self) -> Self;
	fn from_f32(v: f32) -> Self;

	fn clamp_to(self, lo: Self, hi: Self) -> Self {
		let v = if self < lo { lo } else { self };
		if v > hi {
			hi
		} else {
			v
		}
	}
}

impl Scalar for f32 {
	fn zero() -> Self {
		0.0
	}

	fn max_value() -> Self {
		f32::MAX
	}

	fn abs(self) -> Self {
		f32::abs(self)
	}

	fn from_f32(v: f32) -> Self {
		v
	}
}

impl Scalar for f64 {
	fn zero() -> Self {
		0.0
	}

	fn max_value() -> Self {
		f64::MAX
	}

	fn abs(self) -> Self {
		f64::abs(self)
	}

	fn from_f32(v: f32) -> Self {
		v as f64
	}
}

pub const PGS_EPSILON: f32 = 1.0e-8;
pub const PGS_MAX_ITERATIONS: usize = 1000;
pub const PGS_MAX_STAGNATION: usize = 5;

// slots after M in the arena, each `capacity` long
const Q: usize = 0;
const Z: usize = 1;
const W: usize = 2;
const LO: usize = 3;
const HI: usize = 4;
const VECTORS: usize = 5;

/// Projected Gauss-Seidel for `M z + q = w`, each row either strictly
/// inside its bounds with `w = 0` or pinned at `lo` (`w >= 0`) or `hi`
/// (`w <= 0`). `M` must be symmetric positive definite.
pub struct PgsSolver<T: Scalar> {
	epsilon: T,
	max_iterations: usize,
	max_stagnation: usize,
	error_history: Vec<T>,
	iterations: usize,

	// M (capacity x capacity) followed by q, z, w, lo, hi
	base: Vec<T>,
	capacity: usize,
	dim: usize,
}

impl<T: Scalar> Default for PgsSolver<T> {
	fn default() -> Self {
		Self::new(
			T::from_f32(PGS_EPSILON),
			PGS_MAX_ITERATIONS,
			PGS_MAX_STAGNATION,
		)
	}
}

impl<T: Scalar> PgsSolver<T> {
	pub fn new(epsilon: T, max_iterations: usize, max_stagnation: usize) -> Self {
		Self {
			epsilon,
			max_iterations,
			max_stagnation,
			error_history: Vec::new(),
			iterations: 0,
			base: Vec::new(),
			capacity: 0,
			dim: 0,
		}
	}

	pub fn dim(&self) -> usize {
		self.dim
	}

	/// Largest dimension the current arena holds without growing.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn iterations(&self) -> usize {
		self.iterations
	}

	/// Merit error after the last sweep, zero before any sweep.
	pub fn error(&self) -> T {
		self.error_history.last().copied().unwrap_or_else(T::zero)
	}

	/// Sizes the problem to `dim` rows and zeroes `M`, `q` and `z`.
	///
	/// Storage grows to twice the request when too small and is never
	/// shrunk. Old contents are discarded on growth.
	pub fn prepare(&mut self, dim: usize) {
		if self.capacity < dim {
			let capacity = dim * 2;
			self.base = vec![T::zero(); (capacity + VECTORS) * capacity];
			self.capacity = capacity;
		}
		self.dim = dim;
		self.error_history.clear();
		self.iterations = 0;

		self.base[..dim * dim].fill(T::zero());
		for slot in [Q, Z] {
			let start = self.slot(slot);
			self.base[start..start + dim].fill(T::zero());
		}
	}

	fn slot(&self, slot: usize) -> usize {
		(self.capacity + slot) * self.capacity
	}

	fn m(&self, row: usize, col: usize) -> T {
		self.base[row * self.dim + col]
	}

	fn v(&self, slot: usize, i: usize) -> T {
		self.base[self.slot(slot) + i]
	}

	fn v_mut(&mut self, slot: usize, i: usize) -> &mut T {
		let start = self.slot(slot);
		&mut self.base[start + i]
	}

	pub fn set_m(&mut self, i: usize, j: usize, v: T) {
		let dim = self.dim;
		self.base[i * dim + j] = v;
	}

	pub fn set_q(&mut self, i: usize, v: T) {
		*self.v_mut(Q, i) = v;
	}

	pub fn set_limits(&mut self, i: usize, lo: T, hi: T) {
		*self.v_mut(LO, i) = lo;
		*self.v_mut(HI, i) = hi;
	}

	pub fn set_no_limits(&mut self, i: usize) {
		self.set_limits(i, -T::max_value(), T::max_value());
	}

	pub fn set_unilateral_limits(&mut self, i: usize) {
		self.set_limits(i, T::zero(), T::max_value());
	}

	pub fn z(&self, i: usize) -> T {
		self.v(Z, i)
	}

	/// Residual `M z + q` of the last sweep for row `i`.
	pub fn w(&self, i: usize) -> T {
		self.v(W, i)
	}

	fn row_dot_z(&self, row: usize) -> T {
		let mut dot = T::zero();
		for col in 0..self.dim {
			dot = dot + self.m(row, col) * self.v(Z, col);
		}
		dot
	}

	/// Runs sweeps until `max_iterations` or until the merit error has
	/// gone up more than `max_stagnation` times. The result is the last
	/// iterate either way.
	pub fn run(&mut self) {
		self.iterations = 0;
		if self.dim == 0 {
			return;
		}
		while self.iterations < self.max_iterations {
			self.iterations += 1;
			self.sweep();
			self.merit_error();
			if self.stagnated() {
				break;
			}
		}
	}

	// z^{r+1} = -(q + L z^{r+1} + U z^r) / D, z updated in place
	fn sweep(&mut self) {
		for row in 0..self.dim {
			let diag = self.m(row, row);
			let dot = self.row_dot_z(row);
			let z = self.v(Z, row);
			let lo = self.v(LO, row);
			let hi = self.v(HI, row);
			let q = self.v(Q, row);
			*self.v_mut(Z, row) = ((diag * z - dot - q) / diag).clamp_to(lo, hi);
		}
	}

	fn merit_error(&mut self) {
		let mut error = T::zero();
		for row in 0..self.dim {
			let mzq = self.row_dot_z(row) + self.v(Q, row);
			*self.v_mut(W, row) = mzq;
			let z = self.v(Z, row);
			let interior = z > self.v(LO, row) + self.epsilon
				&& z < self.v(HI, row) - self.epsilon;
			// pinned rows keep a residual by construction
			if interior {
				error = error + mzq.abs();
			}
		}
		self.error_history.push(error);
	}

	fn stagnated(&self) -> bool {
		let count = self
			.error_history
			.windows(2)
			.filter(|w| w[0] < w[1])
			.count();
		count > self.max_stagnation
	}
}
