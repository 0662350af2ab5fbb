use thiserror::Error;

/// Errors raised while constructing bodies, linking the chain or loading
/// a scenario and its config. Stepping a valid simulation never fails.
#[derive(Debug, Error)]
pub enum SimError {
	/// Mass must be positive and finite.
	#[error("invalid mass: {0} (must be positive and finite)")]
	InvalidMass(f32),

	/// Radius must be positive and finite.
	#[error("invalid radius: {0} (must be positive and finite)")]
	InvalidRadius(f32),

	/// A zero-length vector cannot be normalized.
	#[error("cannot normalize a zero-length vector")]
	ZeroLength,

	#[error("disc index {index} out of bounds (count: {count})")]
	DiscOutOfBounds { index: usize, count: usize },

	/// Link would make a disc its own neighbour or overwrite an existing
	/// link.
	#[error("cannot link disc {0} to disc {1}")]
	InvalidLink(usize, usize),

	#[error("too many discs: {0} (limit {})", crate::MAX_DISCS)]
	TooManyDiscs(usize),

	/// A tunable is out of its physical range.
	#[error("invalid config: {field} = {value}")]
	InvalidConfig { field: &'static str, value: f32 },

	#[error("bad scenario: {0}")]
	Scenario(#[from] serde_json::Error),

	#[error("cannot read scenario: {0}")]
	Io(#[from] std::io::Error),
}

pub type SimResult<T> = std::result::Result<T, SimError>;
