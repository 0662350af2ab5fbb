pub mod area;
pub mod config;
pub mod constraint;
pub mod constraints_solver;
pub mod disc;
pub mod error;
pub mod mlcp;
pub mod rigid_body;
pub mod scenario;
pub mod simulator;
pub mod torsion;
pub mod v2;

pub use error::{SimError, SimResult};
pub use simulator::Simulator;

pub type V2 = nalgebra::Vector2<f32>;

/// Gravitational acceleration in m/s^2, scaled by the caller's acceleration.
pub const G: f32 = 9.81;
/// Numerical margin shared by contact tests.
pub const EPSILON: f32 = 1.0e-4;
/// Renderer instance limit.
pub const MAX_DISCS: usize = 100;
