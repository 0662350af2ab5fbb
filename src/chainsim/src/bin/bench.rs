use std::time::SystemTime;

use chainsim::scenario::Scenario;
use chainsim::{SimResult, Simulator, V2};
use tracing::info;
use tracing_subscriber::EnvFilter;

// usage: bench [scenario.json] [frames]
fn main() -> SimResult<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let mut iter = std::env::args();
	iter.next();
	let mut sim = match iter.next() {
		Some(path) => {
			let text = std::fs::read_to_string(&path)?;
			Simulator::from_scenario(&Scenario::from_json(&text)?)?
		}
		None => Simulator::default(),
	};
	let rframes: usize = iter.next().and_then(|s| s.parse().ok()).unwrap_or(600);

	let dt = 1.0 / 60.0;
	let start = SystemTime::now();
	let mut max_iterations = 0;
	for frame in 0..rframes {
		// swing the acceleration around once every ten seconds
		let phase = frame as f32 * dt * std::f32::consts::TAU / 10.0;
		let accel = V2::new(phase.sin(), -phase.cos());
		sim.update(dt, accel, 0.5);
		max_iterations = max_iterations.max(sim.last_stats().iterations);
	}
	let time = rframes as f32 * dt;
	let duration = SystemTime::now()
		.duration_since(start)
		.map(|d| d.as_micros())
		.unwrap_or(0);
	info!(
		"{} frames, load {:.3}%, max pgs iterations {}, energy {:.4e}",
		rframes,
		duration as f32 / time / 1e4,
		max_iterations,
		sim.kinetic_energy(),
	);
	Ok(())
}
