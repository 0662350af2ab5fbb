use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::Deserialize;
use tracing::info;

use crate::config::SimConfig;
use crate::disc::DiscTemplate;
use crate::error::SimResult;

/// Initial world: discs in arena order plus chain links `[prev, next]`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Scenario {
	#[serde(default)]
	pub config: SimConfig,
	pub discs: Vec<DiscTemplate>,
	#[serde(default)]
	pub links: Vec<[usize; 2]>,
}

impl Scenario {
	/// A seven disc chain resting across the middle and three loose discs
	/// above it.
	pub fn default_chain() -> Self {
		let mut discs: Vec<DiscTemplate> = (0..7)
			.map(|idx| DiscTemplate::new(0.1, 0.05, [-0.3 + 0.1 * idx as f32, -0.1]))
			.collect();
		let links = (1..discs.len()).map(|idx| [idx - 1, idx]).collect();
		discs.push(DiscTemplate::new(0.2, 0.1, [-0.3, 0.3]));
		discs.push(DiscTemplate::new(0.4, 0.15, [0.0, 0.3]));
		discs.push(DiscTemplate::new(0.2, 0.08, [0.4, 0.3]));
		Self {
			config: SimConfig::default(),
			discs,
			links,
		}
	}

	/// Free discs with no links.
	pub fn loose(discs: Vec<DiscTemplate>) -> Self {
		Self {
			discs,
			..Default::default()
		}
	}

	/// Builds a linear chain over every disc in order.
	pub fn chain(discs: Vec<DiscTemplate>) -> Self {
		let links = (1..discs.len()).map(|idx| [idx - 1, idx]).collect();
		Self {
			discs,
			links,
			..Default::default()
		}
	}

	pub fn with_config(mut self, config: SimConfig) -> Self {
		self.config = config;
		self
	}

	pub fn from_json(text: &str) -> SimResult<Self> {
		let scenario: Self = serde_json::from_str(text)?;
		info!(
			"scenario: {} discs, {} links",
			scenario.discs.len(),
			scenario.links.len()
		);
		Ok(scenario)
	}
}

/// Opaque pastel color, each channel in `[120, 180) / 256`.
pub fn random_color<R: Rng>(rng: &mut R) -> [f32; 4] {
	let dist = Uniform::new(120.0f32, 180.0);
	[
		dist.sample(rng) / 256.0,
		dist.sample(rng) / 256.0,
		dist.sample(rng) / 256.0,
		1.0,
	]
}
