// pr_model: Physical model for rendering

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrDisc {
	pub pos: [f32; 2],
	pub radius: f32,
	pub color: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrArea {
	pub width: f32,
	pub height: f32,
}

/// One frame worth of drawable state.
///
/// `discs` keeps the simulator's arena order, the renderer indexes
/// instances by position in this list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrModel {
	pub discs: Vec<PrDisc>,
	pub area: PrArea,
}

impl Default for PrArea {
	fn default() -> Self {
		Self {
			width: 1.5,
			height: 1.0,
		}
	}
}

impl PrModel {
	pub fn len(&self) -> usize {
		self.discs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.discs.is_empty()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_json_layout() {
		let model = PrModel {
			discs: vec![PrDisc {
				pos: [0.1, -0.2],
				radius: 0.05,
				color: [0.5, 0.6, 0.7, 1.0],
			}],
			area: PrArea::default(),
		};
		let text = serde_json::to_string(&model).unwrap();
		assert!(text.contains("\"radius\":0.05"));
		let back: PrModel = serde_json::from_str(&text).unwrap();
		assert_eq!(back, model);
		assert_eq!(back.len(), 1);
	}
}
