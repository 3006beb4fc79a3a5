//! Layout and simulation tuning.
//!
//! All distances are in graph units (pixels at zoom 1.0). The host page may
//! override any subset of fields through a JSON payload; missing fields keep
//! their defaults.

use serde::Deserialize;

/// Tuning constants for the radial layout, its physics and the view.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Radius of the ideal circle nodes live on.
	pub base_radius: f64,
	/// Drawn node radius. Also the basis of the on-circle collision distance.
	pub node_radius: f64,
	/// Radius used by the physics collide force.
	pub collide_radius: f64,
	/// On-circle pairs closer than `2 * node_radius * collision_margin` are pushed apart.
	pub collision_margin: f64,
	/// Rest length of link springs.
	pub link_distance: f64,
	/// Link spring strength.
	pub link_strength: f64,
	/// Many-body strength. Negative values repel.
	pub charge: f64,
	/// Strength of the pull toward the ideal radius for nodes off the circle.
	pub radial_strength: f64,
	pub alpha_decay: f64,
	pub alpha_min: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Energy target held while a node is dragged.
	pub drag_alpha_target: f64,
	/// Fraction of the remaining gap to the circle closed per tick.
	pub snap_factor: f64,
	/// Recenter once the view center drifts beyond `base_radius * recenter_margin`.
	pub recenter_margin: f64,
	pub recenter_duration_ms: f64,
	pub zoom_min: f64,
	pub zoom_max: f64,
	/// Idle time after the last wheel event before the zoom counts as ended.
	pub wheel_end_delay_ms: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			base_radius: 400.0,
			node_radius: 40.0,
			collide_radius: 44.0,
			collision_margin: 1.1,
			link_distance: 150.0,
			link_strength: 0.3,
			charge: -400.0,
			radial_strength: 5.0,
			alpha_decay: 0.02,
			alpha_min: 0.001,
			velocity_decay: 0.2,
			drag_alpha_target: 0.3,
			snap_factor: 0.2,
			recenter_margin: 1.2,
			recenter_duration_ms: 500.0,
			zoom_min: 0.5,
			zoom_max: 3.0,
			wheel_end_delay_ms: 150.0,
		}
	}
}

impl LayoutConfig {
	/// Minimum center distance between two nodes resting on the circle.
	pub fn min_circle_distance(&self) -> f64 {
		self.node_radius * 2.0 * self.collision_margin
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_defaults() {
		let config: LayoutConfig =
			serde_json::from_str(r#"{"base_radius": 250, "charge": -100}"#).unwrap();
		assert_eq!(config.base_radius, 250.0);
		assert_eq!(config.charge, -100.0);
		assert_eq!(config.link_distance, 150.0);
		assert!((config.min_circle_distance() - 88.0).abs() < 1e-9);
	}
}
