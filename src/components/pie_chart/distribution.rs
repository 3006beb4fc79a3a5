//! Asset-class aggregation and pie geometry.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Deserialize;

/// Class used for holdings without one.
pub const FALLBACK_CLASS: &str = "Other";

/// Gap between adjacent slices, in radians.
pub const PAD_ANGLE: f64 = 0.02;

/// One portfolio position with its value in the reporting currency.
#[derive(Clone, Debug, Deserialize)]
pub struct Holding {
	pub asset_id: String,
	#[serde(default)]
	pub asset_class: Option<String>,
	#[serde(default)]
	pub value_pln: Option<f64>,
}

/// Share of the portfolio held in one asset class.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassShare {
	pub class: String,
	pub value: f64,
	/// Share of the total, 0 to 100.
	pub percent: f64,
}

/// Angular extent of one slice. Angles run clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
	pub start_angle: f64,
	pub end_angle: f64,
	pub pad_angle: f64,
}

impl PieSlice {
	/// Canvas angles (0 at 3 o'clock) of the padded slice.
	pub fn canvas_angles(&self) -> (f64, f64) {
		let half_pad = (self.pad_angle / 2.0).min((self.end_angle - self.start_angle) / 2.0);
		(
			self.start_angle + half_pad - FRAC_PI_2,
			self.end_angle - half_pad - FRAC_PI_2,
		)
	}

	/// True when the padded slice spans the whole circle.
	pub fn is_full_circle(&self) -> bool {
		let (start, end) = self.canvas_angles();
		end - start >= TAU - 1e-6
	}

	/// Mid-angle point at half of `radius`, relative to the pie center.
	pub fn centroid(&self, radius: f64) -> (f64, f64) {
		let a = (self.start_angle + self.end_angle) / 2.0 - FRAC_PI_2;
		let r = radius / 2.0;
		(a.cos() * r, a.sin() * r)
	}
}

/// Sums holding values per asset class, in first-seen class order.
pub fn class_distribution(holdings: &[Holding]) -> Vec<ClassShare> {
	let mut shares: Vec<ClassShare> = Vec::new();
	for holding in holdings {
		let class = holding
			.asset_class
			.as_deref()
			.filter(|c| !c.is_empty())
			.unwrap_or(FALLBACK_CLASS);
		let value = holding.value_pln.unwrap_or(0.0);
		match shares.iter_mut().find(|s| s.class == class) {
			Some(share) => share.value += value,
			None => shares.push(ClassShare {
				class: class.to_string(),
				value,
				percent: 0.0,
			}),
		}
	}

	let total: f64 = shares.iter().map(|s| s.value).sum();
	let total = if total == 0.0 { 1.0 } else { total };
	for share in &mut shares {
		share.percent = share.value / total * 100.0;
	}
	shares
}

/// Lays the shares out around the full circle in input order.
///
/// Non-positive shares get an empty slice. Each slice also carries
/// `pad_angle`, clamped so the padding never exceeds an even split. A single
/// positive share takes the whole circle unpadded.
pub fn pie_slices(shares: &[ClassShare], pad_angle: f64) -> Vec<PieSlice> {
	let n = shares.len();
	if n == 0 {
		return Vec::new();
	}
	let sum: f64 = shares.iter().map(|s| s.percent).filter(|&p| p > 0.0).sum();
	let positive = shares.iter().filter(|s| s.percent > 0.0).count();
	let pad = if positive == 1 {
		0.0
	} else {
		pad_angle.min(TAU / n as f64)
	};
	let k = if sum > 0.0 {
		(TAU - n as f64 * pad) / sum
	} else {
		0.0
	};

	let mut angle = 0.0;
	shares
		.iter()
		.map(|share| {
			let start = angle;
			let span = if share.percent > 0.0 {
				share.percent * k
			} else {
				0.0
			};
			angle = start + span + pad;
			PieSlice {
				start_angle: start,
				end_angle: angle,
				pad_angle: pad,
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn holding(id: &str, class: Option<&str>, value: Option<f64>) -> Holding {
		Holding {
			asset_id: id.into(),
			asset_class: class.map(Into::into),
			value_pln: value,
		}
	}

	#[test]
	fn groups_by_class_in_first_seen_order() {
		let shares = class_distribution(&[
			holding("a", Some("Stocks"), Some(300.0)),
			holding("b", Some("Bonds"), Some(200.0)),
			holding("c", Some("Stocks"), Some(300.0)),
			holding("d", None, Some(200.0)),
			holding("e", Some("Bonds"), None),
		]);

		let classes: Vec<_> = shares.iter().map(|s| s.class.as_str()).collect();
		assert_eq!(classes, ["Stocks", "Bonds", FALLBACK_CLASS]);
		assert_eq!(shares[0].value, 600.0);
		for (share, want) in shares.iter().zip([60.0, 20.0, 20.0]) {
			assert!((share.percent - want).abs() < 1e-9);
		}
	}

	#[test]
	fn zero_total_does_not_divide_by_zero() {
		let shares = class_distribution(&[holding("a", Some("Cash"), None)]);
		assert_eq!(shares[0].percent, 0.0);
		let slices = pie_slices(&shares, PAD_ANGLE);
		assert_eq!(slices[0].start_angle, 0.0);
		assert!(slices[0].end_angle.is_finite());
	}

	#[test]
	fn slices_cover_the_circle() {
		let shares = class_distribution(&[
			holding("a", Some("Stocks"), Some(75.0)),
			holding("b", Some("Bonds"), Some(25.0)),
		]);
		let slices = pie_slices(&shares, PAD_ANGLE);

		assert_eq!(slices[0].start_angle, 0.0);
		assert_eq!(slices[1].start_angle, slices[0].end_angle);
		assert!((slices[1].end_angle - TAU).abs() < 1e-12);
		let span0 = slices[0].end_angle - slices[0].start_angle - PAD_ANGLE;
		let span1 = slices[1].end_angle - slices[1].start_angle - PAD_ANGLE;
		assert!((span0 / span1 - 3.0).abs() < 1e-9);
	}

	#[test]
	fn single_class_fills_the_circle() {
		let shares = class_distribution(&[
			holding("a", Some("Crypto"), Some(500.0)),
			holding("b", Some("Cash"), None),
		]);
		let slices = pie_slices(&shares, PAD_ANGLE);

		assert_eq!(slices[0].pad_angle, 0.0);
		let (start, end) = slices[0].canvas_angles();
		assert!((end - start - TAU).abs() < 1e-12);
		assert!(slices[0].is_full_circle());
		assert_eq!(slices[1].start_angle, slices[1].end_angle);
	}

	#[test]
	fn half_pie_centroid_points_right() {
		let slice = PieSlice {
			start_angle: 0.0,
			end_angle: std::f64::consts::PI,
			pad_angle: 0.0,
		};
		let (x, y) = slice.centroid(200.0);
		assert!((x - 100.0).abs() < 1e-9);
		assert!(y.abs() < 1e-9);
		assert_eq!(slice.canvas_angles(), (-FRAC_PI_2, FRAC_PI_2));
	}

	#[test]
	fn parses_holdings_payload() {
		let holdings: Vec<Holding> = serde_json::from_str(
			r#"[{"asset_id": "BTC", "asset_class": "Crypto", "value_pln": 1200.5},
			    {"asset_id": "CASH"}]"#,
		)
		.unwrap();
		assert_eq!(holdings[0].value_pln, Some(1200.5));
		assert!(holdings[1].asset_class.is_none());
	}
}
