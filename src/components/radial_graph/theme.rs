//! Visual theming for the radial graph.
//!
//! Colors for the background, guide circle, nodes and correlation edges, plus
//! the edge encoding: width from weight magnitude, hue from weight sign.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Edge colors and label fonts.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Stroke for positive correlations.
	pub positive: Color,
	/// Stroke for zero or negative correlations.
	pub negative: Color,
	/// Stroke and label color of the selected edge.
	pub selected: Color,
	/// Extra width added to the selected edge.
	pub selected_extra_width: f64,
	pub opacity: f64,
	pub label_color: Color,
	pub label_font: &'static str,
	pub label_font_bold: &'static str,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub fill: Color,
	pub stroke: Color,
	pub stroke_width: f64,
	pub label_color: Color,
	pub label_font: &'static str,
}

/// Dashed circle marking the ideal node radius.
#[derive(Clone, Debug)]
pub struct GuideStyle {
	pub enabled: bool,
	pub color: Color,
	pub dash: (f64, f64),
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub guide: GuideStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
}

/// Resolved drawing parameters for one edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeAppearance {
	pub color: Color,
	pub width: f64,
	pub label_color: Color,
	pub label_bold: bool,
}

impl Theme {
	/// Light dashboard theme.
	pub fn light() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			guide: GuideStyle {
				enabled: true,
				color: Color::rgba(22, 111, 166, 0.15),
				dash: (6.0, 6.0),
			},
			edge: EdgeStyle {
				positive: Color::rgb(231, 76, 60),
				negative: Color::rgb(39, 174, 96),
				selected: Color::rgb(255, 165, 0),
				selected_extra_width: 3.0,
				opacity: 0.9,
				label_color: Color::rgb(0, 0, 0),
				label_font: "12px sans-serif",
				label_font_bold: "bold 12px sans-serif",
			},
			node: NodeStyle {
				fill: Color::rgb(52, 152, 219),
				stroke: Color::rgb(22, 111, 166),
				stroke_width: 2.0,
				label_color: Color::rgb(255, 255, 255),
				label_font: "bold 13px sans-serif",
			},
		}
	}

	/// Color, width and label style of an edge with weight `value`.
	pub fn edge_appearance(&self, value: f64, selected: bool) -> EdgeAppearance {
		let width = edge_width(value);
		if selected {
			EdgeAppearance {
				color: self.edge.selected,
				width: width + self.edge.selected_extra_width,
				label_color: self.edge.selected,
				label_bold: true,
			}
		} else {
			EdgeAppearance {
				color: if value > 0.0 {
					self.edge.positive
				} else {
					self.edge.negative
				},
				width,
				label_color: self.edge.label_color,
				label_bold: false,
			}
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

/// Stroke width for a correlation weight: `max(1, |w| * 4)`.
pub fn edge_width(value: f64) -> f64 {
	(value.abs() * 4.0).max(1.0)
}

/// Edge label text: the weight to two decimals.
pub fn edge_label(value: f64) -> String {
	format!("{value:.2}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn width_scales_with_magnitude() {
		assert_eq!(edge_width(0.8), 3.2);
		assert_eq!(edge_width(-0.8), 3.2);
		assert_eq!(edge_width(0.1), 1.0);
		assert_eq!(edge_width(0.0), 1.0);
	}

	#[test]
	fn color_follows_sign() {
		let theme = Theme::default();
		assert_eq!(theme.edge_appearance(0.5, false).color, theme.edge.positive);
		assert_eq!(theme.edge_appearance(-0.5, false).color, theme.edge.negative);
		assert_eq!(theme.edge_appearance(0.0, false).color, theme.edge.negative);
	}

	#[test]
	fn selected_edge_is_highlighted() {
		let theme = Theme::default();
		let a = theme.edge_appearance(-0.5, true);
		assert_eq!(a.color, theme.edge.selected);
		assert_eq!(a.width, 5.0);
		assert!(a.label_bold);
	}

	#[test]
	fn labels_use_two_decimals() {
		assert_eq!(edge_label(0.8), "0.80");
		assert_eq!(edge_label(-0.4), "-0.40");
		assert_eq!(edge_label(0.12345), "0.12");
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(231, 76, 60).to_css(), "#e74c3c");
		assert_eq!(
			Color::rgb(0, 0, 0).with_alpha(0.5).to_css(),
			"rgba(0, 0, 0, 0.5)"
		);
	}
}
