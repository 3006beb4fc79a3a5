//! Per-view graph session: simulation plus interaction state.
//!
//! One [`RadialGraphState`] is built for every data refresh and dropped when
//! the view goes away. It owns the pan/zoom transform, the drag and pan
//! trackers, the selected edge and any running recenter animation, so nothing
//! about the view lives in shared module state.

use super::config::LayoutConfig;
use super::error::GraphError;
use super::simulation::Simulation;
use super::theme::edge_width;
use super::types::GraphData;

/// Pointer travel (screen pixels) below which a press counts as a click.
const CLICK_TOLERANCE: f64 = 3.0;

/// Extra screen pixels around an edge that still count as a hit.
const EDGE_HIT_SLOP: f64 = 4.0;

/// Offset of an edge label from the edge midpoint, in graph units.
const EDGE_LABEL_OFFSET: f64 = 10.0;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zooms by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, min_k: f64, max_k: f64) {
		let new_k = (self.k * factor).clamp(min_k, max_k);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

/// Linear pan of the transform translation back toward the layout center.
#[derive(Clone, Debug)]
pub struct RecenterAnimation {
	from: (f64, f64),
	to: (f64, f64),
	elapsed_ms: f64,
	duration_ms: f64,
}

impl RecenterAnimation {
	/// Advances the animation and returns the interpolated translation.
	pub fn advance(&mut self, dt_ms: f64) -> (f64, f64) {
		self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
		let t = if self.duration_ms > 0.0 {
			self.elapsed_ms / self.duration_ms
		} else {
			1.0
		};
		(
			self.from.0 + (self.to.0 - self.from.0) * t,
			self.from.1 + (self.to.1 - self.from.1) * t,
		)
	}

	pub fn finished(&self) -> bool {
		self.elapsed_ms >= self.duration_ms
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	/// Node position minus pointer position, in graph units.
	pub offset_x: f64,
	pub offset_y: f64,
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

/// Graph session combining the radial simulation with view and interaction
/// state. Pointer coordinates are canvas-relative screen pixels.
pub struct RadialGraphState {
	pub simulation: Simulation,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	selected_link: Option<usize>,
	recenter: Option<RecenterAnimation>,
	wheel_idle_ms: Option<f64>,
}

impl RadialGraphState {
	/// Builds a fresh session centered in a `width` x `height` viewport.
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		config: LayoutConfig,
	) -> Result<Self, GraphError> {
		let simulation = Simulation::new(data, (width / 2.0, height / 2.0), config)?;
		Ok(Self {
			simulation,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			selected_link: None,
			recenter: None,
			wheel_idle_ms: None,
		})
	}

	pub fn config(&self) -> &LayoutConfig {
		self.simulation.config()
	}

	pub fn selected_link(&self) -> Option<usize> {
		self.selected_link
	}

	pub fn select_link(&mut self, link: Option<usize>) {
		self.selected_link = link.filter(|&i| i < self.simulation.links().len());
	}

	pub fn is_recentering(&self) -> bool {
		self.recenter.is_some()
	}

	/// Topmost node under a screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let radius = self.config().node_radius;
		self.simulation
			.nodes()
			.iter()
			.enumerate()
			.rev()
			.find(|(_, n)| (n.x - gx).hypot(n.y - gy) <= radius)
			.map(|(i, _)| i)
	}

	/// Topmost edge under a screen point.
	pub fn link_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let nodes = self.simulation.nodes();
		let slop = EDGE_HIT_SLOP / self.transform.k;
		self.simulation
			.links()
			.iter()
			.enumerate()
			.rev()
			.find(|(_, link)| {
				let (a, b) = (&nodes[link.source], &nodes[link.target]);
				let tolerance = edge_width(link.value) / 2.0 + slop;
				distance_to_segment((gx, gy), (a.x, a.y), (b.x, b.y)) <= tolerance
			})
			.map(|(i, _)| i)
	}

	/// Anchor of an edge's weight label: the midpoint shifted by a fixed offset.
	pub fn edge_label_position(&self, link: usize) -> Option<(f64, f64)> {
		let link = self.simulation.links().get(link)?;
		let nodes = self.simulation.nodes();
		let (a, b) = (&nodes[link.source], &nodes[link.target]);
		Some((
			(a.x + b.x) / 2.0 + EDGE_LABEL_OFFSET,
			(a.y + b.y) / 2.0 + EDGE_LABEL_OFFSET,
		))
	}

	/// Starts a node drag or a background pan.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		self.recenter = None;
		self.wheel_idle_ms = None;
		if let Some(idx) = self.node_at_position(sx, sy) {
			let (gx, gy) = self.transform.screen_to_graph(sx, sy);
			let node = &self.simulation.nodes()[idx];
			self.drag = DragState {
				node_idx: Some(idx),
				start_x: sx,
				start_y: sy,
				offset_x: node.x - gx,
				offset_y: node.y - gy,
				moved: false,
			};
			self.simulation.drag_start(idx);
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
				moved: false,
			};
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.drag.node_idx {
			if (sx - self.drag.start_x).hypot(sy - self.drag.start_y) > CLICK_TOLERANCE {
				self.drag.moved = true;
			}
			let (gx, gy) = self.transform.screen_to_graph(sx, sy);
			self.simulation
				.drag_move(idx, gx + self.drag.offset_x, gy + self.drag.offset_y);
		} else if self.pan.active {
			if (sx - self.pan.start_x).hypot(sy - self.pan.start_y) > CLICK_TOLERANCE {
				self.pan.moved = true;
			}
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Ends a drag or pan. A press that never moved is treated as a click.
	pub fn pointer_up(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.simulation.drag_end(idx);
			if !self.drag.moved {
				self.select_link(None);
			}
		} else if self.pan.active {
			self.pan.active = false;
			if self.pan.moved {
				self.zoom_end();
			} else {
				self.click(sx, sy);
			}
		}
	}

	/// Pointer left the canvas: finish any interaction without a click.
	pub fn pointer_leave(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.simulation.drag_end(idx);
		}
		if self.pan.active {
			self.pan.active = false;
			if self.pan.moved {
				self.zoom_end();
			}
		}
	}

	/// Selects the edge under the pointer, or clears the selection.
	pub fn click(&mut self, sx: f64, sy: f64) {
		let hit = self.link_at_position(sx, sy);
		self.select_link(hit);
	}

	/// Releases a node from the circle, or re-attaches a released one.
	pub fn toggle_on_circle(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.node_at_position(sx, sy) {
			let on_circle = self.simulation.nodes()[idx].on_circle;
			self.simulation.set_on_circle(idx, !on_circle);
		}
	}

	/// Wheel zoom around the pointer. The zoom ends after a short idle period.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		// Horizontal-only scrolls carry no zoom direction.
		if delta_y == 0.0 {
			return;
		}
		self.recenter = None;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let (min_k, max_k) = (self.config().zoom_min, self.config().zoom_max);
		self.transform.zoom_at(sx, sy, factor, min_k, max_k);
		self.wheel_idle_ms = Some(0.0);
	}

	/// Starts a recenter animation when the view center has drifted too far
	/// from the layout center.
	pub fn zoom_end(&mut self) {
		let config = self.config();
		let limit = config.base_radius * config.recenter_margin;
		let duration_ms = config.recenter_duration_ms;
		let (cx, cy) = self.simulation.center();
		let t = self.transform;
		let (vx, vy) = t.screen_to_graph(self.width / 2.0, self.height / 2.0);
		if (vx - cx).hypot(vy - cy) > limit {
			self.recenter = Some(RecenterAnimation {
				from: (t.x, t.y),
				to: (self.width / 2.0 - cx * t.k, self.height / 2.0 - cy * t.k),
				elapsed_ms: 0.0,
				duration_ms,
			});
		}
	}

	/// Advances one animation frame of `dt_ms` milliseconds.
	pub fn frame(&mut self, dt_ms: f64) {
		self.simulation.step();

		let wheel_end_delay = self.config().wheel_end_delay_ms;
		if let Some(idle) = self.wheel_idle_ms.as_mut() {
			*idle += dt_ms;
			if *idle >= wheel_end_delay {
				self.wheel_idle_ms = None;
				self.zoom_end();
			}
		}

		if let Some(anim) = self.recenter.as_mut() {
			let (x, y) = anim.advance(dt_ms);
			self.transform.x = x;
			self.transform.y = y;
			if anim.finished() {
				self.recenter = None;
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len2 = abx * abx + aby * aby;
	let t = if len2 == 0.0 {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
	};
	(p.0 - (a.0 + abx * t)).hypot(p.1 - (a.1 + aby * t))
}
