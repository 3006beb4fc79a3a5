//! Radial force simulation.
//!
//! A small explicit-Euler solver in the shape of a d3 force simulation:
//! a global energy `alpha` decays toward `alpha_target` each tick and scales
//! every force. On top of the physics, two non-physical passes keep nodes on
//! the layout circle:
//!
//! - the radial constraint zeroes the velocity of every node that is on the
//!   circle and not being dragged, so for those nodes the constraint always
//!   wins over link, charge and collide forces. Those forces only visibly move
//!   nodes that have been released from the circle;
//! - after integration, on-circle nodes are eased back toward the circle and
//!   overlapping on-circle pairs are pushed apart.
//!
//! Everything runs on the caller's thread, one tick per animation frame.

use std::collections::HashMap;
use std::f64::consts::TAU;

use super::config::LayoutConfig;
use super::error::{GraphError, LinkEnd};
use super::types::GraphData;

/// Upper bound on ticks run by [`Simulation::settle`].
const MAX_SETTLE_TICKS: usize = 10_000;

/// Squared distance below which many-body forces are softened.
const CHARGE_DISTANCE_MIN2: f64 = 1.0;

/// A simulated asset node.
#[derive(Clone, Debug)]
pub struct SimNode {
	pub id: String,
	pub label: String,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Position override held while the node is dragged.
	pub fixed: Option<(f64, f64)>,
	/// Subject to the radial return constraint.
	pub on_circle: bool,
	pub dragging: bool,
	/// Angle assigned by the initial layout.
	pub angle: f64,
}

/// A correlation link between two node indices.
#[derive(Clone, Debug)]
pub struct SimLink {
	pub source: usize,
	pub target: usize,
	pub value: f64,
	/// Share of the link correction applied to the target, from node degrees.
	bias: f64,
}

/// Force simulation state for one render of the graph.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	center: (f64, f64),
	config: LayoutConfig,
	alpha: f64,
	alpha_target: f64,
	running: bool,
	jiggle_seed: f64,
}

impl Simulation {
	/// Lays the nodes out evenly on the base circle around `center`.
	///
	/// Fails if a link references an unknown node or two nodes share an id.
	pub fn new(
		data: &GraphData,
		center: (f64, f64),
		config: LayoutConfig,
	) -> Result<Self, GraphError> {
		let count = data.nodes.len();
		let mut id_to_idx = HashMap::with_capacity(count);
		let mut nodes = Vec::with_capacity(count);

		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.insert(node.id.clone(), i).is_some() {
				return Err(GraphError::DuplicateNode(node.id.clone()));
			}
			let angle = i as f64 * TAU / count as f64;
			nodes.push(SimNode {
				id: node.id.clone(),
				label: node.label().to_string(),
				x: center.0 + config.base_radius * angle.cos(),
				y: center.1 + config.base_radius * angle.sin(),
				vx: 0.0,
				vy: 0.0,
				fixed: None,
				on_circle: true,
				dragging: false,
				angle,
			});
		}

		let mut degree = vec![0usize; count];
		let mut links = Vec::with_capacity(data.links.len());
		for (i, link) in data.links.iter().enumerate() {
			let resolve = |id: &String, end: LinkEnd| {
				id_to_idx
					.get(id)
					.copied()
					.ok_or_else(|| GraphError::UnknownNode {
						link: i,
						end,
						id: id.clone(),
					})
			};
			let source = resolve(&link.source, LinkEnd::Source)?;
			let target = resolve(&link.target, LinkEnd::Target)?;
			degree[source] += 1;
			degree[target] += 1;
			links.push(SimLink {
				source,
				target,
				value: link.value,
				bias: 0.0,
			});
		}
		for link in &mut links {
			let (s, t) = (degree[link.source] as f64, degree[link.target] as f64);
			link.bias = s / (s + t);
		}

		Ok(Self {
			nodes,
			links,
			center,
			config,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			jiggle_seed: 0.0,
		})
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[SimLink] {
		&self.links
	}

	pub fn center(&self) -> (f64, f64) {
		self.center
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// False once alpha has decayed below `alpha_min`.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Distance of a node from the layout center.
	pub fn radius_of(&self, idx: usize) -> Option<f64> {
		let node = self.nodes.get(idx)?;
		Some((node.x - self.center.0).hypot(node.y - self.center.1))
	}

	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Advances one frame: physics tick, elastic snap, collision resolution.
	///
	/// Returns whether the simulation is still running afterwards.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.tick();
		self.snap_to_circle();
		self.resolve_circle_collisions();
		if self.alpha < self.config.alpha_min {
			self.running = false;
		}
		self.running
	}

	/// Steps until the simulation stops. Returns the number of steps taken.
	pub fn settle(&mut self) -> usize {
		let mut ticks = 0;
		while ticks < MAX_SETTLE_TICKS && self.step() {
			ticks += 1;
		}
		ticks
	}

	/// One solver tick: decay alpha, apply forces, integrate.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

		self.apply_link_force();
		self.apply_charge_force();
		self.apply_collide_force();
		self.apply_radial_constraint();

		let retain = 1.0 - self.config.velocity_decay;
		for node in &mut self.nodes {
			if let Some((fx, fy)) = node.fixed {
				node.x = fx;
				node.y = fy;
				node.vx = 0.0;
				node.vy = 0.0;
			} else {
				node.vx *= retain;
				node.vy *= retain;
				node.x += node.vx;
				node.y += node.vy;
			}
		}
	}

	/// Pins a node at its current position and raises the energy.
	pub fn drag_start(&mut self, idx: usize) {
		let Some(node) = self.nodes.get_mut(idx) else {
			return;
		};
		node.dragging = true;
		node.fixed = Some((node.x, node.y));
		self.alpha_target = self.config.drag_alpha_target;
		self.restart();
	}

	/// Moves the pin of a dragged node. Takes effect immediately.
	pub fn drag_move(&mut self, idx: usize, x: f64, y: f64) {
		let Some(node) = self.nodes.get_mut(idx) else {
			return;
		};
		node.fixed = Some((x, y));
		node.x = x;
		node.y = y;
	}

	/// Unpins a node and lets the energy decay back to rest.
	pub fn drag_end(&mut self, idx: usize) {
		let Some(node) = self.nodes.get_mut(idx) else {
			return;
		};
		node.dragging = false;
		node.fixed = None;
		self.alpha_target = 0.0;
	}

	/// Attaches a node to, or releases it from, the radial constraint.
	pub fn set_on_circle(&mut self, idx: usize, on_circle: bool) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.on_circle = on_circle;
			self.alpha = self.alpha.max(self.config.drag_alpha_target);
			self.restart();
		}
	}

	/// Eases on-circle, non-dragged nodes toward the circle along their
	/// current angle from the center.
	pub fn snap_to_circle(&mut self) {
		let (cx, cy) = self.center;
		let (r, factor) = (self.config.base_radius, self.config.snap_factor);
		for node in self.nodes.iter_mut().filter(|n| n.on_circle && !n.dragging) {
			let (dx, dy) = (node.x - cx, node.y - cy);
			let dist = dx.hypot(dy);
			if dist == 0.0 {
				continue;
			}
			let (tx, ty) = (cx + dx / dist * r, cy + dy / dist * r);
			node.x += (tx - node.x) * factor;
			node.y += (ty - node.y) * factor;
		}
	}

	/// Pushes apart on-circle pairs closer than the minimum circle distance,
	/// half the overlap each. Dragged nodes stay put.
	pub fn resolve_circle_collisions(&mut self) {
		let min_dist = self.config.min_circle_distance();
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (&self.nodes[i], &self.nodes[j]);
				if !(a.on_circle && b.on_circle) {
					continue;
				}
				let (dx, dy) = (b.x - a.x, b.y - a.y);
				let dist = dx.hypot(dy);
				if dist >= min_dist || dist <= 0.0 {
					continue;
				}
				let offset = (min_dist - dist) / 2.0;
				let (ox, oy) = (dx / dist * offset, dy / dist * offset);
				if !self.nodes[i].dragging {
					self.nodes[i].x -= ox;
					self.nodes[i].y -= oy;
				}
				if !self.nodes[j].dragging {
					self.nodes[j].x += ox;
					self.nodes[j].y += oy;
				}
			}
		}
	}

	fn apply_link_force(&mut self) {
		let (distance, strength) = (self.config.link_distance, self.config.link_strength);
		for li in 0..self.links.len() {
			let SimLink {
				source,
				target,
				bias,
				..
			} = self.links[li];
			if source == target {
				continue;
			}
			let (s, t) = (&self.nodes[source], &self.nodes[target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = self.jiggle();
			}
			if y == 0.0 {
				y = self.jiggle();
			}
			let len = x.hypot(y);
			let l = (len - distance) / len * self.alpha * strength;
			let (x, y) = (x * l, y * l);

			let t = &mut self.nodes[target];
			t.vx -= x * bias;
			t.vy -= y * bias;
			let s = &mut self.nodes[source];
			s.vx += x * (1.0 - bias);
			s.vy += y * (1.0 - bias);
		}
	}

	fn apply_charge_force(&mut self) {
		let n = self.nodes.len();
		let strength = self.config.charge * self.alpha;
		let mut dv = vec![(0.0, 0.0); n];
		for i in 0..n {
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = self.nodes[j].x - self.nodes[i].x;
				let mut y = self.nodes[j].y - self.nodes[i].y;
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = self.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.jiggle();
					l += y * y;
				}
				if l < CHARGE_DISTANCE_MIN2 {
					l = (CHARGE_DISTANCE_MIN2 * l).sqrt();
				}
				dv[i].0 += x * strength / l;
				dv[i].1 += y * strength / l;
			}
		}
		for (node, (dx, dy)) in self.nodes.iter_mut().zip(dv) {
			node.vx += dx;
			node.vy += dy;
		}
	}

	fn apply_collide_force(&mut self) {
		let n = self.nodes.len();
		let ri = self.config.collide_radius;
		let ri2 = ri * ri;
		let r = ri * 2.0;
		// Equal radii split every correction evenly.
		let share = ri2 / (ri2 + ri2);
		for i in 0..n {
			let xi = self.nodes[i].x + self.nodes[i].vx;
			let yi = self.nodes[i].y + self.nodes[i].vy;
			for j in (i + 1)..n {
				let other = &self.nodes[j];
				let mut x = xi - (other.x + other.vx);
				let mut y = yi - (other.y + other.vy);
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = self.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.jiggle();
					l += y * y;
				}
				let len = l.sqrt();
				let k = (r - len) / len;
				let (x, y) = (x * k, y * k);
				self.nodes[i].vx += x * share;
				self.nodes[i].vy += y * share;
				self.nodes[j].vx -= x * (1.0 - share);
				self.nodes[j].vy -= y * (1.0 - share);
			}
		}
	}

	fn apply_radial_constraint(&mut self) {
		let (cx, cy) = self.center;
		let r = self.config.base_radius;
		// Capped so released nodes converge instead of oscillating at full energy.
		let gain = (self.config.radial_strength * self.alpha).min(1.0);
		for node in &mut self.nodes {
			if node.on_circle && !node.dragging {
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			let (dx, dy) = (node.x - cx, node.y - cy);
			let dist = dx.hypot(dy);
			if dist == 0.0 {
				continue;
			}
			let diff = dist - r;
			node.vx -= dx / dist * diff * gain;
			node.vy -= dy / dist * diff * gain;
		}
	}

	/// Tiny deterministic offset used to separate coincident points.
	fn jiggle(&mut self) -> f64 {
		self.jiggle_seed += 1.0;
		(pseudo_random(self.jiggle_seed) - 0.5) * 1e-6
	}
}

fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::radial_graph::types::{GraphLink, GraphNode};

	const CENTER: (f64, f64) = (450.0, 300.0);

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: None,
		}
	}

	fn link(source: &str, target: &str, value: f64) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			value,
		}
	}

	fn isolated(n: usize) -> GraphData {
		GraphData {
			nodes: (0..n).map(|i| node(&format!("n{i}"))).collect(),
			links: vec![],
		}
	}

	fn abc() -> GraphData {
		GraphData {
			nodes: vec![node("A"), node("B"), node("C")],
			links: vec![link("A", "B", 0.8), link("B", "C", -0.4)],
		}
	}

	fn sim(data: &GraphData) -> Simulation {
		Simulation::new(data, CENTER, LayoutConfig::default()).unwrap()
	}

	#[test]
	fn initial_angles_are_even() {
		let s = sim(&abc());
		let expected = [0.0, TAU / 3.0, 2.0 * TAU / 3.0];
		for (node, want) in s.nodes().iter().zip(expected) {
			assert!((node.angle - want).abs() < 1e-12);
			let measured = (node.y - CENTER.1).atan2(node.x - CENTER.0).rem_euclid(TAU);
			assert!((measured - want).abs() < 1e-9);
		}
	}

	#[test]
	fn example_graph_settles_on_circle() {
		let mut s = sim(&abc());
		let ticks = s.settle();
		assert!(!s.is_running());
		assert!(ticks > 300 && ticks < 400, "settled after {ticks} ticks");
		for i in 0..3 {
			let r = s.radius_of(i).unwrap();
			assert!((r - 400.0).abs() < 4.0, "node {i} at radius {r}");
		}
	}

	#[test]
	fn single_node_sits_at_angle_zero() {
		let s = sim(&isolated(1));
		let n = &s.nodes()[0];
		assert_eq!(n.angle, 0.0);
		assert!((n.x - (CENTER.0 + 400.0)).abs() < 1e-9);
		assert!((n.y - CENTER.1).abs() < 1e-9);
	}

	#[test]
	fn displaced_isolated_nodes_return_to_circle() {
		for n in 1..=12 {
			let mut s = sim(&isolated(n));
			for (i, node) in s.nodes.iter_mut().enumerate() {
				let scale = if i % 2 == 0 { 0.6 } else { 1.3 };
				node.x = CENTER.0 + (node.x - CENTER.0) * scale;
				node.y = CENTER.1 + (node.y - CENTER.1) * scale;
			}
			s.settle();
			for i in 0..n {
				let r = s.radius_of(i).unwrap();
				assert!((r - 400.0).abs() < 4.0, "n={n}: node {i} at radius {r}");
			}
		}
	}

	#[test]
	fn node_at_center_is_left_alone() {
		let mut s = sim(&isolated(1));
		s.nodes[0].x = CENTER.0;
		s.nodes[0].y = CENTER.1;
		s.step();
		assert_eq!((s.nodes[0].x, s.nodes[0].y), CENTER);
		assert!(s.nodes[0].x.is_finite());
	}

	#[test]
	fn released_node_at_center_stays_finite() {
		let mut s = sim(&isolated(1));
		s.set_on_circle(0, false);
		s.nodes[0].x = CENTER.0;
		s.nodes[0].y = CENTER.1;
		for _ in 0..50 {
			s.step();
			assert_eq!((s.nodes[0].x, s.nodes[0].y), CENTER);
		}
	}

	#[test]
	fn collision_pass_separates_overlapping_pair() {
		let mut s = sim(&isolated(2));
		s.nodes[0].x = CENTER.0 + 400.0;
		s.nodes[0].y = CENTER.1;
		s.nodes[1].x = CENTER.0 + 400.0;
		s.nodes[1].y = CENTER.1 + 30.0;
		let before = 30.0;

		s.resolve_circle_collisions();

		let (a, b) = (&s.nodes[0], &s.nodes[1]);
		let after = (b.x - a.x).hypot(b.y - a.y);
		assert!(after > before);
		assert!((after - 88.0).abs() < 1e-9);
	}

	#[test]
	fn collision_pass_skips_dragged_node() {
		let mut s = sim(&isolated(2));
		s.nodes[0].x = CENTER.0 + 400.0;
		s.nodes[0].y = CENTER.1;
		s.nodes[1].x = CENTER.0 + 400.0;
		s.nodes[1].y = CENTER.1 + 30.0;
		s.drag_start(0);

		s.resolve_circle_collisions();

		assert_eq!(s.nodes[0].y, CENTER.1);
		assert!((s.nodes[1].y - (CENTER.1 + 59.0)).abs() < 1e-9);
	}

	#[test]
	fn dragged_node_follows_pointer_exactly() {
		let mut s = sim(&abc());
		s.drag_start(1);
		for &(x, y) in &[(10.0, 20.0), (450.0, 300.0), (-250.5, 999.0)] {
			s.drag_move(1, x, y);
			for _ in 0..5 {
				s.step();
				assert_eq!((s.nodes()[1].x, s.nodes()[1].y), (x, y));
			}
		}
		assert!(s.is_running());
	}

	#[test]
	fn released_node_returns_monotonically() {
		let mut s = sim(&isolated(1));
		s.drag_start(0);
		s.drag_move(0, CENTER.0 + 50.0, CENTER.1 + 20.0);
		s.step();
		s.drag_end(0);

		let mut gap = (s.radius_of(0).unwrap() - 400.0).abs();
		for _ in 0..60 {
			s.step();
			let r = s.radius_of(0).unwrap();
			assert!(r <= 400.0, "overshot to {r}");
			let next = (r - 400.0).abs();
			assert!(next < gap);
			gap = next;
		}
		assert!(gap < 1.0);
	}

	#[test]
	fn drag_keeps_simulation_warm() {
		let mut s = sim(&abc());
		s.settle();
		assert!(!s.is_running());

		s.drag_start(0);
		for _ in 0..1_000 {
			assert!(s.step());
		}
		assert!((s.alpha() - 0.3).abs() < 1e-3);

		s.drag_end(0);
		s.settle();
		assert!(!s.is_running());
	}

	#[test]
	fn released_node_is_pulled_by_physics() {
		let mut s = sim(&abc());
		s.set_on_circle(0, false);
		s.nodes[0].x = CENTER.0 + 100.0;
		s.nodes[0].y = CENTER.1;
		s.settle();
		let r = s.radius_of(0).unwrap();
		assert!(r > 100.0, "released node stayed at {r}");
		assert!(r.is_finite());
	}

	#[test]
	fn dangling_link_is_rejected() {
		let data = GraphData {
			nodes: vec![node("A")],
			links: vec![link("A", "Z", 0.5)],
		};
		let err = Simulation::new(&data, CENTER, LayoutConfig::default())
			.err()
			.unwrap();
		assert_eq!(
			err,
			GraphError::UnknownNode {
				link: 0,
				end: LinkEnd::Target,
				id: "Z".into()
			}
		);
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let data = GraphData {
			nodes: vec![node("A"), node("A")],
			links: vec![],
		};
		assert!(matches!(
			Simulation::new(&data, CENTER, LayoutConfig::default()),
			Err(GraphError::DuplicateNode(id)) if id == "A"
		));
	}

	#[test]
	fn empty_graph_settles() {
		let mut s = sim(&GraphData::default());
		s.settle();
		assert!(!s.is_running());
	}
}
