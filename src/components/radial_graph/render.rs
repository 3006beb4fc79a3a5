//! Canvas rendering for the radial graph.
//!
//! Drawing order, back to front:
//! 1. Background (screen space)
//! 2. Guide circle, edges, edge labels (world space)
//! 3. Nodes, then node labels on top

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::RadialGraphState;
use super::theme::{Theme, edge_label};

/// Renders the complete graph to the canvas.
pub fn render(state: &RadialGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	if theme.guide.enabled {
		draw_guide(state, ctx, theme);
	}
	draw_edges(state, ctx, theme);
	draw_edge_labels(state, ctx, theme);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

fn draw_guide(state: &RadialGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = state.simulation.center();
	let (dash, gap) = theme.guide.dash;
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
	ctx.set_stroke_style_str(&theme.guide.color.to_css());
	ctx.set_line_width(1.0 / state.transform.k);
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, state.config().base_radius, 0.0, TAU);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_edges(state: &RadialGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let nodes = state.simulation.nodes();
	let selected = state.selected_link();

	ctx.set_global_alpha(theme.edge.opacity);
	for (i, link) in state.simulation.links().iter().enumerate() {
		let (a, b) = (&nodes[link.source], &nodes[link.target]);
		let appearance = theme.edge_appearance(link.value, selected == Some(i));
		ctx.set_stroke_style_str(&appearance.color.to_css());
		ctx.set_line_width(appearance.width);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_edge_labels(state: &RadialGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let selected = state.selected_link();
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");

	for (i, link) in state.simulation.links().iter().enumerate() {
		let Some((x, y)) = state.edge_label_position(i) else {
			continue;
		};
		let appearance = theme.edge_appearance(link.value, selected == Some(i));
		ctx.set_font(if appearance.label_bold {
			theme.edge.label_font_bold
		} else {
			theme.edge.label_font
		});
		ctx.set_fill_style_str(&appearance.label_color.to_css());
		let _ = ctx.fill_text(&edge_label(link.value), x, y);
	}
}

fn draw_nodes(state: &RadialGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let radius = state.config().node_radius;
	let style = &theme.node;

	for node in state.simulation.nodes() {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, TAU);
		ctx.set_fill_style_str(&style.fill.to_css());
		ctx.fill();
		ctx.set_stroke_style_str(&style.stroke.to_css());
		ctx.set_line_width(style.stroke_width);
		ctx.stroke();
	}

	ctx.set_font(style.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(&style.label_color.to_css());
	for node in state.simulation.nodes() {
		let _ = ctx.fill_text(&node.label, node.x, node.y);
	}
}
