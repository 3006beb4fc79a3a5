//! Leptos component drawing the class distribution pie with a legend.

use leptos::prelude::*;
use log::error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::distribution::{ClassShare, PAD_ANGLE, pie_slices};
use crate::components::radial_graph::theme::Color;

/// Categorical palette for class slices.
const CATEGORY10: [Color; 10] = [
	Color::rgb(31, 119, 180),
	Color::rgb(255, 127, 14),
	Color::rgb(44, 160, 44),
	Color::rgb(214, 39, 40),
	Color::rgb(148, 103, 189),
	Color::rgb(140, 86, 75),
	Color::rgb(227, 119, 194),
	Color::rgb(127, 127, 127),
	Color::rgb(188, 189, 34),
	Color::rgb(23, 190, 207),
];

/// Percent labels sit this far out along the centroid direction.
const LABEL_FACTOR: f64 = 1.4;

fn slice_color(index: usize) -> Color {
	CATEGORY10[index % CATEGORY10.len()]
}

fn draw_pie(ctx: &CanvasRenderingContext2d, shares: &[ClassShare], size: f64) {
	let radius = size / 2.0 - 20.0;
	let (cx, cy) = (size / 2.0, size / 2.0);
	ctx.clear_rect(0.0, 0.0, size, size);

	let slices = pie_slices(shares, PAD_ANGLE);
	for (i, slice) in slices.iter().enumerate() {
		let (start, end) = slice.canvas_angles();
		if end <= start {
			continue;
		}
		ctx.begin_path();
		// A full disc has no edge back to the center.
		if !slice.is_full_circle() {
			ctx.move_to(cx, cy);
		}
		let _ = ctx.arc(cx, cy, radius, start, end);
		ctx.close_path();
		ctx.set_fill_style_str(&slice_color(i).to_css());
		ctx.fill();
		ctx.set_stroke_style_str("#ffffff");
		ctx.set_line_width(2.0);
		ctx.stroke();
	}

	ctx.set_font("bold 16px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str("#000000");
	for (share, slice) in shares.iter().zip(&slices) {
		if share.percent <= 0.0 {
			continue;
		}
		let (x, y) = slice.centroid(radius);
		let _ = ctx.fill_text(
			&format!("{:.1}%", share.percent),
			cx + x * LABEL_FACTOR,
			cy + y * LABEL_FACTOR,
		);
	}
}

/// Pie chart of portfolio value per asset class.
///
/// Slices follow the order of `data`. Redraws whenever the signal changes.
#[component]
pub fn PieChartCanvas(
	#[prop(into)] data: Signal<Vec<ClassShare>>,
	#[prop(default = 500.0)] size: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let shares = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(size as u32);
		canvas.set_height(size as u32);
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("portfolio-graph: canvas 2d context unavailable");
			return;
		};
		draw_pie(&ctx, &shares, size);
	});

	let legend = move || {
		data.get()
			.into_iter()
			.enumerate()
			.map(|(i, share)| {
				let swatch = format!(
					"width: 16px; height: 16px; margin-right: 6px; border-radius: 3px; background-color: {};",
					slice_color(i).to_css()
				);
				view! {
					<div class="pie-legend-item" style="display: flex; align-items: center; margin: 0 10px 5px 10px;">
						<div style=swatch></div>
						<span style="font-size: 14px;">{share.class}</span>
					</div>
				}
			})
			.collect_view()
	};

	view! {
		<div class="pie-chart" style="display: flex; flex-direction: column; align-items: center;">
			<canvas node_ref=canvas_ref class="pie-chart-canvas" style="display: block;" />
			<div class="pie-legend" style="display: flex; flex-wrap: wrap; justify-content: center; margin-top: 20px;">
				{legend}
			</div>
		</div>
	}
}
