//! portfolio-graph: portfolio correlation network and class distribution charts.
//!
//! This crate provides WASM-based chart components for a portfolio dashboard:
//! a radial correlation network with a circle-constrained force layout, drag,
//! pan/zoom and edge selection, and a pie chart of value per asset class.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::pie_chart::{ClassShare, Holding, PieChartCanvas, class_distribution};
pub use components::radial_graph::{
	GraphData, GraphError, GraphLink, GraphNode, LayoutConfig, RadialGraphCanvas,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-graph: logging initialized");
}

/// Parse the JSON body of the `<script>` element with the given id.
/// Returns `None` if the element is missing or its content does not parse.
fn load_json_script<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("portfolio-graph: failed to parse #{}: {}", id, e);
			None
		}
	}
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [{id, name}], links: [{source, target, value}] }
fn load_graph_data() -> Option<GraphData> {
	let data = load_json_script::<GraphData>("graph-data")?;
	info!(
		"portfolio-graph: loaded {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Some(data)
}

/// Main application component.
/// Loads the dashboard payloads from the DOM and renders both charts.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());
	let config = load_json_script::<LayoutConfig>("graph-config").unwrap_or_default();
	let holdings = load_json_script::<Vec<Holding>>("portfolio-holdings").unwrap_or_default();
	let shares = class_distribution(&holdings);
	let shares_signal = Signal::derive(move || shares.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Portfolio Correlations" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="dashboard">
			<section class="portfolio-graph" style="width: 100%; height: 80vh;">
				<RadialGraphCanvas data=graph_signal config=config />
				<p class="subtitle">
					"Drag nodes to displace them. Double-click to release. Scroll to zoom. Click an edge to highlight it."
				</p>
			</section>
			<section class="dashboard-pie">
				<PieChartCanvas data=shares_signal />
			</section>
		</div>
	}
}
