//! Graph data structures for input to the radial graph component.

use serde::Deserialize;

/// A portfolio asset in the correlation graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this asset. Used to reference nodes in links.
	#[serde(alias = "asset_id")]
	pub id: String,
	/// Optional display name. The label falls back to `id` when unset.
	#[serde(default)]
	pub name: Option<String>,
}

impl GraphNode {
	/// Text drawn next to the node.
	pub fn label(&self) -> &str {
		match self.name.as_deref() {
			Some(name) if !name.is_empty() => name,
			_ => &self.id,
		}
	}
}

/// A correlation between two assets.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Signed correlation weight, roughly in [-1, 1].
	pub value: f64,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_api_payload_with_asset_id() {
		let json = r#"{
			"nodes": [{"asset_id": "BTC", "name": "Bitcoin"}, {"id": "ETH"}],
			"links": [{"source": "BTC", "target": "ETH", "value": -0.25}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();

		assert_eq!(data.nodes[0].id, "BTC");
		assert_eq!(data.nodes[0].label(), "Bitcoin");
		assert_eq!(data.nodes[1].label(), "ETH");
		assert_eq!(data.links[0].value, -0.25);
	}

	#[test]
	fn missing_lists_default_to_empty() {
		let data: GraphData = serde_json::from_str("{}").unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.links.is_empty());
	}
}
