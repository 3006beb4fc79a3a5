//! Dashboard chart components.

pub mod pie_chart;
pub mod radial_graph;
