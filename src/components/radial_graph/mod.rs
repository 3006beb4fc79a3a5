//! Radial correlation network.
//!
//! Renders portfolio assets as nodes on a circle, connected by correlation
//! edges, on an HTML canvas with:
//! - A force simulation constrained to the circle, with elastic return after drags
//! - Pan and zoom, recentering when the view drifts away from the circle
//! - Edge selection with weight-derived colors and labels
//!
//! # Example
//!
//! ```ignore
//! use portfolio_graph::{GraphData, GraphLink, GraphNode, RadialGraphCanvas};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "A".into(), name: Some("Asset A".into()) },
//!         GraphNode { id: "B".into(), name: None },
//!     ],
//!     links: vec![
//!         GraphLink { source: "A".into(), target: "B".into(), value: 0.8 },
//!     ],
//! };
//!
//! view! { <RadialGraphCanvas data=data.into() fullscreen=true /> }
//! ```

mod component;
mod config;
mod error;
mod render;
mod simulation;
mod state;
pub mod theme;
mod types;

pub use component::RadialGraphCanvas;
pub use config::LayoutConfig;
pub use error::{GraphError, LinkEnd};
pub use simulation::{SimLink, SimNode, Simulation};
pub use state::{RadialGraphState, ViewTransform};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode};
