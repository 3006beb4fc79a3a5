//! Construction errors for the radial graph.

use thiserror::Error;

/// Which end of a link referenced a missing node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEnd {
	Source,
	Target,
}

impl std::fmt::Display for LinkEnd {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LinkEnd::Source => f.write_str("source"),
			LinkEnd::Target => f.write_str("target"),
		}
	}
}

/// Referential integrity failures in [`GraphData`](super::GraphData).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
	#[error("link {link} has unknown {end} node `{id}`")]
	UnknownNode { link: usize, end: LinkEnd, id: String },
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),
}
