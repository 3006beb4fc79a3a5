//! Portfolio class distribution pie chart.
//!
//! [`class_distribution`] folds holdings into per-class shares and
//! [`PieChartCanvas`] draws them as a padded pie with percent labels and a
//! color legend.

mod component;
mod distribution;

pub use component::PieChartCanvas;
pub use distribution::{ClassShare, Holding, PieSlice, class_distribution, pie_slices};
