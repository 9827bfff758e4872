//! bar-chart-rs: table-driven bar chart core.
//!
//! Reads labels and values out of a tabular source, derives axis scale and
//! bar heights, and sequences a staggered bar reveal against any
//! [`render::Renderer`] backend.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{BarChart, BarChartConfig};
pub use error::{ChartError, ChartResult};
