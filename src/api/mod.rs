mod bar_chart;
mod chart_config;
mod snapshot;

pub use bar_chart::BarChart;
pub use chart_config::BarChartConfig;
pub use snapshot::{CHART_SNAPSHOT_SCHEMA_VERSION, ChartSnapshot};
