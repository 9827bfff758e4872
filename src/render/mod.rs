mod recording_renderer;

pub use recording_renderer::{RecordingRenderer, RenderCommand};

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Handle to a bar element owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarRef(pub usize);

/// Contract implemented by any presentation backend.
///
/// The chart core hands over finished data and instructions; element creation
/// and the height animation itself live entirely on the backend side.
pub trait Renderer {
    fn render_heading(&mut self, text: &str) -> ChartResult<()>;
    fn render_legend(&mut self, labels: &[String]) -> ChartResult<()>;
    fn render_x_axis(&mut self, labels: &[String]) -> ChartResult<()>;
    fn render_axis_ticks(&mut self, values: &[f64]) -> ChartResult<()>;
    /// Creates one bar, initially at zero height.
    ///
    /// `row_index` identifies the series the bar belongs to and matches the
    /// position of its legend entry; `value` is the label shown on the bar.
    fn render_bar(
        &mut self,
        group_index: usize,
        row_index: usize,
        value: f64,
        height_percent: f64,
    ) -> ChartResult<BarRef>;
    /// `animated = false` must also stop any in-flight animation on the bar.
    fn set_bar_height(&mut self, bar: BarRef, percent: f64, animated: bool) -> ChartResult<()>;
}
