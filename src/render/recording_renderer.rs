use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{BarRef, Renderer};

/// One renderer call captured by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    Heading(String),
    Legend(Vec<String>),
    XAxis(Vec<String>),
    AxisTicks(Vec<f64>),
    Bar {
        bar: BarRef,
        group_index: usize,
        row_index: usize,
        value: f64,
        height_percent: f64,
    },
    SetBarHeight {
        bar: BarRef,
        percent: f64,
        animated: bool,
    },
}

/// Headless renderer used by tests and trace tooling.
///
/// It records every call in order and still rejects height updates for bars
/// it never created, so tests catch bad handles before a real backend does.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<RenderCommand>,
    bar_heights: Vec<f64>,
}

impl RecordingRenderer {
    /// Current height of every created bar, in creation order.
    #[must_use]
    pub fn bar_heights(&self) -> &[f64] {
        &self.bar_heights
    }

    /// Bars that received an animated height change, in call order.
    #[must_use]
    pub fn revealed_bars(&self) -> Vec<BarRef> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::SetBarHeight {
                    bar,
                    animated: true,
                    ..
                } => Some(*bar),
                _ => None,
            })
            .collect()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.commands).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize render commands: {e}"))
        })
    }
}

impl Renderer for RecordingRenderer {
    fn render_heading(&mut self, text: &str) -> ChartResult<()> {
        self.commands.push(RenderCommand::Heading(text.to_owned()));
        Ok(())
    }

    fn render_legend(&mut self, labels: &[String]) -> ChartResult<()> {
        self.commands.push(RenderCommand::Legend(labels.to_vec()));
        Ok(())
    }

    fn render_x_axis(&mut self, labels: &[String]) -> ChartResult<()> {
        self.commands.push(RenderCommand::XAxis(labels.to_vec()));
        Ok(())
    }

    fn render_axis_ticks(&mut self, values: &[f64]) -> ChartResult<()> {
        self.commands.push(RenderCommand::AxisTicks(values.to_vec()));
        Ok(())
    }

    fn render_bar(
        &mut self,
        group_index: usize,
        row_index: usize,
        value: f64,
        height_percent: f64,
    ) -> ChartResult<BarRef> {
        let bar = BarRef(self.bar_heights.len());
        self.bar_heights.push(0.0);
        self.commands.push(RenderCommand::Bar {
            bar,
            group_index,
            row_index,
            value,
            height_percent,
        });
        Ok(bar)
    }

    fn set_bar_height(&mut self, bar: BarRef, percent: f64, animated: bool) -> ChartResult<()> {
        let height = self
            .bar_heights
            .get_mut(bar.0)
            .ok_or_else(|| ChartError::Renderer(format!("unknown bar handle {}", bar.0)))?;
        *height = percent;
        self.commands.push(RenderCommand::SetBarHeight {
            bar,
            percent,
            animated,
        });
        Ok(())
    }
}
