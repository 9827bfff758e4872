use std::time::Duration;

use tracing::{debug, warn};

use crate::core::{
    GeometryModel, RevealEvent, RevealSequencer, RevealState, RevealTarget, TableData,
    TableSource, TimerId, TimerScheduler, VirtualTimers, compute_geometry_with, extract_table,
};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{BarChartConfig, ChartSnapshot};

/// A built chart: extracted data, derived geometry, and the reveal sequence
/// bound to one renderer and one timer scheduler.
pub struct BarChart<R: Renderer, S: TimerScheduler = VirtualTimers> {
    renderer: R,
    scheduler: S,
    config: BarChartConfig,
    table: TableData,
    geometry: GeometryModel,
    sequencer: RevealSequencer,
}

impl<R: Renderer> BarChart<R, VirtualTimers> {
    /// Builds a chart driven by an in-process virtual clock.
    pub fn build<T>(source: &T, renderer: R, config: BarChartConfig) -> ChartResult<Self>
    where
        T: TableSource + ?Sized,
    {
        Self::build_with_scheduler(source, renderer, VirtualTimers::new(), config)
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Moves the virtual clock forward by `delta`, firing every timer that
    /// comes due on the way.
    pub fn advance_by(&mut self, delta: Duration) -> ChartResult<Vec<RevealEvent>> {
        let deadline = self.scheduler.now() + delta;
        let mut events = Vec::new();
        while let Some(fired) = self.scheduler.pop_due(deadline) {
            if let Some(event) = self.on_timer(fired.id)? {
                events.push(event);
            }
        }
        self.scheduler.set_now(deadline);
        Ok(events)
    }

    /// Fires pending timers until none remain.
    pub fn run_to_completion(&mut self) -> ChartResult<Vec<RevealEvent>> {
        let mut events = Vec::new();
        while let Some(due_at) = self.scheduler.next_due() {
            while let Some(fired) = self.scheduler.pop_due(due_at) {
                if let Some(event) = self.on_timer(fired.id)? {
                    events.push(event);
                }
            }
        }
        Ok(events)
    }
}

impl<R: Renderer, S: TimerScheduler> BarChart<R, S> {
    /// Builds the chart against a host-provided scheduler.
    ///
    /// Extraction and geometry run before the first renderer call, so an
    /// invalid source leaves the renderer untouched. Static parts render in
    /// the order heading, legend, x-axis, y-axis, bars.
    pub fn build_with_scheduler<T>(
        source: &T,
        mut renderer: R,
        mut scheduler: S,
        config: BarChartConfig,
    ) -> ChartResult<Self>
    where
        T: TableSource + ?Sized,
    {
        config.validate()?;
        let built = extract_table(source).and_then(|table| {
            let geometry = compute_geometry_with(&table, config.height_overflow)?;
            Ok((table, geometry))
        });
        let (table, geometry) =
            built.inspect_err(|err| warn!(error = %err, "bar chart build aborted"))?;

        renderer.render_heading(&table.caption)?;
        renderer.render_legend(&table.row_labels)?;
        renderer.render_x_axis(&table.column_labels)?;
        renderer.render_axis_ticks(&geometry.y_axis_ticks)?;

        let mut targets = Vec::with_capacity(geometry.bars.len());
        for bar in &geometry.bars {
            let handle = renderer.render_bar(
                bar.group_index,
                bar.row_index,
                bar.value,
                bar.height_percent,
            )?;
            targets.push(RevealTarget {
                bar: handle,
                height_percent: bar.height_percent,
            });
        }

        let mut sequencer = RevealSequencer::new(targets, config.reveal_timing());
        if config.autostart {
            sequencer.reset(&mut scheduler, &mut renderer)?;
        }

        debug!(
            caption = %table.caption,
            groups = table.column_count(),
            bars = geometry.bars.len(),
            y_max = geometry.y_max,
            autostart = config.autostart,
            "built bar chart"
        );

        Ok(Self {
            renderer,
            scheduler,
            config,
            table,
            geometry,
            sequencer,
        })
    }

    /// Zeroes all bars and replays the reveal from the first bar.
    pub fn reset(&mut self) -> ChartResult<()> {
        self.sequencer
            .reset(&mut self.scheduler, &mut self.renderer)
    }

    /// Delivers a timer fired by the scheduler.
    pub fn on_timer(&mut self, id: TimerId) -> ChartResult<Option<RevealEvent>> {
        self.sequencer
            .on_timer(id, &mut self.scheduler, &mut self.renderer)
    }

    #[must_use]
    pub fn table(&self) -> &TableData {
        &self.table
    }

    #[must_use]
    pub fn geometry(&self) -> &GeometryModel {
        &self.geometry
    }

    #[must_use]
    pub fn reveal_state(&self) -> RevealState {
        self.sequencer.state()
    }

    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        self.sequencer.has_pending_timer()
    }

    #[must_use]
    pub fn config(&self) -> BarChartConfig {
        self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            table: self.table.clone(),
            geometry: self.geometry.clone(),
            reveal: self.sequencer.state(),
        }
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
