use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::TableData;
use crate::error::{ChartError, ChartResult};

/// Number of labeled y-axis gridlines, top and bottom included.
pub const Y_AXIS_TICK_COUNT: usize = 5;

/// How bar heights above 100% are handled when a value exceeds `y_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeightOverflowPolicy {
    /// Heights follow `floor(value / y_max * 100)` with no bounds applied.
    #[default]
    Unclamped,
    /// Heights are limited to `0..=100`.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub group_index: usize,
    pub row_index: usize,
    pub value: f64,
    pub height_percent: f64,
}

/// Axis scale and per-bar target heights derived from [`TableData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryModel {
    pub y_max: f64,
    /// Tick values from `y_max` down to `0`.
    pub y_axis_ticks: Vec<f64>,
    /// Column-major: every bar of group 0, then group 1, and so on.
    pub bars: Vec<Bar>,
    pub rows_per_group: usize,
}

impl GeometryModel {
    /// Iterates bars one column group at a time.
    pub fn groups(&self) -> impl Iterator<Item = &[Bar]> {
        self.bars.chunks(self.rows_per_group.max(1))
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups().count()
    }
}

pub fn compute_geometry(data: &TableData) -> ChartResult<GeometryModel> {
    compute_geometry_with(data, HeightOverflowPolicy::default())
}

pub fn compute_geometry_with(
    data: &TableData,
    overflow: HeightOverflowPolicy,
) -> ChartResult<GeometryModel> {
    let max_value = data
        .values
        .iter()
        .copied()
        .map(OrderedFloat)
        .max()
        .ok_or(ChartError::EmptyDataset)?
        .into_inner();

    let y_max = y_max_for(max_value);
    let y_axis_ticks = y_axis_ticks(y_max);

    let mut bars = Vec::with_capacity(data.values.len());
    for (group_index, group) in data.column_groups.iter().enumerate() {
        for (row_index, &value) in group.iter().enumerate() {
            bars.push(Bar {
                group_index,
                row_index,
                value,
                height_percent: height_percent(value, y_max, overflow),
            });
        }
    }

    debug!(
        max_value,
        y_max,
        bar_count = bars.len(),
        ?overflow,
        "computed chart geometry"
    );

    Ok(GeometryModel {
        y_max,
        y_axis_ticks,
        bars,
        rows_per_group: data.row_labels.len(),
    })
}

/// Rounds the data maximum up to the chart scale: `ceil(max / 1000) * 100`.
///
/// Non-positive maxima produce a zero scale.
#[must_use]
pub fn y_max_for(max_value: f64) -> f64 {
    if max_value <= 0.0 {
        return 0.0;
    }
    (max_value / 1000.0).ceil() * 100.0
}

/// Evenly spaced tick values from `y_max` down to `0`.
#[must_use]
pub fn y_axis_ticks(y_max: f64) -> Vec<f64> {
    let divisions = (Y_AXIS_TICK_COUNT - 1) as f64;
    (0..Y_AXIS_TICK_COUNT)
        .rev()
        .map(|i| y_max * i as f64 / divisions)
        .collect()
}

/// Target height of a bar as a whole percentage of `y_max`.
///
/// A zero scale yields `0` for every value.
#[must_use]
pub fn height_percent(value: f64, y_max: f64, overflow: HeightOverflowPolicy) -> f64 {
    if y_max == 0.0 {
        return 0.0;
    }
    let percent = (value / y_max * 100.0).floor();
    match overflow {
        HeightOverflowPolicy::Unclamped => percent,
        HeightOverflowPolicy::Clamp => percent.clamp(0.0, 100.0),
    }
}
