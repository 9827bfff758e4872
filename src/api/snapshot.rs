use serde::{Deserialize, Serialize};

use crate::core::{GeometryModel, RevealState, TableData, Y_AXIS_TICK_COUNT};
use crate::error::{ChartError, ChartResult};

pub const CHART_SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Point-in-time view of a built chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub table: TableData,
    pub geometry: GeometryModel,
    pub reveal: RevealState,
}

#[derive(Serialize)]
struct VersionedSnapshotRef<'a> {
    schema_version: u32,
    snapshot: &'a ChartSnapshot,
}

#[derive(Deserialize)]
struct VersionedSnapshot {
    schema_version: u32,
    snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        let payload = VersionedSnapshotRef {
            schema_version: CHART_SNAPSHOT_SCHEMA_VERSION,
            snapshot: self,
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    /// Parses a versioned snapshot and rejects payloads whose table, bars
    /// and reveal cursor disagree with each other.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let payload: VersionedSnapshot = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse snapshot: {e}")))?;
        if payload.schema_version != CHART_SNAPSHOT_SCHEMA_VERSION {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        payload.snapshot.validate()?;
        Ok(payload.snapshot)
    }

    /// Checks the cross-field invariants a built chart always satisfies.
    pub fn validate(&self) -> ChartResult<()> {
        let rows = self.table.row_count();
        let columns = self.table.column_count();

        if self.table.column_groups.len() != columns {
            return Err(invalid(format!(
                "{} column groups for {columns} column labels",
                self.table.column_groups.len()
            )));
        }
        if let Some(group) = self
            .table
            .column_groups
            .iter()
            .position(|group| group.len() != rows)
        {
            return Err(invalid(format!(
                "column group {group} does not hold {rows} values"
            )));
        }
        if self.table.values.len() != rows * columns {
            return Err(invalid(format!(
                "{} values for a {rows}x{columns} table",
                self.table.values.len()
            )));
        }
        if self.geometry.rows_per_group != rows {
            return Err(invalid(format!(
                "geometry groups {} rows, table has {rows}",
                self.geometry.rows_per_group
            )));
        }
        if self.geometry.y_axis_ticks.len() != Y_AXIS_TICK_COUNT {
            return Err(invalid(format!(
                "expected {Y_AXIS_TICK_COUNT} axis ticks, found {}",
                self.geometry.y_axis_ticks.len()
            )));
        }
        if self.geometry.bars.len() != rows * columns {
            return Err(invalid(format!(
                "{} bars for a {rows}x{columns} table",
                self.geometry.bars.len()
            )));
        }
        for (index, bar) in self.geometry.bars.iter().enumerate() {
            let in_order = bar.group_index == index / rows.max(1)
                && bar.row_index == index % rows.max(1);
            let matches_table = self
                .table
                .value_at(bar.row_index, bar.group_index)
                .is_some_and(|value| value == bar.value);
            if !in_order || !matches_table {
                return Err(invalid(format!("bar {index} does not match the table")));
            }
        }
        if self.reveal.cursor > self.geometry.bars.len() {
            return Err(invalid(format!(
                "reveal cursor {} past {} bars",
                self.reveal.cursor,
                self.geometry.bars.len()
            )));
        }
        Ok(())
    }
}

fn invalid(detail: String) -> ChartError {
    ChartError::InvalidData(format!("inconsistent snapshot: {detail}"))
}
