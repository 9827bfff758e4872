pub mod extract;
pub mod geometry;
pub mod reveal;
pub mod source;
pub mod timers;

pub use extract::{TableData, extract_table};
pub use geometry::{
    Bar, GeometryModel, HeightOverflowPolicy, Y_AXIS_TICK_COUNT, compute_geometry,
    compute_geometry_with,
};
pub use reveal::{
    RevealEvent, RevealPhase, RevealSequencer, RevealState, RevealTarget, RevealTiming,
};
pub use source::{SourceRow, SourceTable, SourceTableRow, TableSource};
pub use timers::{FiredTimer, TimerId, TimerKind, TimerScheduler, VirtualTimers};
