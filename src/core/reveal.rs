use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{TimerId, TimerKind, TimerScheduler};
use crate::error::ChartResult;
use crate::render::{BarRef, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RevealPhase {
    #[default]
    Idle,
    Revealing,
    Complete,
}

/// Observable sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevealState {
    /// Index of the next bar to reveal, in `0..=bar_count`.
    pub cursor: usize,
    pub phase: RevealPhase,
}

/// Fixed pacing of the reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTiming {
    pub restart_delay: Duration,
    pub step_delay: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            restart_delay: Duration::from_millis(200),
            step_delay: Duration::from_millis(100),
        }
    }
}

/// One bar the sequencer releases, with the height it animates to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealTarget {
    pub bar: BarRef,
    pub height_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RevealEvent {
    Revealed { index: usize, bar: BarRef },
    Completed,
}

/// Timer-driven state machine releasing bars one at a time.
///
/// Both timer handles are owned here. A fired id that does not match the
/// currently pending restart or step timer is stale and ignored, so nothing
/// scheduled before a [`RevealSequencer::reset`] can move the cursor.
#[derive(Debug)]
pub struct RevealSequencer {
    targets: Vec<RevealTarget>,
    timing: RevealTiming,
    state: RevealState,
    restart_timer: Option<TimerId>,
    step_timer: Option<TimerId>,
}

impl RevealSequencer {
    #[must_use]
    pub fn new(targets: Vec<RevealTarget>, timing: RevealTiming) -> Self {
        Self {
            targets,
            timing,
            state: RevealState::default(),
            restart_timer: None,
            step_timer: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> RevealState {
        self.state
    }

    #[must_use]
    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    #[must_use]
    pub fn targets(&self) -> &[RevealTarget] {
        &self.targets
    }

    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        self.restart_timer.is_some() || self.step_timer.is_some()
    }

    /// Zeroes every bar and schedules a fresh reveal after the restart delay.
    ///
    /// Safe to call from any phase and any number of times in a row; only the
    /// restart scheduled by the latest call stays pending. The state reset and
    /// the restart happen even when the renderer rejects a zeroing call; the
    /// first such error is returned after every bar has been attempted.
    pub fn reset<S, R>(&mut self, scheduler: &mut S, renderer: &mut R) -> ChartResult<()>
    where
        S: TimerScheduler + ?Sized,
        R: Renderer + ?Sized,
    {
        self.cancel_timers(scheduler);
        self.state = RevealState::default();
        let id = scheduler.schedule(self.timing.restart_delay, TimerKind::Restart);
        self.restart_timer = Some(id);
        trace!(timer = id.raw(), bars = self.targets.len(), "reveal reset");

        let mut first_error = None;
        for target in &self.targets {
            if let Err(err) = renderer.set_bar_height(target.bar, 0.0, false) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Cancels pending timers without touching bar heights or the cursor.
    pub fn cancel_timers<S: TimerScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.restart_timer.take() {
            scheduler.cancel(id);
        }
        if let Some(id) = self.step_timer.take() {
            scheduler.cancel(id);
        }
    }

    /// Handles a fired timer.
    ///
    /// Returns `Ok(None)` for ids this sequencer is not waiting on.
    pub fn on_timer<S, R>(
        &mut self,
        id: TimerId,
        scheduler: &mut S,
        renderer: &mut R,
    ) -> ChartResult<Option<RevealEvent>>
    where
        S: TimerScheduler + ?Sized,
        R: Renderer + ?Sized,
    {
        if self.restart_timer == Some(id) {
            self.restart_timer = None;
            self.state.phase = RevealPhase::Revealing;
            trace!(timer = id.raw(), "reveal started");
            return self.advance(scheduler, renderer).map(Some);
        }

        if self.step_timer == Some(id) {
            self.step_timer = None;
            return self.advance(scheduler, renderer).map(Some);
        }

        debug!(timer = id.raw(), "ignoring stale reveal timer");
        Ok(None)
    }

    /// Reveals the bar at the cursor and schedules the next step, or marks
    /// the sequence complete when no bars remain.
    ///
    /// The cursor and the next step are committed before the renderer call,
    /// so a renderer error skips that bar instead of stalling the sequence.
    fn advance<S, R>(&mut self, scheduler: &mut S, renderer: &mut R) -> ChartResult<RevealEvent>
    where
        S: TimerScheduler + ?Sized,
        R: Renderer + ?Sized,
    {
        let index = self.state.cursor;
        let Some(target) = self.targets.get(index).copied() else {
            self.state.phase = RevealPhase::Complete;
            trace!(bars = self.targets.len(), "reveal complete");
            return Ok(RevealEvent::Completed);
        };

        self.state.cursor = index + 1;
        self.step_timer = Some(scheduler.schedule(self.timing.step_delay, TimerKind::Step));
        renderer.set_bar_height(target.bar, target.height_percent, true)?;
        trace!(index, height_percent = target.height_percent, "revealed bar");
        Ok(RevealEvent::Revealed {
            index,
            bar: target.bar,
        })
    }
}
