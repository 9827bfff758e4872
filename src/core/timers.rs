use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Opaque handle for one scheduled one-shot timer.
///
/// Ids are never reused by a scheduler, so a handle to a cancelled or fired
/// timer can be compared safely against newer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Fires once after a reset to begin revealing bars.
    Restart,
    /// Fires between consecutive bar reveals.
    Step,
}

/// Single scheduled-callback primitive the reveal sequencer runs on.
///
/// The host delivers fired timers back to the sequencer by id.
pub trait TimerScheduler {
    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub due_at: Duration,
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Debug, Default)]
pub struct VirtualTimers {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, u64), TimerKind>,
}

impl VirtualTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn pending_kinds(&self) -> Vec<TimerKind> {
        self.pending.values().copied().collect()
    }

    /// Due time of the earliest pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due_at, _)| *due_at)
    }

    /// Removes the earliest timer due at or before `deadline` and moves the
    /// clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<FiredTimer> {
        let (&(due_at, raw), _) = self.pending.first_key_value()?;
        if due_at > deadline {
            return None;
        }
        let kind = self.pending.remove(&(due_at, raw))?;
        self.now = self.now.max(due_at);
        Some(FiredTimer {
            id: TimerId(raw),
            kind,
            due_at,
        })
    }

    /// Moves the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl TimerScheduler for VirtualTimers {
    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerId {
        let raw = self.next_id;
        self.next_id += 1;
        self.pending.insert((self.now + delay, raw), kind);
        TimerId(raw)
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|&(_, raw), _| raw != id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_fire_in_due_then_schedule_order() {
        let mut timers = VirtualTimers::new();
        let late = timers.schedule(Duration::from_millis(200), TimerKind::Restart);
        let first = timers.schedule(Duration::from_millis(100), TimerKind::Step);
        let tie = timers.schedule(Duration::from_millis(200), TimerKind::Step);

        let deadline = Duration::from_millis(500);
        let order: Vec<TimerId> = std::iter::from_fn(|| timers.pop_due(deadline))
            .map(|fired| fired.id)
            .collect();
        assert_eq!(order, vec![first, late, tie]);
        assert_eq!(timers.now(), Duration::from_millis(200));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = VirtualTimers::new();
        let id = timers.schedule(Duration::from_millis(10), TimerKind::Step);
        timers.cancel(id);
        timers.cancel(id);
        assert_eq!(timers.pending_count(), 0);
        assert!(timers.pop_due(Duration::from_secs(1)).is_none());
    }
}
