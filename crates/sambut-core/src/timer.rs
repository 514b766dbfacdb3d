#![forbid(unsafe_code)]

//! Host-driven timer queue.
//!
//! The page never sleeps or spawns. Controllers schedule [`TimerTask`]s
//! relative to the queue's monotonic clock, and the host calls
//! [`TimerQueue::advance_to`] (typically from a single `setTimeout` armed for
//! [`TimerQueue::next_deadline`]) to collect the tasks that came due.
//!
//! Every scheduled task has a [`TimerId`]; cancelling it guarantees the task
//! is never returned, which is how a superseded alert drops its pending
//! reveal and dismiss callbacks.

use core::time::Duration;

use crate::alert::AlertId;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Deferred page work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Slide the alert into view.
    RevealAlert(AlertId),
    /// Auto-dismiss the alert.
    DismissAlert(AlertId),
    /// Revert the greeting pulse.
    SettlePulse,
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TimerId,
    deadline: Duration,
    task: TimerTask,
}

/// Deterministic monotonic clock plus pending tasks.
#[derive(Debug, Default, Clone)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    /// Create a queue whose clock starts at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to run `delay` after the current time.
    pub fn schedule_after(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.pending.push(Scheduled {
            id,
            deadline: self.now.saturating_add(delay),
            task,
        });
        id
    }

    /// Drop a pending task. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.deadline).min()
    }

    /// Move the clock to `now` and return every task due by then, ordered by
    /// deadline and then by scheduling order.
    ///
    /// The clock never runs backwards; an earlier `now` is ignored.
    pub fn advance_to(&mut self, now: Duration) -> Vec<TimerTask> {
        self.now = self.now.max(now);
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|s| s.deadline <= self.now);
        self.pending = rest;
        due.sort_by_key(|s| (s.deadline, s.id));
        due.into_iter().map(|s| s.task).collect()
    }

    /// Advance the clock by `dt`.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerTask> {
        self.advance_to(self.now.saturating_add(dt))
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
