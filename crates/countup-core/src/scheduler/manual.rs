use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::timer::{Timer, TimerCallback, TimerHandle};

/// Deterministic timer driven by an explicit virtual clock
///
/// Nothing fires until the owner calls [`advance`](Self::advance) or
/// [`run_until_idle`](Self::run_until_idle). Suited to hosts with their own
/// tick loop and to tests. Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualTimer {
    inner: Arc<Mutex<ManualClock>>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

struct Pending {
    id: u64,
    due: Duration,
    callback: TimerCallback,
}

impl ManualClock {
    /// Remove and return the earliest callback due at or before `deadline`
    fn pop_due(&mut self, deadline: Duration) -> Option<(Duration, TimerCallback)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= deadline)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;
        let pending = self.pending.swap_remove(index);
        Some((pending.due, pending.callback))
    }
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    fn clock(&self) -> MutexGuard<'_, ManualClock> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Virtual time elapsed so far
    pub fn now(&self) -> Duration {
        self.clock().now
    }

    /// Number of callbacks waiting to fire
    pub fn pending(&self) -> usize {
        self.clock().pending.len()
    }

    /// Move the clock forward, firing every callback that comes due
    ///
    /// Callbacks scheduled while advancing also fire if they fall inside the
    /// window. Returns how many callbacks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let deadline = self.now().saturating_add(by);
        let mut fired = 0;

        loop {
            // Release the lock before running: callbacks schedule new timers
            let next = {
                let mut clock = self.clock();
                let next = clock.pop_due(deadline);
                if let Some((due, _)) = &next {
                    clock.now = *due;
                }
                next
            };
            match next {
                Some((_, callback)) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }

        self.clock().now = deadline;
        fired
    }

    /// Fire callbacks in due order until none are left
    ///
    /// Stops after `limit` callbacks so a run that never terminates cannot
    /// spin forever. Returns how many callbacks fired.
    pub fn run_until_idle(&self, limit: usize) -> usize {
        let mut fired = 0;

        while fired < limit {
            let next = {
                let mut clock = self.clock();
                let next = clock.pop_due(Duration::MAX);
                if let Some((due, _)) = &next {
                    clock.now = *due;
                }
                next
            };
            match next {
                Some((_, callback)) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }

        fired
    }
}

impl Timer for ManualTimer {
    type Handle = ManualTimerHandle;

    fn schedule(&self, delay: Duration, callback: TimerCallback) -> Self::Handle {
        let mut clock = self.clock();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now.saturating_add(delay);
        clock.pending.push(Pending { id, due, callback });

        ManualTimerHandle {
            id,
            clock: Arc::clone(&self.inner),
        }
    }
}

pub struct ManualTimerHandle {
    id: u64,
    clock: Arc<Mutex<ManualClock>>,
}

impl TimerHandle for ManualTimerHandle {
    fn cancel(&self) {
        let mut clock = self.clock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clock.pending.retain(|p| p.id != self.id);
    }
}
