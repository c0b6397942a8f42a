use std::time::{Duration, Instant};

/// Identifies one armed timer. A restart always yields a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    id: TimerId,
    interval: Duration,
    next_due: Instant,
}

/// A single repeating timer, polled by the owner's event loop.
///
/// At most one timer is active: `start` drops the previous one before arming
/// a new one, and nothing fires once `cancel` has run.
#[derive(Debug, Default)]
pub struct Scheduler {
    active: Option<ActiveTimer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any running timer and arm a new one whose first tick is due at `now + interval`.
    pub fn start(&mut self, interval: Duration, now: Instant) -> TimerId {
        if let Some(previous) = self.cancel() {
            log::trace!("timer {:?} replaced", previous);
        }
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.active = Some(ActiveTimer {
            id,
            interval,
            next_due: now + interval,
        });
        id
    }

    pub fn cancel(&mut self) -> Option<TimerId> {
        self.active.take().map(|timer| timer.id)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_id(&self) -> Option<TimerId> {
        self.active.map(|timer| timer.id)
    }

    pub fn interval(&self) -> Option<Duration> {
        self.active.map(|timer| timer.interval)
    }

    /// When the next tick is due, if a timer is armed.
    pub fn next_due(&self) -> Option<Instant> {
        self.active.map(|timer| timer.next_due)
    }

    /// Report whether a tick is due at `now`. At most one tick per call.
    ///
    /// Ticks missed by more than a whole interval are dropped and the
    /// schedule is re-anchored on `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(timer) = self.active.as_mut() else {
            return false;
        };
        if now < timer.next_due {
            return false;
        }

        timer.next_due += timer.interval;
        if timer.next_due <= now {
            timer.next_due = now + timer.interval;
        }
        true
    }
}
