//! Fixed-interval autoplay timer
//!
//! The scheduler owns no thread and no callback. It only remembers when the
//! next tick is due; the session polls it with the current time from a
//! [`Clock`] and runs one advance per due tick. Stopping clears the deadline,
//! so nothing can fire after [`Scheduler::stop`] returns.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Autoplay timer state
#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    next_due: Option<Duration>,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Scheduler {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arm the timer. Starting an active timer is a no-op and returns false,
    /// so there is never more than one pending deadline.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.is_active() {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }

    /// Disarm the timer. Idempotent.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Number of ticks that fell due up to `now`. The deadline moves past
    /// `now` so each tick is reported exactly once.
    pub fn poll(&mut self, now: Duration) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let late = (now - due).as_nanos() / self.interval.as_nanos();
        let ticks = u32::try_from(late + 1).unwrap_or(u32::MAX);
        self.next_due = Some(due + self.interval * ticks);
        ticks
    }
}
