// src/scheduler.rs
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Upper bound on ticks replayed after a stall (window minimised, debugger, ...).
pub const MAX_CATCH_UP_TICKS: u32 = 50;

/// Stops the schedule it was taken from. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Fixed-period tick source polled from the frame loop.
pub struct TickSchedule {
    period: Duration,
    next_due: Option<Instant>,
    cancel: CancelHandle,
}

impl TickSchedule {
    pub fn every(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
            cancel: CancelHandle::default(),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Forget the previous deadline; the next poll arms afresh. Used when
    /// updates resume so the idle time is not replayed.
    pub fn rearm(&mut self) {
        self.next_due = None;
    }

    /// Instants of every tick that fell due since the previous poll, oldest
    /// first. The first poll arms the schedule and reports nothing.
    pub fn due_ticks(&mut self, now: Instant) -> Vec<Instant> {
        if self.cancel.is_cancelled() {
            return Vec::new();
        }
        let Some(next_due) = self.next_due else {
            self.next_due = Some(now + self.period);
            return Vec::new();
        };
        if now < next_due {
            return Vec::new();
        }
        let behind = now.duration_since(next_due);
        let due = 1 + (behind.as_nanos() / self.period.as_nanos()) as u64;
        if due > MAX_CATCH_UP_TICKS as u64 {
            log::warn!("tick schedule fell {due} periods behind, skipping ahead");
            self.next_due = Some(now + self.period);
            // replay only the newest periods, ending at `now`
            return (0..MAX_CATCH_UP_TICKS)
                .rev()
                .map(|back| now.checked_sub(self.period * back).unwrap_or(now))
                .collect();
        }
        let due = due as u32;
        self.next_due = Some(next_due + self.period * due);
        (0..due).map(|k| next_due + self.period * k).collect()
    }

    /// Time until the next tick, for repaint scheduling.
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => self.period,
        }
    }
}

/// Wall-clock time of a scheduled instant, given a matching pair of
/// monotonic and wall-clock readings taken at `now`.
pub fn to_wall_clock(scheduled: Instant, now: Instant, wall_now: DateTime<Utc>) -> DateTime<Utc> {
    let lag = chrono::Duration::from_std(now.saturating_duration_since(scheduled))
        .unwrap_or_else(|_| chrono::Duration::zero());
    wall_now - lag
}
