//! Interval timers driven by a manual clock
//!
//! `VirtualTimers` stands in for the browser's `setInterval` when there is no
//! event loop: the host advances the clock and dispatches whatever fired.

use super::Timers;

/// Handle for a registered interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Interval {
    id: TimerId,
    period_ms: u64,
    next_due_ms: u64,
}

/// Repeating intervals over a clock that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct VirtualTimers {
    now_ms: u64,
    next_id: u32,
    intervals: Vec<Interval>,
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed on the virtual clock
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of intervals still registered
    pub fn active(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.intervals.iter().any(|i| i.id == id)
    }

    /// Move the clock forward and return every firing, in time order
    ///
    /// An interval that comes due several times within `ms` appears once per
    /// firing.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        let target = self.now_ms + ms;
        let mut fired = Vec::new();

        loop {
            let next = self
                .intervals
                .iter_mut()
                .filter(|i| i.next_due_ms <= target)
                .min_by_key(|i| i.next_due_ms);

            let Some(interval) = next else {
                break;
            };
            self.now_ms = interval.next_due_ms;
            interval.next_due_ms += interval.period_ms;
            fired.push(interval.id);
        }

        self.now_ms = target;
        fired
    }
}

impl Timers for VirtualTimers {
    fn set_interval(&mut self, interval_ms: u32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Zero-length periods would fire forever within one advance
        let period_ms = u64::from(interval_ms.max(1));
        self.intervals.push(Interval {
            id,
            period_ms,
            next_due_ms: self.now_ms + period_ms,
        });
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.intervals.retain(|i| i.id != id);
    }
}
