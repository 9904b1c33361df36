//! Fixed-rate tick scheduling
//!
//! The game ticks at [`TICK_HZ`](crate::consts::TICK_HZ) regardless of how
//! long a tick or frame takes. A late tick is not made up for: the next
//! deadline is measured from when the late tick actually ran.

use std::time::{Duration, Instant};

use crate::consts::TICK_INTERVAL_MS;

/// Tick period as a `Duration`
pub fn tick_period() -> Duration {
    Duration::from_secs_f64(TICK_INTERVAL_MS / 1000.0)
}

/// Periodic deadline tracker for the native loop
#[derive(Debug, Clone)]
pub struct IntervalClock {
    period: Duration,
    next: Instant,
    overruns: u64,
}

impl IntervalClock {
    /// Clock whose first tick is due immediately
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now,
            overruns: 0,
        }
    }

    /// Standard 60 Hz clock starting now
    pub fn standard() -> Self {
        Self::new(tick_period(), Instant::now())
    }

    /// Ticks that started later than a full period past their deadline
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Record that a tick ran at `now` and schedule the following one.
    ///
    /// On time: next = previous deadline + period. Late by a period or more:
    /// next = now + period (missed ticks are dropped, not replayed).
    pub fn mark_tick(&mut self, now: Instant) -> Instant {
        let scheduled = self.next + self.period;
        self.next = if now >= scheduled {
            self.overruns += 1;
            log::debug!("Tick overran by {:?}", now - self.next);
            now + self.period
        } else {
            scheduled
        };
        self.next
    }

    /// Sleep until the next deadline, then mark the tick
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }
        self.mark_tick(Instant::now());
    }
}
