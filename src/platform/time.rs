//! Frame pacing

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::SIM_HZ;
use crate::settings::Pacing;

/// Blocks the driver loop until the next frame boundary
pub trait Clock {
    fn tick(&mut self);
}

/// Sleeps until the next 1/`hz` s boundary.
///
/// Boundaries are scheduled from the previous boundary, not from when
/// `tick` returns, so short stalls do not accumulate drift. A stall longer
/// than a frame resynchronises instead of bursting to catch up.
#[derive(Debug)]
pub struct FixedRateClock {
    period: Duration,
    next: Instant,
}

impl FixedRateClock {
    pub fn new(hz: u32) -> Self {
        let period = Duration::from_nanos(1_000_000_000 / u64::from(hz.max(1)));
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self::new(SIM_HZ)
    }
}

impl Clock for FixedRateClock {
    fn tick(&mut self) {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            log::debug!("Frame overran by {:?}", now - self.next);
            self.next = now + self.period;
        }
    }
}

/// Never waits
#[derive(Debug, Default)]
pub struct Unpaced;

impl Clock for Unpaced {
    fn tick(&mut self) {}
}

pub fn clock_for(pacing: Pacing) -> Box<dyn Clock> {
    match pacing {
        Pacing::Realtime => Box::new(FixedRateClock::default()),
        Pacing::Unpaced => Box::new(Unpaced),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_period_is_fifty_hz() {
        let clock = FixedRateClock::default();
        assert_eq!(clock.period(), Duration::from_millis(20));
    }

    #[test]
    fn test_fixed_rate_clock_waits() {
        let mut clock = FixedRateClock::new(200);
        let start = Instant::now();
        for _ in 0..3 {
            clock.tick();
        }
        // Three 5 ms frames, with slack for the first partial one
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_unpaced_returns_immediately() {
        let mut clock = clock_for(Pacing::Unpaced);
        let start = Instant::now();
        for _ in 0..1000 {
            clock.tick();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
