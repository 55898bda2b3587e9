use std::time::Duration;

/// Turns irregular elapsed time into a count of fixed-period ticks.
///
/// The event loop wakes at whatever cadence input polling allows; each
/// consumer keeps a `Ticker` with its own period and asks how many of its
/// periods fit into the time that passed. The leftover carries over to the
/// next call until [`Ticker::cancel`] drops it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    period: Duration,
    carry: Duration,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            carry: Duration::ZERO,
        }
    }

    /// Switch to a new period, discarding any partial one.
    pub fn reset(&mut self, period: Duration) {
        *self = Self::new(period);
    }

    /// Add `elapsed` and return how many whole periods fired.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let mut fired = 0;
        while self.carry >= self.period {
            self.carry -= self.period;
            fired += 1;
        }
        fired
    }

    /// Forget time accumulated towards the next tick.
    pub fn cancel(&mut self) {
        self.carry = Duration::ZERO;
    }
}
