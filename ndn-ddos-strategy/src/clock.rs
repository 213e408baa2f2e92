use std::time::{Duration, Instant};

/// The single revert timer armed while the strategy is in ATTACK (§3 "a handle to the currently
/// armed revert timer"; §5 cancellation rules).
///
/// There is exactly one of these per `Strategy`, not per record — every record's revert
/// bookkeeping rides the same periodic tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevertTimer {
    deadline: Option<Instant>,
}

impl RevertTimer {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline
            .map(|d| d.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Cancels and re-arms to `max(remaining, min_interval)` (§5 cancellation), whether or not a
    /// timer was already armed — an unarmed timer behaves as if its remaining time were zero.
    pub fn arm_at_least(&mut self, now: Instant, min_interval: Duration) {
        let remaining = self.remaining(now);
        self.deadline = Some(now + remaining.max(min_interval));
    }

    /// Not re-armed on transition to NORMAL (§4.6 step 4, P3).
    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn has_fired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| d <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_an_unarmed_timer_uses_min_interval() {
        let mut timer = RevertTimer::new();
        let now = Instant::now();

        timer.arm_at_least(now, Duration::from_millis(100));

        assert_eq!(timer.remaining(now), Duration::from_millis(100));
    }

    #[test]
    fn rearming_preserves_a_closer_deadline() {
        let mut timer = RevertTimer::new();
        let now = Instant::now();
        timer.arm_at_least(now, Duration::from_millis(100));

        let later = now + Duration::from_millis(40);
        timer.arm_at_least(later, Duration::from_millis(100));

        // 60ms of the original deadline remained, which is less than the 100ms minimum, so the
        // new deadline is min_interval out from `later`, not the old deadline.
        assert_eq!(timer.remaining(later), Duration::from_millis(100));
    }

    #[test]
    fn disarm_clears_the_deadline() {
        let mut timer = RevertTimer::new();
        let now = Instant::now();
        timer.arm_at_least(now, Duration::from_millis(100));

        timer.disarm();

        assert!(!timer.is_armed());
    }
}
