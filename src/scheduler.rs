use std::time::Duration;
use std::time::Instant;

/// Decides when the next generation is due.
///
/// The scheduler owns the tick cadence and the paused flag; the world has neither. A tick is due
/// once `interval` has passed since the previous one. Falling behind does not queue up extra
/// ticks, so there is always at least `interval` between two generations.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    paused: bool,
    last_tick: Option<Instant>,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            paused: false,
            last_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Start counting the interval from `now`, e.g. after a reset.
    pub fn restart(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// Whether a generation should be computed at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        !self.paused && self.time_until_due(now).is_zero()
    }

    /// Record that a generation was computed at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// How long the driver may wait for input before the next tick. A paused scheduler still
    /// reports the interval, so the input loop keeps a steady frame rate.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        match self.last_tick {
            _ if self.paused => self.interval,
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::Instant;

    use super::Scheduler;

    const INTERVAL: Duration = Duration::from_millis(50);

    #[test]
    fn first_tick_waits_one_interval() {
        let t0 = Instant::now();
        let mut s = Scheduler::new(INTERVAL);
        s.restart(t0);

        assert!(!s.is_due(t0));
        assert!(!s.is_due(t0 + Duration::from_millis(49)));
        assert!(s.is_due(t0 + INTERVAL));
    }

    #[test]
    fn never_started_is_due() {
        let s = Scheduler::new(INTERVAL);

        assert!(s.is_due(Instant::now()));
    }

    #[test]
    fn mark_restarts_interval() {
        let t0 = Instant::now();
        let mut s = Scheduler::new(INTERVAL);
        s.mark(t0);

        let t1 = t0 + Duration::from_millis(120);
        assert!(s.is_due(t1));

        s.mark(t1);
        assert!(!s.is_due(t1 + Duration::from_millis(10)));
        assert_eq!(
            s.time_until_due(t1 + Duration::from_millis(10)),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn paused_is_never_due() {
        let t0 = Instant::now();
        let mut s = Scheduler::new(INTERVAL);
        s.mark(t0);
        s.toggle_pause();

        assert!(s.is_paused());
        assert!(!s.is_due(t0 + Duration::from_secs(10)));
        assert_eq!(s.time_until_due(t0 + Duration::from_secs(10)), INTERVAL);

        s.toggle_pause();
        assert!(s.is_due(t0 + Duration::from_secs(10)));
    }
}
