//! Fixed-interval timers driven by the egui frame loop.
//!
//! egui has no timer callbacks; each frame polls the timers and schedules
//! the next repaint for the earliest deadline.

use std::time::{Duration, Instant};

/// Repeating timer that can be started and stopped.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    /// A stopped timer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Start the timer; the first firing is one interval from `now`.
    /// Starting an active timer keeps its current deadline.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Make the timer fire on the next poll.
    pub fn fire_now(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns true once per elapsed interval and schedules the next one.
    ///
    /// Missed intervals are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next firing, `None` when stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let now = Instant::now();
        assert!(!timer.poll(now + Duration::from_secs(10)));
        assert_eq!(timer.time_until_due(now), None);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let interval = Duration::from_millis(100);
        let mut timer = IntervalTimer::new(interval);
        let now = Instant::now();
        timer.start(now);

        assert!(!timer.poll(now + Duration::from_millis(50)));
        assert!(timer.poll(now + interval));
        assert!(!timer.poll(now + interval));
        // A long stall fires once, not once per missed interval
        assert!(timer.poll(now + Duration::from_secs(5)));
        assert!(!timer.poll(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_restart_keeps_deadline() {
        let interval = Duration::from_millis(100);
        let mut timer = IntervalTimer::new(interval);
        let now = Instant::now();
        timer.start(now);
        timer.start(now + Duration::from_millis(90));
        assert_eq!(timer.time_until_due(now), Some(interval));
    }

    #[test]
    fn test_fire_now_and_stop() {
        let mut timer = IntervalTimer::new(Duration::from_secs(1));
        let now = Instant::now();
        timer.fire_now(now);
        assert!(timer.poll(now));
        timer.stop();
        assert_eq!(timer.time_until_due(now), None);
        assert!(!timer.poll(now + Duration::from_secs(2)));
    }
}
