//! One-shot timeout timer
//!
//! Deadline based and polled by the owner, so it works with any event loop
//! and with a [`ManualClock`](crate::clock::ManualClock) in tests.

/// A restartable one-shot timeout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeoutTimer {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl TimeoutTimer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            deadline: None,
        }
    }

    pub fn delay(&self) -> f64 {
        self.delay_ms
    }

    pub fn set_delay(&mut self, delay_ms: f64) {
        self.delay_ms = delay_ms.max(0.0);
    }

    /// Arm (or re-arm) the timer relative to `now`
    pub fn start(&mut self, now: f64) {
        self.deadline = Some(now + self.delay_ms);
    }

    /// Disarm the timer. Safe to call when it is not running.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the timer fires, if armed
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Returns true exactly once when `now` reaches the deadline
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_at_deadline() {
        let mut timer = TimeoutTimer::new(500.0);
        timer.start(1000.0);
        assert_eq!(timer.deadline(), Some(1500.0));

        assert!(!timer.poll(1499.0));
        assert!(timer.poll(1500.0));
        assert!(!timer.poll(2000.0));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_restart_pushes_deadline() {
        let mut timer = TimeoutTimer::new(500.0);
        timer.start(0.0);
        timer.start(400.0);
        assert!(!timer.poll(600.0));
        assert!(timer.poll(900.0));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timer = TimeoutTimer::new(100.0);
        timer.stop();
        timer.start(0.0);
        timer.stop();
        timer.stop();
        assert!(!timer.poll(1000.0));
    }

    #[test]
    fn test_zero_delay_fires_on_next_poll() {
        let mut timer = TimeoutTimer::new(-5.0);
        assert_eq!(timer.delay(), 0.0);
        timer.start(10.0);
        assert!(timer.poll(10.0));
    }
}
