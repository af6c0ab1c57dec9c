//! Single-shot debounce timer
//!
//! Raw scroll ticks are coalesced: every push resets the deadline, and the
//! latest payload is released once the quiet window elapses. Time is
//! supplied by the caller, so the timer never sleeps or spawns.

use std::time::{Duration, Instant};

use tracing::trace;

/// Default quiet window before a scroll is considered settled
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    deadline: Option<Instant>,
    latest: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            latest: None,
        }
    }

    /// Quiet window length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a raw event, replacing any pending payload and restarting the
    /// window
    pub fn push(&mut self, value: T, now: Instant) {
        if self.deadline.is_some() {
            trace!("debounce window reset");
        }
        self.deadline = Some(now + self.window);
        self.latest = Some(value);
    }

    /// Release the payload if the window has elapsed by `now`
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.latest.take()
            }
            _ => None,
        }
    }

    /// When the pending payload will be released, for scheduling a wakeup
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop the pending payload without releasing it
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.latest = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coalesces_burst() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        for i in 0..10u32 {
            let now = start + Duration::from_millis(u64::from(i) * 20);
            debouncer.push(i, now);
            assert_eq!(debouncer.poll(now), None);
        }

        // Last push at 180ms, so nothing before 280ms
        assert_eq!(debouncer.poll(start + Duration::from_millis(279)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(280)), Some(9));
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn test_fires_once_per_settle() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));

        debouncer.push(1.0f32, start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(60)), Some(1.0));
        assert!(!debouncer.is_pending());

        debouncer.push(2.0, start + Duration::from_millis(70));
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(120))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(130)), Some(2.0));
    }

    #[test]
    fn test_zero_window_fires_immediately() {
        let now = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.push("tick", now);
        assert_eq!(debouncer.poll(now), Some("tick"));
    }

    #[test]
    fn test_cancel() {
        let now = Instant::now();
        let mut debouncer: Debouncer<u8> = Debouncer::default();
        debouncer.push(3, now);
        debouncer.cancel();
        assert_eq!(debouncer.poll(now + Duration::from_secs(1)), None);
    }
}
