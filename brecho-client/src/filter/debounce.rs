//! Debounce state
//!
//! Clock-injected so the timing rules can be checked without a runtime;
//! [`PieceFilter`](super::PieceFilter) drives it with `tokio::time`.

use std::time::Duration;
use tokio::time::Instant;

/// Holds at most one pending value; every push restarts the quiet period.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the quiet period at `now`
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((now, value));
    }

    /// Drop the pending value
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at + self.delay)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its quiet period has elapsed at `now`
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.cancel(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_keystrokes_collapse_into_one_fire() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        let mut fired = Vec::new();

        // keystrokes at 0, 100 and 600ms; polled every millisecond up to 2s
        let keystrokes = [(0, "c"), (100, "ca"), (600, "cal")];
        for t in 0..=2000u64 {
            let now = t0 + ms(t);
            if let Some((_, text)) = keystrokes.iter().find(|(at, _)| *at == t) {
                d.push(*text, now);
            }
            if let Some(text) = d.poll(now) {
                fired.push((t, text));
            }
        }

        assert_eq!(fired, vec![(1100, "cal")]);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_not_due_before_deadline() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        d.push(1, t0);
        assert_eq!(d.deadline(), Some(t0 + ms(500)));
        assert_eq!(d.poll(t0 + ms(499)), None);
        assert_eq!(d.poll(t0 + ms(500)), Some(1));
        assert_eq!(d.poll(t0 + ms(501)), None);
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        d.push("ves", t0);
        assert_eq!(d.cancel(), Some("ves"));
        assert_eq!(d.poll(t0 + ms(1000)), None);
        assert!(d.deadline().is_none());
    }
}
