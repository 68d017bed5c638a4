//! Rate limiting for drag gestures.
//!
//! A drag produces far more move samples than observers want to see. The
//! throttle delivers the first sample of a burst immediately, defers later
//! ones, and exposes a deadline at which the most recent deferred sample
//! should be flushed. The host owns the timer: it asks for
//! [`EventThrottle::next_deadline`] after each input and calls
//! [`EventThrottle::flush`] when that moment arrives.

use instant::Instant;
use std::time::Duration;

use crate::event::{PointerSample, SamplePhase};

/// Minimum spacing between delivered move samples, roughly one 60 Hz frame.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(16);

/// The throttle's verdict on an incoming sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Admission {
    /// Process the sample now.
    Deliver(PointerSample),
    /// The sample was stored; flush it at [`EventThrottle::next_deadline`]
    /// unless a newer sample replaces it first.
    Deferred,
}

#[derive(Clone, Debug)]
pub struct EventThrottle {
    min_interval: Duration,
    last_delivery: Option<Instant>,
    pending: Option<PointerSample>,
}

impl Default for EventThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl EventThrottle {
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_MIN_INTERVAL)
    }

    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_delivery: None,
            pending: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn set_min_interval(&mut self, min_interval: Duration) {
        self.min_interval = min_interval;
    }

    /// Admit a sample.
    ///
    /// Gesture boundaries bypass rate limiting: `Start` and `End` always
    /// deliver, and they drop any deferred move sample so a stale position
    /// cannot surface after the gesture has ended.
    pub fn admit(&mut self, sample: PointerSample) -> Admission {
        match sample.phase {
            SamplePhase::Start | SamplePhase::End => {
                self.pending = None;
                self.last_delivery = Some(sample.at);
                Admission::Deliver(sample)
            }
            SamplePhase::Move => {
                let due = match self.last_delivery {
                    None => true,
                    Some(last) => sample.at.duration_since(last) >= self.min_interval,
                };
                if due {
                    self.pending = None;
                    self.last_delivery = Some(sample.at);
                    Admission::Deliver(sample)
                } else {
                    self.pending = Some(sample);
                    Admission::Deferred
                }
            }
        }
    }

    /// When the currently deferred sample becomes due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        let last = self.last_delivery?;
        self.pending.map(|_| last + self.min_interval)
    }

    /// Release the deferred sample if its deadline has passed.
    pub fn flush(&mut self, now: Instant) -> Option<PointerSample> {
        let deadline = self.next_deadline()?;
        if now < deadline {
            return None;
        }

        self.last_delivery = Some(now);
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_first_sample_of_a_burst_delivers_immediately() {
        let base = Instant::now();
        let mut throttle = EventThrottle::new();

        let sample = PointerSample::moved((5.0, 5.0), base);
        assert_eq!(throttle.admit(sample), Admission::Deliver(sample));
    }

    #[test]
    fn test_burst_delivers_first_then_flushes_last() {
        let base = Instant::now();
        let mut throttle = EventThrottle::new();

        assert!(matches!(
            throttle.admit(PointerSample::moved((0.0, 0.0), base)),
            Admission::Deliver(_)
        ));
        for i in 1..10u64 {
            let sample = PointerSample::moved((i as f32, 0.0), at(base, i));
            assert_eq!(throttle.admit(sample), Admission::Deferred);
        }

        // Only the newest deferred sample survives to the flush.
        let deadline = throttle.next_deadline().unwrap();
        assert_eq!(deadline, at(base, 16));
        let flushed = throttle.flush(deadline).unwrap();
        assert_eq!(flushed.position, (9.0, 0.0));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn test_flush_before_deadline_is_a_no_op() {
        let base = Instant::now();
        let mut throttle = EventThrottle::new();

        throttle.admit(PointerSample::moved((0.0, 0.0), base));
        throttle.admit(PointerSample::moved((1.0, 0.0), at(base, 5)));
        assert!(throttle.flush(at(base, 10)).is_none());
        assert!(throttle.has_pending());
    }

    #[test]
    fn test_spaced_samples_all_deliver() {
        let base = Instant::now();
        let mut throttle = EventThrottle::new();

        for i in 0..5u64 {
            let sample = PointerSample::moved((i as f32, 0.0), at(base, i * 20));
            assert_eq!(throttle.admit(sample), Admission::Deliver(sample));
        }
        assert!(throttle.next_deadline().is_none());
    }

    #[test]
    fn test_release_bypasses_the_throttle_and_drops_pending() {
        let base = Instant::now();
        let mut throttle = EventThrottle::new();

        throttle.admit(PointerSample::moved((0.0, 0.0), base));
        throttle.admit(PointerSample::moved((1.0, 0.0), at(base, 4)));
        assert!(throttle.has_pending());

        let up = PointerSample::end((2.0, 0.0), at(base, 8));
        assert_eq!(throttle.admit(up), Admission::Deliver(up));
        assert!(!throttle.has_pending());
        assert!(throttle.next_deadline().is_none());
    }

    #[test]
    fn test_gesture_start_resets_the_interval_window() {
        let base = Instant::now();
        let mut throttle = EventThrottle::new();

        throttle.admit(PointerSample::moved((0.0, 0.0), base));
        let down = PointerSample::start((3.0, 0.0), at(base, 2));
        assert_eq!(throttle.admit(down), Admission::Deliver(down));

        // The window restarts at the press, so an immediate move defers.
        let follow = PointerSample::moved((4.0, 0.0), at(base, 3));
        assert_eq!(throttle.admit(follow), Admission::Deferred);
    }

    #[test]
    fn test_custom_interval_is_honored() {
        let base = Instant::now();
        let mut throttle = EventThrottle::with_interval(Duration::from_millis(50));

        throttle.admit(PointerSample::moved((0.0, 0.0), base));
        assert_eq!(
            throttle.admit(PointerSample::moved((1.0, 0.0), at(base, 30))),
            Admission::Deferred
        );
        assert!(matches!(
            throttle.admit(PointerSample::moved((2.0, 0.0), at(base, 60))),
            Admission::Deliver(_)
        ));
    }
}
