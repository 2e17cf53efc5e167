//! Clock implementations

use std::time::{Duration, Instant};

use serde::Serialize;

/// Snapshot of the animation clock after an advance
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClockReading {
    /// Total animated time in seconds
    pub elapsed: f64,
    /// Time covered by the last advance in seconds
    pub delta: f64,
}

/// Animation clock - elapsed time and last delta
///
/// INVARIANT: elapsed time is monotonically increasing and never reset.
/// The owner decides *whether* to advance it (playback gating); the clock
/// itself has no notion of paused.
#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    /// Exact accumulated time
    elapsed: Duration,
    /// Duration of the last advance
    delta: Duration,
    /// Number of advances so far
    frames: u64,
}

impl AnimationClock {
    /// Create a clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame delta and return the new reading
    pub fn advance(&mut self, dt: Duration) -> ClockReading {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.delta = dt;
        self.frames += 1;
        self.reading()
    }

    /// Current reading without advancing
    pub fn reading(&self) -> ClockReading {
        ClockReading {
            elapsed: self.elapsed.as_secs_f64(),
            delta: self.delta.as_secs_f64(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Frame timer - wall-clock delta between consecutive frames
///
/// Deltas are clamped to `max_delta` so that a stalled loop (suspended
/// laptop, debugger pause) does not fast-forward the animation.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last: Option<Instant>,
    max_delta: Duration,
}

impl FrameTimer {
    /// Default clamp for a single frame delta
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(100);

    pub fn new() -> Self {
        Self::with_max_delta(Self::DEFAULT_MAX_DELTA)
    }

    pub fn with_max_delta(max_delta: Duration) -> Self {
        FrameTimer {
            last: None,
            max_delta,
        }
    }

    /// Delta since the previous call, measured at `now`.
    ///
    /// The first call returns zero. Instants earlier than the previous one
    /// also yield zero.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        dt.min(self.max_delta)
    }

    /// Delta since the previous call, measured now
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_animation_clock_advance() {
        let mut clock = AnimationClock::new();
        assert_eq!(clock.reading(), ClockReading::default());

        clock.advance(Duration::from_millis(16));
        let reading = clock.advance(Duration::from_millis(16));

        assert!((reading.elapsed - 0.032).abs() < 1e-9);
        assert!((reading.delta - 0.016).abs() < 1e-9);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_reading_does_not_advance() {
        let mut clock = AnimationClock::new();
        clock.advance(Duration::from_millis(500));
        let first = clock.reading();
        let second = clock.reading();
        assert_eq!(first, second);
    }

    #[test]
    fn test_frame_timer_first_tick_is_zero() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.tick_at(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_frame_timer_measures_delta() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        timer.tick_at(start);
        let dt = timer.tick_at(start + Duration::from_millis(16));
        assert_eq!(dt, Duration::from_millis(16));
    }

    #[test]
    fn test_frame_timer_clamps_stalls() {
        let mut timer = FrameTimer::with_max_delta(Duration::from_millis(50));
        let start = Instant::now();
        timer.tick_at(start);
        let dt = timer.tick_at(start + Duration::from_secs(5));
        assert_eq!(dt, Duration::from_millis(50));
    }

    #[test]
    fn test_frame_timer_monotonic() {
        let mut timer = FrameTimer::new();
        let t1 = timer.tick();
        std::thread::sleep(Duration::from_millis(5));
        let t2 = timer.tick();
        assert_eq!(t1, Duration::ZERO);
        assert!(t2 > Duration::ZERO);
    }

    proptest! {
        #[test]
        fn prop_elapsed_never_decreases(deltas in prop::collection::vec(0u64..200_000, 1..64)) {
            let mut clock = AnimationClock::new();
            let mut previous = 0.0;
            for micros in deltas {
                let reading = clock.advance(Duration::from_micros(micros));
                prop_assert!(reading.elapsed >= previous);
                previous = reading.elapsed;
            }
        }
    }
}
