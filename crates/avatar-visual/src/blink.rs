//! Blink Cycle - periodic eye close/reopen layered on eye scale

use std::f64::consts::PI;

use serde::Serialize;

use crate::AnimationConfig;

/// Where the eyes are in the blink cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BlinkPhase {
    /// Waiting for the next blink
    Open,
    /// Mid-blink, phase in [0, 1)
    Closing(f64),
    /// The blink finished on this advance; timer restarted
    Reopened,
}

/// Blink timer.
///
/// The timer accumulates frame deltas. Once it passes the interval, the
/// blink phase `(timer - interval) * speed` sweeps from 0 to 1 and the eye
/// y-scale follows `1 - sin(phase * π) * depth`. When the phase reaches 1
/// the eyes snap open and the timer restarts at 0.
#[derive(Debug, Clone)]
pub struct BlinkCycle {
    timer: f64,
    phase: BlinkPhase,
    interval: f64,
    speed: f64,
    depth: f64,
}

impl BlinkCycle {
    pub fn new(config: &AnimationConfig) -> Self {
        BlinkCycle {
            timer: 0.0,
            phase: BlinkPhase::Open,
            interval: config.blink_interval,
            speed: config.blink_speed,
            depth: config.blink_depth,
        }
    }

    /// Advance by `dt` seconds and return the eye y-scale
    pub fn advance(&mut self, dt: f64) -> f32 {
        let timer = self.timer + dt;

        if timer > self.interval {
            let phase = (timer - self.interval) * self.speed;
            if phase < 1.0 {
                self.timer = timer;
                self.phase = BlinkPhase::Closing(phase);
                return (1.0 - (phase * PI).sin() * self.depth) as f32;
            }
            self.timer = 0.0;
            self.phase = BlinkPhase::Reopened;
            return 1.0;
        }

        self.timer = timer;
        self.phase = BlinkPhase::Open;
        1.0
    }

    /// Accumulated seconds since the last completed blink
    pub fn timer(&self) -> f64 {
        self.timer
    }

    /// Phase reached on the last advance
    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    pub fn is_blinking(&self) -> bool {
        matches!(self.phase, BlinkPhase::Closing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.01;

    fn cycle() -> BlinkCycle {
        BlinkCycle::new(&AnimationConfig::default())
    }

    #[test]
    fn test_eyes_open_before_interval() {
        let mut blink = cycle();
        let mut t = 0.0;
        while t < 2.99 {
            assert_eq!(blink.advance(DT), 1.0);
            assert!(!blink.is_blinking());
            t += DT;
        }
    }

    #[test]
    fn test_full_cycle_within_tenth_of_second() {
        let mut blink = cycle();
        blink.advance(3.0);
        assert_eq!(blink.phase(), BlinkPhase::Open);

        let mut blink_time = 0.0;
        let mut min_scale = 1.0f32;
        loop {
            let scale = blink.advance(DT);
            blink_time += DT;
            min_scale = min_scale.min(scale);
            if blink.phase() == BlinkPhase::Reopened {
                assert_eq!(scale, 1.0);
                break;
            }
            assert!(blink_time < 0.2, "blink never finished");
        }

        assert!(blink_time <= 0.1 + DT + 1e-9);
        assert!(min_scale < 0.3);
        assert_eq!(blink.timer(), 0.0);
    }

    #[test]
    fn test_midpoint_closes_eyes_most() {
        let mut blink = cycle();
        blink.advance(3.0);
        // phase 0.5 → 1 - sin(π/2) * 0.8
        let scale = blink.advance(0.05);
        assert!((scale - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_large_step_skips_blink() {
        let mut blink = cycle();
        assert_eq!(blink.advance(3.5), 1.0);
        assert_eq!(blink.phase(), BlinkPhase::Reopened);
        assert_eq!(blink.timer(), 0.0);
    }

    #[test]
    fn test_blinks_repeat() {
        let mut blink = cycle();
        let mut completed = 0;
        for _ in 0..1000 {
            blink.advance(DT);
            if blink.phase() == BlinkPhase::Reopened {
                completed += 1;
            }
        }
        // ~3.1s per cycle over 10s
        assert_eq!(completed, 3);
    }
}
