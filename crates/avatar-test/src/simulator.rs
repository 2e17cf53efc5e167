//! Frame Simulator - deterministic stand-in for the real-time driver
//!
//! Simulates:
//! - Frame pacing with seeded jitter
//! - Occasional stalls (suspended tab, debugger pause)
//! - Delta clamping exactly as the driver applies it
//!
//! Everything runs on simulated time, so a seed fully determines the frame
//! sequence.

use std::time::{Duration, Instant};

use avatar_core::AvatarResult;
use avatar_runtime::{
    FrameOutput, MemorySink, PreviewSession, RuntimeConfig, SessionCommand, SessionEvent,
};
use avatar_time::FrameTimer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Frame pacing model
#[derive(Clone, Debug)]
pub struct FrameJitterModel {
    /// Nominal frame interval
    pub frame_interval: Duration,
    /// Random jitter per frame (microseconds)
    pub jitter_us: u32,
    /// Insert a stall every N frames
    pub stall_every: Option<u64>,
    /// Length of a stall
    pub stall: Duration,
}

impl FrameJitterModel {
    pub fn new(frame_interval: Duration, jitter_us: u32) -> Self {
        FrameJitterModel {
            frame_interval,
            jitter_us,
            stall_every: None,
            stall: Duration::ZERO,
        }
    }

    /// Perfect 60 Hz pacing
    pub fn steady() -> Self {
        Self::new(Duration::from_micros(16_667), 0)
    }

    /// 60 Hz with a few milliseconds of jitter
    pub fn jittery() -> Self {
        Self::new(Duration::from_micros(16_667), 4_000)
    }

    /// 60 Hz with a half-second stall every 120 frames
    pub fn stalling() -> Self {
        FrameJitterModel {
            stall_every: Some(120),
            stall: Duration::from_millis(500),
            ..Self::jittery()
        }
    }

    /// Wall time between frame `frame - 1` and `frame`
    pub fn next_interval(&self, frame: u64, rng: &mut StdRng) -> Duration {
        let base_us = self.frame_interval.as_micros() as i64;
        let jitter = if self.jitter_us > 0 {
            rng.gen_range(-(self.jitter_us as i64)..=self.jitter_us as i64)
        } else {
            0
        };
        let mut interval = Duration::from_micros((base_us + jitter).max(0) as u64);
        if let Some(every) = self.stall_every {
            if every > 0 && frame > 0 && frame % every == 0 {
                interval += self.stall;
            }
        }
        interval
    }
}

impl Default for FrameJitterModel {
    fn default() -> Self {
        Self::steady()
    }
}

/// Simulation counters
#[derive(Clone, Debug, Default)]
pub struct SimulationStats {
    pub frames: u64,
    /// Wall time simulated
    pub wall_time: Duration,
    /// Frame time handed to the session after clamping
    pub frame_time: Duration,
    /// Frames whose delta hit the clamp
    pub clamped_frames: u64,
}

/// Preview session driven by simulated frames
pub struct SimulatedPreview {
    session: PreviewSession,
    jitter: FrameJitterModel,
    timer: FrameTimer,
    rng: StdRng,
    origin: Instant,
    events: Vec<SessionEvent>,
    stats: SimulationStats,
}

impl SimulatedPreview {
    pub fn new(config: &RuntimeConfig, jitter: FrameJitterModel, seed: u64) -> Self {
        let session = PreviewSession::new(config, Box::new(MemorySink::new()));
        Self::with_session(session, config, jitter, seed)
    }

    /// Default configuration, steady pacing
    pub fn steady(seed: u64) -> Self {
        Self::new(&RuntimeConfig::default(), FrameJitterModel::steady(), seed)
    }

    pub fn with_session(
        session: PreviewSession,
        config: &RuntimeConfig,
        jitter: FrameJitterModel,
        seed: u64,
    ) -> Self {
        let origin = Instant::now();
        let mut timer = FrameTimer::with_max_delta(config.max_frame_delta());
        timer.tick_at(origin);
        SimulatedPreview {
            session,
            jitter,
            timer,
            rng: StdRng::seed_from_u64(seed),
            origin,
            events: Vec::new(),
            stats: SimulationStats::default(),
        }
    }

    pub fn apply(&mut self, command: impl Into<SessionCommand>) -> AvatarResult<()> {
        let result = self.session.apply(command.into());
        self.collect_events();
        result
    }

    /// Simulate one frame
    pub fn step(&mut self) -> FrameOutput {
        let interval = self.jitter.next_interval(self.stats.frames + 1, &mut self.rng);
        self.stats.wall_time += interval;

        let dt = self.timer.tick_at(self.origin + self.stats.wall_time);
        if dt < interval {
            self.stats.clamped_frames += 1;
        }
        self.stats.frame_time += dt;
        self.stats.frames += 1;

        let frame = self.session.tick(dt);
        self.collect_events();
        frame
    }

    /// Simulate at least `duration` of wall time
    pub fn run_for(&mut self, duration: Duration) -> Vec<FrameOutput> {
        let until = self.stats.wall_time + duration;
        let mut frames = Vec::new();
        while self.stats.wall_time < until {
            frames.push(self.step());
        }
        frames
    }

    /// Step until `done` holds for a frame, giving up after `limit` frames
    pub fn run_until<F>(&mut self, limit: u64, mut done: F) -> Option<FrameOutput>
    where
        F: FnMut(&FrameOutput) -> bool,
    {
        for _ in 0..limit {
            let frame = self.step();
            if done(&frame) {
                return Some(frame);
            }
        }
        None
    }

    fn collect_events(&mut self) {
        self.events.extend(self.session.drain_events());
    }

    /// Notices seen so far
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn session(&self) -> &PreviewSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PreviewSession {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_steady_intervals() {
        let model = FrameJitterModel::steady();
        let mut rng = StdRng::seed_from_u64(1);
        for frame in 1..100 {
            assert_eq!(model.next_interval(frame, &mut rng), Duration::from_micros(16_667));
        }
    }

    #[test]
    fn test_jitter_bounded() {
        let model = FrameJitterModel::jittery();
        let mut rng = StdRng::seed_from_u64(7);
        for frame in 1..1000 {
            let interval = model.next_interval(frame, &mut rng);
            assert!(interval >= Duration::from_micros(12_667));
            assert!(interval <= Duration::from_micros(20_667));
        }
    }

    #[test]
    fn test_stalls_are_clamped() {
        let mut sim = SimulatedPreview::new(
            &RuntimeConfig::default(),
            FrameJitterModel::stalling(),
            3,
        );
        sim.run_for(Duration::from_secs(5));
        let stats = sim.stats();
        assert!(stats.clamped_frames > 0);
        assert!(stats.frame_time < stats.wall_time);
    }

    fn run_seeded(seed: u64) -> Vec<FrameOutput> {
        let mut sim = SimulatedPreview::new(
            &RuntimeConfig::default(),
            FrameJitterModel::jittery(),
            seed,
        );
        sim.apply(avatar_runtime::PlaybackCommand::Start).unwrap();
        sim.run_for(Duration::from_secs(4))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_same_seed_same_frames(seed in any::<u64>()) {
            let a = run_seeded(seed);
            let b = run_seeded(seed);
            prop_assert_eq!(a.len(), b.len());
            for (fa, fb) in a.iter().zip(&b) {
                prop_assert!(fa.pose.bits_eq(&fb.pose));
                prop_assert_eq!(fa.elapsed.to_bits(), fb.elapsed.to_bits());
            }
        }
    }
}
