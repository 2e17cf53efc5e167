//! End-to-end scenarios
//!
//! Each helper drives a [`SimulatedPreview`] through one user story and
//! returns what a user would have observed.

use std::time::Duration;

use avatar_core::{AvatarError, Emotion};
use avatar_runtime::{
    Artifact, FrameOutput, PlaybackCommand, PlaybackState, SessionCommand, SessionEvent,
};

use crate::SimulatedPreview;

/// Upper bound on frames for any single scenario step
pub const FRAME_LIMIT: u64 = 10_000;

/// What "Generate & Play" showed
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Progress values in emission order
    pub progress: Vec<u8>,
    pub completed: bool,
    /// Wall time from the button press to playback
    pub wall_time: Duration,
}

/// Press "Generate & Play" and wait until playback starts
pub fn generate_and_play(sim: &mut SimulatedPreview) -> Result<GenerationReport, AvatarError> {
    sim.take_events();
    let started = sim.stats().wall_time;
    sim.apply(PlaybackCommand::Start)?;
    sim.run_until(FRAME_LIMIT, |frame| frame.state == PlaybackState::Playing);

    let mut report = GenerationReport {
        wall_time: sim.stats().wall_time - started,
        ..Default::default()
    };
    for event in sim.take_events() {
        match event {
            SessionEvent::Progress(p) => report.progress.push(p),
            SessionEvent::GenerationComplete => report.completed = true,
            _ => {}
        }
    }
    Ok(report)
}

/// Move one slider
pub fn set_emotion(
    sim: &mut SimulatedPreview,
    emotion: Emotion,
    value: u8,
) -> Result<(), AvatarError> {
    sim.apply(SessionCommand::SetEmotion { emotion, value })
}

/// Smallest and largest mouth height over a run of frames
pub fn mouth_height_range(frames: &[FrameOutput]) -> (f32, f32) {
    frames.iter().fold((f32::MAX, f32::MIN), |(lo, hi), frame| {
        let y = frame.pose.mouth_scale.y;
        (lo.min(y), hi.max(y))
    })
}

/// Outcome of an export attempt
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub artifacts: Vec<Artifact>,
    pub failures: Vec<String>,
    /// A second export during the capture was refused as busy
    pub second_export_rejected: bool,
}

/// Export, try a second export right away, then run `duration` of frames
pub fn export_during_playback(
    sim: &mut SimulatedPreview,
    duration: Duration,
) -> Result<ExportReport, AvatarError> {
    sim.take_events();
    sim.apply(PlaybackCommand::Export)?;

    let mut report = ExportReport {
        second_export_rejected: matches!(
            sim.apply(PlaybackCommand::Export),
            Err(AvatarError::CaptureBusy(_))
        ),
        ..Default::default()
    };

    sim.run_for(duration);
    for event in sim.take_events() {
        match event {
            SessionEvent::ExportReady(artifact) => report.artifacts.push(artifact),
            SessionEvent::ExportFailed(reason) => report.failures.push(reason),
            _ => {}
        }
    }
    Ok(report)
}
