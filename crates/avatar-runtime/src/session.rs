//! Preview Session - one user's avatar preview
//!
//! Owns everything the preview page holds: emotion weights, selections, the
//! playback controller, the animation clock, the pose synthesizer and the
//! capture coordinator. Each [`PreviewSession::tick`] runs in a fixed order:
//!
//! 1. Step the generation ramp
//! 2. If playback was active when the tick began, advance the clock and
//!    synthesize a new pose; otherwise hold the last one
//! 3. Map the current emotions to an expression
//! 4. Hand the frame to an active capture

use std::collections::VecDeque;
use std::time::Duration;

use avatar_core::{
    AvatarError, AvatarPreset, AvatarResult, AvatarSource, Background, CameraAngle, EmotionVector,
    Selections, VoicePreset,
};
use avatar_time::AnimationClock;
use avatar_visual::{Expression, PoseFrame, PoseSynthesizer, SceneDescriptor};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    CaptureCoordinator, CaptureSink, MemorySink, PlaybackCommand, PlaybackController,
    PlaybackState, RampUpdate, RuntimeConfig, SessionCommand, SessionEvent,
};

/// Everything a renderer needs for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutput {
    /// Tick counter, starting at 1
    pub sequence: u64,
    /// Animation time in seconds
    pub elapsed: f64,
    pub state: PlaybackState,
    pub pose: PoseFrame,
    pub expression: Expression,
    /// Generation progress in percent
    pub progress: u8,
}

/// Preview session
#[derive(Debug)]
pub struct PreviewSession {
    emotions: EmotionVector,
    selections: Selections,
    scene: SceneDescriptor,
    controller: PlaybackController,
    clock: AnimationClock,
    synth: PoseSynthesizer,
    capture: CaptureCoordinator,
    last_pose: PoseFrame,
    sequence: u64,
    events: VecDeque<SessionEvent>,
}

impl PreviewSession {
    pub fn new(config: &RuntimeConfig, sink: Box<dyn CaptureSink>) -> Self {
        let selections = Selections::default();
        PreviewSession {
            emotions: EmotionVector::default(),
            scene: SceneDescriptor::new(selections.camera, selections.background),
            selections,
            controller: PlaybackController::new(config.playback.clone()),
            clock: AnimationClock::new(),
            synth: PoseSynthesizer::new(config.animation.clone()),
            capture: CaptureCoordinator::new(config.playback.clone(), sink),
            last_pose: PoseFrame::rest(),
            sequence: 0,
            events: VecDeque::new(),
        }
    }

    /// Session capturing into memory
    pub fn with_memory_sink(config: &RuntimeConfig) -> Self {
        Self::new(config, Box::new(MemorySink::new()))
    }

    /// Route one user interaction.
    ///
    /// Rejected commands change nothing and return the reason.
    pub fn apply(&mut self, command: SessionCommand) -> AvatarResult<()> {
        debug!(command = command.name(), "Apply");

        match command {
            SessionCommand::Playback(PlaybackCommand::Export) => self.export(),
            SessionCommand::Playback(playback) => self.controller.handle(playback),
            SessionCommand::SetEmotion { emotion, value } => {
                self.emotions = self.emotions.with_edit(emotion, value);
                debug!(emotions = ?self.emotions.values(), "Emotions normalized");
                Ok(())
            }
            SessionCommand::SelectAvatar(id) => {
                self.selections.avatar = AvatarSource::Preset(AvatarPreset::parse(&id)?);
                Ok(())
            }
            SessionCommand::UploadAvatar(upload) => {
                self.selections.avatar = AvatarSource::custom(upload)?;
                Ok(())
            }
            SessionCommand::SelectVoice(id) => {
                self.selections.voice = VoicePreset::parse(&id)?;
                Ok(())
            }
            SessionCommand::SelectCamera(id) => {
                self.selections.camera = CameraAngle::parse(&id)?;
                self.rebuild_scene();
                Ok(())
            }
            SessionCommand::SelectBackground(id) => {
                self.selections.background = Background::parse(&id)?;
                self.rebuild_scene();
                Ok(())
            }
            SessionCommand::SetInput(input) => {
                self.selections.input = input;
                Ok(())
            }
        }
    }

    fn export(&mut self) -> AvatarResult<()> {
        self.controller.authorize(PlaybackCommand::Export)?;

        match self.capture.start_now() {
            Ok(id) => {
                info!(capture = %id, "Recording started");
                self.events.push_back(SessionEvent::RecordingStarted);
                Ok(())
            }
            Err(err @ AvatarError::CaptureBusy(_)) => Err(err),
            Err(err) => {
                self.events.push_back(SessionEvent::ExportFailed(err.to_string()));
                Err(err)
            }
        }
    }

    fn rebuild_scene(&mut self) {
        self.scene = SceneDescriptor::new(self.selections.camera, self.selections.background);
    }

    /// Advance by one frame delta and produce the frame to present
    pub fn tick(&mut self, dt: Duration) -> FrameOutput {
        let was_playing = self.controller.state().is_playing();

        self.controller.advance(dt);
        for update in self.controller.drain_updates() {
            self.events.push_back(match update {
                RampUpdate::Progress(progress) => SessionEvent::Progress(progress),
                RampUpdate::Complete => SessionEvent::GenerationComplete,
            });
        }

        if was_playing {
            let reading = self.clock.advance(dt);
            self.last_pose = self.synth.synthesize(reading, &self.emotions);
        }

        self.sequence += 1;
        let frame = FrameOutput {
            sequence: self.sequence,
            elapsed: self.clock.reading().elapsed,
            state: self.controller.state(),
            pose: self.last_pose,
            expression: self.synth.expression(&self.emotions),
            progress: self.controller.progress(),
        };

        match self.capture.record(&frame, dt) {
            Some(Ok(artifact)) => self.events.push_back(SessionEvent::ExportReady(artifact)),
            Some(Err(err)) => self.events.push_back(SessionEvent::ExportFailed(err.to_string())),
            None => {}
        }

        frame
    }

    /// Take queued notices in emission order
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    pub fn emotions(&self) -> &EmotionVector {
        &self.emotions
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn scene(&self) -> &SceneDescriptor {
        &self.scene
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn progress(&self) -> u8 {
        self.controller.progress()
    }

    pub fn last_pose(&self) -> &PoseFrame {
        &self.last_pose
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avatar_core::{Emotion, InputMode};
    use avatar_visual::{FaceTone, Vec3};

    const DT: Duration = Duration::from_millis(100);

    fn session() -> PreviewSession {
        PreviewSession::with_memory_sink(&RuntimeConfig::default())
    }

    fn play(session: &mut PreviewSession) {
        session.apply(PlaybackCommand::Start.into()).unwrap();
        for _ in 0..21 {
            session.tick(DT);
        }
        assert_eq!(session.state(), PlaybackState::Playing);
        session.drain_events();
    }

    #[test]
    fn test_idle_holds_rest_pose() {
        let mut session = session();
        let frame = session.tick(DT);
        assert_eq!(frame.sequence, 1);
        assert_eq!(frame.state, PlaybackState::Idle);
        assert_eq!(frame.elapsed, 0.0);
        assert!(frame.pose.bits_eq(&PoseFrame::rest()));
        assert_eq!(frame.expression.tone, FaceTone::Neutral);
    }

    #[test]
    fn test_generation_events() {
        let mut session = session();
        session.apply(PlaybackCommand::Start.into()).unwrap();
        for _ in 0..21 {
            session.tick(DT);
        }
        let events = session.drain_events();
        assert_eq!(events.first(), Some(&SessionEvent::Progress(0)));
        assert_eq!(events.get(20), Some(&SessionEvent::Progress(100)));
        assert_eq!(events.last(), Some(&SessionEvent::GenerationComplete));
        assert_eq!(events.len(), 22);
    }

    #[test]
    fn test_clock_starts_after_generation() {
        let mut session = session();
        play(&mut session);
        // the completing tick does not advance the clock
        assert_eq!(session.clock().frames(), 0);
        let frame = session.tick(DT);
        assert!((frame.elapsed - 0.1).abs() < 1e-9);
        assert!(!frame.pose.bits_eq(&PoseFrame::rest()));
    }

    #[test]
    fn test_emotion_edits_stay_normalized() {
        let mut session = session();
        session
            .apply(SessionCommand::SetEmotion {
                emotion: Emotion::Happy,
                value: 100,
            })
            .unwrap();
        assert_eq!(session.emotions().total(), 100);
        assert_eq!(session.emotions().happy(), 50);

        let frame = session.tick(DT);
        assert_eq!(frame.expression.tone, FaceTone::Neutral);

        session
            .apply(SessionCommand::SetEmotion {
                emotion: Emotion::Neutral,
                value: 0,
            })
            .unwrap();
        assert_eq!(session.emotions().happy(), 100);
        let frame = session.tick(DT);
        assert_eq!(frame.expression.tone, FaceTone::Warm);
    }

    #[test]
    fn test_pause_freezes_pose() {
        let mut session = session();
        play(&mut session);
        for _ in 0..5 {
            session.tick(DT);
        }
        session.apply(PlaybackCommand::Pause.into()).unwrap();
        let held = session.tick(DT);
        for _ in 0..10 {
            let frame = session.tick(DT);
            assert!(frame.pose.bits_eq(&held.pose));
            assert_eq!(frame.elapsed, held.elapsed);
            assert_eq!(frame.state, PlaybackState::Paused);
        }
    }

    #[test]
    fn test_selections() {
        let mut session = session();
        session
            .apply(SessionCommand::SelectCamera("closeup".into()))
            .unwrap();
        assert_eq!(session.scene().camera.position, Vec3::new(0.0, 0.8, 1.5));

        let err = session
            .apply(SessionCommand::SelectBackground("plaid".into()))
            .unwrap_err();
        assert!(matches!(err, AvatarError::UnknownSelection { .. }));
        assert_eq!(session.selections().background, Background::default());

        session
            .apply(SessionCommand::SelectVoice("male2".into()))
            .unwrap();
        assert_eq!(session.selections().voice, VoicePreset::Michael);

        session
            .apply(SessionCommand::SetInput(InputMode::Text("Hello".into())))
            .unwrap();
        assert_eq!(session.selections().input.tab(), "text");
    }

    #[test]
    fn test_export_requires_playing() {
        let mut session = session();
        let err = session.apply(PlaybackCommand::Export.into()).unwrap_err();
        assert!(matches!(err, AvatarError::CommandRejected { .. }));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_export_produces_one_artifact() {
        let mut session = session();
        play(&mut session);

        session.apply(PlaybackCommand::Export.into()).unwrap();
        assert_eq!(session.drain_events(), vec![SessionEvent::RecordingStarted]);
        assert!(matches!(
            session.apply(PlaybackCommand::Export.into()),
            Err(AvatarError::CaptureBusy(_))
        ));

        let mut artifacts = Vec::new();
        for _ in 0..150 {
            session.tick(DT);
            for event in session.drain_events() {
                if let SessionEvent::ExportReady(artifact) = event {
                    artifacts.push(artifact);
                }
            }
        }
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].frames, 100);
        assert!(artifacts[0].file_name.starts_with("avatar-animation-"));
        assert!(artifacts[0].file_name.ends_with(".webm"));
        assert_eq!(session.state(), PlaybackState::Playing);
    }
}
