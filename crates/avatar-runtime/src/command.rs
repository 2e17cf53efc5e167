//! Commands and notices exchanged with the host UI

use avatar_core::{Emotion, InputMode, UploadRef};

use crate::Artifact;

/// Playback buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackCommand {
    /// "Generate & Play"
    Start,
    Pause,
    Regenerate,
    /// Record the next seconds of animation to a downloadable file
    Export,
}

impl PlaybackCommand {
    pub fn name(self) -> &'static str {
        match self {
            PlaybackCommand::Start => "start",
            PlaybackCommand::Pause => "pause",
            PlaybackCommand::Regenerate => "regenerate",
            PlaybackCommand::Export => "export",
        }
    }
}

/// Any user interaction routed into a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Playback(PlaybackCommand),
    /// Slider edit; the vector is renormalized
    SetEmotion { emotion: Emotion, value: u8 },
    /// Preset avatar by identifier
    SelectAvatar(String),
    /// Custom avatar image
    UploadAvatar(UploadRef),
    SelectVoice(String),
    SelectCamera(String),
    SelectBackground(String),
    SetInput(InputMode),
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Playback(command) => command.name(),
            SessionCommand::SetEmotion { .. } => "set_emotion",
            SessionCommand::SelectAvatar(_) => "select_avatar",
            SessionCommand::UploadAvatar(_) => "upload_avatar",
            SessionCommand::SelectVoice(_) => "select_voice",
            SessionCommand::SelectCamera(_) => "select_camera",
            SessionCommand::SelectBackground(_) => "select_background",
            SessionCommand::SetInput(_) => "set_input",
        }
    }
}

impl From<PlaybackCommand> for SessionCommand {
    fn from(command: PlaybackCommand) -> Self {
        SessionCommand::Playback(command)
    }
}

/// User-visible notices
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Generation ramp progress in percent
    Progress(u8),
    GenerationComplete,
    RecordingStarted,
    ExportReady(Artifact),
    ExportFailed(String),
}
