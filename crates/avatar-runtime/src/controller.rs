//! Playback Controller - generation ramp and play/pause state machine
//!
//! ```text
//! Idle | Paused --Start------> Generating
//! Idle | Playing | Paused --Regenerate--> Generating
//! Generating --ramp done--> Playing
//! Playing --Pause--> Paused
//! ```
//!
//! The generation ramp is time-stepped state rather than a detached task:
//! [`PlaybackController::advance`] consumes simulated time and emits one
//! progress step per step delay. Only one ramp exists at a time; starting a
//! new one replaces its [`GenerationToken`], so a superseded ramp can never
//! touch progress again.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use avatar_core::{AvatarError, AvatarResult, GenerationToken};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{PlaybackCommand, PlaybackConfig};

/// Full progress
pub const PROGRESS_DONE: u8 = 100;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Generating,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn name(self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Generating => "generating",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        }
    }

    #[inline]
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Notice produced by the ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampUpdate {
    Progress(u8),
    Complete,
}

/// The single in-flight generation ramp
#[derive(Debug, Clone)]
struct Ramp {
    token: GenerationToken,
    /// Time left until the next step fires
    until_next: Duration,
}

/// Playback controller
#[derive(Debug)]
pub struct PlaybackController {
    config: PlaybackConfig,
    state: PlaybackState,
    progress: u8,
    last_token: GenerationToken,
    ramp: Option<Ramp>,
    updates: VecDeque<RampUpdate>,
}

impl PlaybackController {
    pub fn new(config: PlaybackConfig) -> Self {
        PlaybackController {
            config,
            state: PlaybackState::Idle,
            progress: 0,
            last_token: GenerationToken::ZERO,
            ramp: None,
            updates: VecDeque::new(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Generation progress in percent
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Token of the running ramp, if any
    pub fn ramp_token(&self) -> Option<GenerationToken> {
        self.ramp.as_ref().map(|r| r.token)
    }

    /// Most recently issued token
    pub fn last_token(&self) -> GenerationToken {
        self.last_token
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Check whether `command` is allowed in the current state
    pub fn authorize(&self, command: PlaybackCommand) -> AvatarResult<()> {
        use PlaybackState::*;

        let allowed = match command {
            PlaybackCommand::Start => matches!(self.state, Idle | Paused),
            PlaybackCommand::Regenerate => matches!(self.state, Idle | Playing | Paused),
            PlaybackCommand::Pause | PlaybackCommand::Export => self.state == Playing,
        };

        if allowed {
            Ok(())
        } else {
            warn!(command = command.name(), state = self.state.name(), "Command rejected");
            Err(AvatarError::CommandRejected {
                command: command.name(),
                state: self.state.name(),
            })
        }
    }

    /// Apply a state-changing command.
    ///
    /// Export is authorized here but carried out by the capture
    /// coordinator; it never changes playback state.
    pub fn handle(&mut self, command: PlaybackCommand) -> AvatarResult<()> {
        self.authorize(command)?;

        match command {
            PlaybackCommand::Start | PlaybackCommand::Regenerate => self.begin_ramp(),
            PlaybackCommand::Pause => self.transition(PlaybackState::Paused),
            PlaybackCommand::Export => {}
        }
        Ok(())
    }

    fn begin_ramp(&mut self) {
        let token = self.last_token.next();
        self.last_token = token;
        self.progress = 0;
        self.ramp = Some(Ramp {
            token,
            until_next: self.config.step_delay(),
        });
        self.updates.push_back(RampUpdate::Progress(0));
        self.transition(PlaybackState::Generating);
        debug!(%token, "Generation ramp started");
    }

    fn transition(&mut self, to: PlaybackState) {
        if self.state != to {
            info!(from = self.state.name(), to = to.name(), "Playback state");
            self.state = to;
        }
    }

    /// Consume `dt` of time, stepping the ramp as many times as it covers
    pub fn advance(&mut self, dt: Duration) {
        let step = self.config.effective_step();
        let delay = self.config.step_delay();
        let mut budget = dt;

        while let Some(ramp) = self.ramp.as_mut() {
            if budget < ramp.until_next {
                ramp.until_next -= budget;
                break;
            }
            budget -= ramp.until_next;

            if self.progress >= PROGRESS_DONE {
                let token = ramp.token;
                self.ramp = None;
                self.updates.push_back(RampUpdate::Complete);
                self.transition(PlaybackState::Playing);
                info!(%token, "Generation complete");
                break;
            }

            ramp.until_next = delay;
            self.progress = self.progress.saturating_add(step).min(PROGRESS_DONE);
            self.updates.push_back(RampUpdate::Progress(self.progress));
            debug!(token = %ramp.token, progress = self.progress, "Ramp step");
        }
    }

    /// Take queued ramp notices in emission order
    pub fn drain_updates(&mut self) -> impl Iterator<Item = RampUpdate> + '_ {
        self.updates.drain(..)
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
