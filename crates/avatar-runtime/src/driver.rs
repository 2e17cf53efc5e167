//! Frame Driver - real-time loop around a [`PreviewSession`]
//!
//! One tokio task owns the session. A fixed-interval ticker drives frames,
//! commands arrive over a channel, and both are serialised through
//! `tokio::select!`, so the session itself needs no locking. The latest
//! frame is published through a shared handle for readers outside the task.

use std::sync::Arc;
use std::time::Duration;

use avatar_core::AvatarError;
use avatar_time::FrameTimer;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{FrameOutput, PreviewSession, RuntimeConfig, SessionCommand, SessionEvent};

/// Latest presented frame
pub type SharedFrame = Arc<Mutex<Option<FrameOutput>>>;

/// Rendering surface fed once per tick
pub trait RenderSurface: Send + 'static {
    fn present(&mut self, frame: &FrameOutput);
}

/// Surface that discards frames (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn present(&mut self, _frame: &FrameOutput) {}
}

/// Driver errors
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Driver stopped")]
    Stopped,

    #[error(transparent)]
    Rejected(#[from] AvatarError),
}

enum DriverMessage {
    Command(SessionCommand, oneshot::Sender<Result<(), AvatarError>>),
    Shutdown,
}

/// Frame driver
pub struct Driver<S: RenderSurface> {
    session: PreviewSession,
    surface: S,
    interval: Duration,
    timer: FrameTimer,
    commands: mpsc::UnboundedReceiver<DriverMessage>,
    events: mpsc::UnboundedSender<SessionEvent>,
    latest: SharedFrame,
}

impl<S: RenderSurface> Driver<S> {
    /// Spawn the driver loop on the current tokio runtime
    pub fn spawn(session: PreviewSession, surface: S, config: &RuntimeConfig) -> DriverHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let latest: SharedFrame = Arc::new(Mutex::new(None));

        let driver = Driver {
            session,
            surface,
            interval: config.frame_interval(),
            timer: FrameTimer::with_max_delta(config.max_frame_delta()),
            commands: command_rx,
            events: event_tx,
            latest: latest.clone(),
        };
        let task = tokio::spawn(driver.run());

        DriverHandle {
            commands: command_tx,
            events: event_rx,
            latest,
            task,
        }
    }

    async fn run(mut self) -> PreviewSession {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval = ?self.interval, "Driver started");

        loop {
            tokio::select! {
                _ = ticker.tick() => self.frame(),
                message = self.commands.recv() => match message {
                    Some(DriverMessage::Command(command, reply)) => {
                        let result = self.session.apply(command);
                        self.forward_events();
                        // caller may have stopped waiting
                        let _ = reply.send(result);
                    }
                    Some(DriverMessage::Shutdown) | None => break,
                },
            }
        }

        info!(frames = self.session.clock().frames(), "Driver stopped");
        self.session
    }

    fn frame(&mut self) {
        let dt = self.timer.tick_at(Instant::now().into_std());
        let frame = self.session.tick(dt);
        self.surface.present(&frame);
        *self.latest.lock() = Some(frame);
        self.forward_events();
    }

    fn forward_events(&mut self) {
        for event in self.session.drain_events() {
            if self.events.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }
}

/// Handle to a running driver
pub struct DriverHandle {
    commands: mpsc::UnboundedSender<DriverMessage>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    latest: SharedFrame,
    task: JoinHandle<PreviewSession>,
}

impl DriverHandle {
    /// Send a command and wait for the session's verdict
    pub async fn send(&self, command: SessionCommand) -> Result<(), DriverError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(DriverMessage::Command(command, reply_tx))
            .map_err(|_| DriverError::Stopped)?;
        reply_rx.await.map_err(|_| DriverError::Stopped)??;
        Ok(())
    }

    /// Next notice, or `None` once the driver has stopped
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Notices already queued
    pub fn pending_events(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Most recently presented frame
    pub fn latest_frame(&self) -> Option<FrameOutput> {
        self.latest.lock().clone()
    }

    pub fn shared_frame(&self) -> SharedFrame {
        self.latest.clone()
    }

    /// Stop the loop and take the session back
    pub async fn shutdown(self) -> Result<PreviewSession, DriverError> {
        if self.commands.send(DriverMessage::Shutdown).is_err() {
            warn!("Driver already stopped");
        }
        self.task.await.map_err(|_| DriverError::Stopped)
    }
}
