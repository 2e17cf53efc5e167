//! Avatar Studio Preview Demo
//!
//! Runs one preview session in real time without a window:
//! - Emotion sliders set to a happy, slightly surprised mix
//! - Generate & Play with the progress ramp
//! - Export to the directory given as the first argument (default: cwd)
//!
//! Set `AVATAR_CONFIG` to a JSON file to override timings, e.g. a shorter
//! `playback.capture_duration_ms`.

use std::path::PathBuf;

use avatar_core::{AvatarError, Emotion};
use avatar_runtime::{
    telemetry, Driver, DriverError, FileSink, FrameOutput, PlaybackCommand, PreviewSession, RenderSurface,
    RuntimeConfig, SessionCommand, SessionEvent,
};
use avatar_visual::FaceTone;
use tracing::info;

/// Prints a one-line face summary every `every` frames
struct ConsoleSurface {
    every: u64,
}

impl RenderSurface for ConsoleSurface {
    fn present(&mut self, frame: &FrameOutput) {
        if frame.sequence % self.every != 0 {
            return;
        }
        let face = match frame.expression.tone {
            FaceTone::Warm => ":)",
            FaceTone::Cool => ":(",
            FaceTone::Flushed => ">:(",
            FaceTone::Pale => ":O",
            FaceTone::Neutral => ":|",
        };
        println!(
            "[{:>6}] {:<10} t={:>6.2}s {} mouth={:.2} eyes={:.2} body={:+.3}",
            frame.sequence,
            frame.state.name(),
            frame.elapsed,
            face,
            frame.pose.mouth_scale.y,
            frame.pose.left_eye_scale.y,
            frame.pose.body_rotation.y,
        );
    }
}

/// Split a refused command from a stopped driver
fn rejection(result: Result<(), DriverError>) -> Result<Option<AvatarError>, DriverError> {
    match result {
        Ok(()) => Ok(None),
        Err(DriverError::Rejected(err)) => Ok(Some(err)),
        Err(err) => Err(err),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RuntimeConfig::from_env()?;
    telemetry::init(&config);

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║           Avatar Studio - Preview Demo                     ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!("Exports go to {}", out_dir.display());
    println!();

    let session = PreviewSession::new(&config, Box::new(FileSink::new(&out_dir)));
    let mut handle = Driver::spawn(session, ConsoleSurface { every: 30 }, &config);

    for (emotion, value) in [
        (Emotion::Happy, 70),
        (Emotion::Surprised, 20),
        (Emotion::Neutral, 10),
    ] {
        handle
            .send(SessionCommand::SetEmotion { emotion, value })
            .await?;
    }
    handle
        .send(SessionCommand::SelectCamera("closeup".into()))
        .await?;
    handle.send(PlaybackCommand::Start.into()).await?;

    while let Some(event) = handle.next_event().await {
        match event {
            SessionEvent::Progress(p) => println!("Generating... {p}%"),
            SessionEvent::GenerationComplete => {
                println!("Generation complete, exporting");
                if let Some(err) = rejection(handle.send(PlaybackCommand::Export.into()).await)? {
                    println!("Export failed: {err}");
                    break;
                }
            }
            SessionEvent::RecordingStarted => println!("Recording..."),
            SessionEvent::ExportReady(artifact) => {
                match &artifact.location {
                    Some(path) => println!("Saved {} ({} frames)", path.display(), artifact.frames),
                    None => println!("Exported {} ({} frames)", artifact.file_name, artifact.frames),
                }
                break;
            }
            SessionEvent::ExportFailed(reason) => {
                println!("Export failed: {reason}");
                break;
            }
        }
    }

    handle.send(PlaybackCommand::Pause.into()).await?;
    let session = handle.shutdown().await?;
    info!(
        frames = session.clock().frames(),
        emotions = ?session.emotions().values(),
        "Demo finished"
    );
    Ok(())
}
