//! Capture - recording rendered frames to a downloadable artifact
//!
//! The coordinator owns at most one active capture. Every frame presented
//! while it runs is handed to the [`CaptureSink`]; once the configured
//! duration of frame time has been recorded, the sink is finished and the
//! resulting [`Artifact`] is returned.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use avatar_core::{AvatarError, AvatarResult, CaptureId};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{FrameOutput, PlaybackConfig};

/// Parameters of one capture run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureRequest {
    pub id: CaptureId,
    pub file_name: String,
    pub media_type: String,
    pub fps: u32,
    pub bitrate: u64,
    pub duration_ms: u64,
}

impl CaptureRequest {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Finished capture
#[derive(Clone, PartialEq)]
pub struct Artifact {
    pub id: CaptureId,
    pub file_name: String,
    pub media_type: String,
    /// Frames recorded
    pub frames: u64,
    /// Frame time covered
    pub duration: Duration,
    pub bytes: Bytes,
    /// Where the artifact was written, for sinks that persist it
    pub location: Option<PathBuf>,
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("frames", &self.frames)
            .field("duration", &self.duration)
            .field("len", &self.bytes.len())
            .field("location", &self.location)
            .finish()
    }
}

/// Destination for captured frames
pub trait CaptureSink: Send {
    /// Prepare for a new capture
    fn begin(&mut self, request: &CaptureRequest) -> AvatarResult<()>;

    /// Record one presented frame
    fn record(&mut self, frame: &FrameOutput) -> AvatarResult<()>;

    /// Close the capture and hand back the artifact
    fn finish(&mut self) -> AvatarResult<Artifact>;
}

/// Capture in progress
#[derive(Debug)]
struct ActiveCapture {
    request: CaptureRequest,
    recorded: Duration,
    frames: u64,
}

/// Serialises captures onto a single sink
pub struct CaptureCoordinator {
    sink: Box<dyn CaptureSink>,
    config: PlaybackConfig,
    last_id: CaptureId,
    active: Option<ActiveCapture>,
}

impl CaptureCoordinator {
    pub fn new(config: PlaybackConfig, sink: Box<dyn CaptureSink>) -> Self {
        CaptureCoordinator {
            sink,
            config,
            last_id: CaptureId::ZERO,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_id(&self) -> Option<CaptureId> {
        self.active.as_ref().map(|a| a.request.id)
    }

    /// Start a capture named after `unix_ms`
    pub fn start(&mut self, unix_ms: u128) -> AvatarResult<CaptureId> {
        if let Some(active) = &self.active {
            warn!(capture = %active.request.id, "Capture already in progress");
            return Err(AvatarError::CaptureBusy(active.request.id));
        }

        let id = self.last_id.next();
        self.last_id = id;
        let request = CaptureRequest {
            id,
            file_name: self.config.file_name(unix_ms),
            media_type: self.config.capture_media_type.clone(),
            fps: self.config.capture_fps,
            bitrate: self.config.capture_bitrate,
            duration_ms: self.config.capture_duration_ms,
        };

        self.sink.begin(&request)?;
        info!(capture = %id, file = %request.file_name, "Capture started");
        self.active = Some(ActiveCapture {
            request,
            recorded: Duration::ZERO,
            frames: 0,
        });
        Ok(id)
    }

    /// Start a capture named after the current wall-clock time
    pub fn start_now(&mut self) -> AvatarResult<CaptureId> {
        let unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis());
        self.start(unix_ms)
    }

    /// Record a frame covering `dt` of frame time.
    ///
    /// Returns `Some` when the capture ended on this frame, either finished
    /// or failed. A failed capture is dropped; there is no retry.
    pub fn record(&mut self, frame: &FrameOutput, dt: Duration) -> Option<AvatarResult<Artifact>> {
        let active = self.active.as_mut()?;

        if let Err(err) = self.sink.record(frame) {
            warn!(capture = %active.request.id, error = %err, "Capture failed while recording");
            self.active = None;
            return Some(Err(err));
        }
        active.recorded += dt;
        active.frames += 1;

        if active.recorded < active.request.duration() {
            return None;
        }

        let id = active.request.id;
        let frames = active.frames;
        self.active = None;
        let result = self.sink.finish();
        match &result {
            Ok(artifact) => {
                info!(capture = %id, frames, bytes = artifact.bytes.len(), "Capture finished")
            }
            Err(err) => warn!(capture = %id, error = %err, "Capture failed to finish"),
        }
        Some(result)
    }
}

impl fmt::Debug for CaptureCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureCoordinator")
            .field("last_id", &self.last_id)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// In-memory sink writing newline-delimited JSON: a header line with the
/// request, then one line per frame
#[derive(Debug, Default)]
pub struct MemorySink {
    request: Option<CaptureRequest>,
    buffer: Vec<u8>,
    frames: u64,
    first_elapsed: Option<f64>,
    last_elapsed: f64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> AvatarResult<()> {
        serde_json::to_writer(&mut self.buffer, value)
            .map_err(|e| AvatarError::CaptureFailed(e.to_string()))?;
        self.buffer.push(b'\n');
        Ok(())
    }
}

impl CaptureSink for MemorySink {
    fn begin(&mut self, request: &CaptureRequest) -> AvatarResult<()> {
        self.buffer.clear();
        self.frames = 0;
        self.first_elapsed = None;
        self.last_elapsed = 0.0;
        self.write_line(request)?;
        self.request = Some(request.clone());
        Ok(())
    }

    fn record(&mut self, frame: &FrameOutput) -> AvatarResult<()> {
        if self.request.is_none() {
            return Err(AvatarError::NotRecording);
        }
        self.write_line(frame)?;
        self.frames += 1;
        self.first_elapsed.get_or_insert(frame.elapsed);
        self.last_elapsed = frame.elapsed;
        Ok(())
    }

    fn finish(&mut self) -> AvatarResult<Artifact> {
        let request = self.request.take().ok_or(AvatarError::NotRecording)?;
        let span = self.last_elapsed - self.first_elapsed.unwrap_or(self.last_elapsed);
        debug!(capture = %request.id, frames = self.frames, "Memory sink closed");
        Ok(Artifact {
            id: request.id,
            file_name: request.file_name,
            media_type: request.media_type,
            frames: self.frames,
            duration: Duration::from_secs_f64(span.max(0.0)),
            bytes: Bytes::from(std::mem::take(&mut self.buffer)),
            location: None,
        })
    }
}

/// Sink that writes each finished artifact into a directory
#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
    inner: MemorySink,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSink {
            dir: dir.into(),
            inner: MemorySink::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CaptureSink for FileSink {
    fn begin(&mut self, request: &CaptureRequest) -> AvatarResult<()> {
        if !self.dir.is_dir() {
            return Err(AvatarError::CaptureUnavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        self.inner.begin(request)
    }

    fn record(&mut self, frame: &FrameOutput) -> AvatarResult<()> {
        self.inner.record(frame)
    }

    fn finish(&mut self) -> AvatarResult<Artifact> {
        let mut artifact = self.inner.finish()?;
        let path = self.dir.join(&artifact.file_name);
        let mut file = std::fs::File::create(&path)
            .map_err(|e| AvatarError::CaptureFailed(format!("{}: {e}", path.display())))?;
        file.write_all(&artifact.bytes)
            .map_err(|e| AvatarError::CaptureFailed(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), "Artifact written");
        artifact.location = Some(path);
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlaybackState;
    use avatar_core::EmotionVector;
    use avatar_visual::{ExpressionMapper, PoseFrame};

    const DT: Duration = Duration::from_millis(100);

    fn frame(sequence: u64) -> FrameOutput {
        FrameOutput {
            sequence,
            elapsed: sequence as f64 * 0.1,
            state: PlaybackState::Playing,
            pose: PoseFrame::rest(),
            expression: ExpressionMapper::default().map(&EmotionVector::neutral()),
            progress: 100,
        }
    }

    fn coordinator() -> CaptureCoordinator {
        CaptureCoordinator::new(PlaybackConfig::default(), Box::new(MemorySink::new()))
    }

    struct BrokenSink;

    impl CaptureSink for BrokenSink {
        fn begin(&mut self, _request: &CaptureRequest) -> AvatarResult<()> {
            Ok(())
        }

        fn record(&mut self, _frame: &FrameOutput) -> AvatarResult<()> {
            Err(AvatarError::CaptureFailed("disk full".into()))
        }

        fn finish(&mut self) -> AvatarResult<Artifact> {
            Err(AvatarError::NotRecording)
        }
    }

    #[test]
    fn test_capture_finishes_after_duration() {
        let mut capture = coordinator();
        let id = capture.start(1_700_000_000_000).unwrap();
        assert_eq!(capture.active_id(), Some(id));

        for sequence in 0..99 {
            assert!(capture.record(&frame(sequence), DT).is_none());
        }
        let artifact = capture.record(&frame(99), DT).unwrap().unwrap();

        assert!(!capture.is_active());
        assert_eq!(artifact.id, id);
        assert_eq!(artifact.frames, 100);
        assert_eq!(artifact.file_name, "avatar-animation-1700000000000.webm");
        assert_eq!(artifact.media_type, "video/webm;codecs=vp9");
        // header + one line per frame
        let text = std::str::from_utf8(&artifact.bytes).unwrap();
        assert_eq!(text.lines().count(), 101);
    }

    #[test]
    fn test_second_capture_is_busy() {
        let mut capture = coordinator();
        let id = capture.start(1).unwrap();
        assert_eq!(capture.start(2), Err(AvatarError::CaptureBusy(id)));
        assert_eq!(capture.active_id(), Some(id));
    }

    #[test]
    fn test_record_without_capture_is_noop() {
        let mut capture = coordinator();
        assert!(capture.record(&frame(0), DT).is_none());
    }

    #[test]
    fn test_failed_sink_drops_capture() {
        let mut capture =
            CaptureCoordinator::new(PlaybackConfig::default(), Box::new(BrokenSink));
        capture.start(1).unwrap();
        let result = capture.record(&frame(0), DT).unwrap();
        assert!(matches!(result, Err(AvatarError::CaptureFailed(_))));
        assert!(!capture.is_active());
        // a new capture may start afterwards
        assert!(capture.start(2).is_ok());
    }

    #[test]
    fn test_memory_sink_requires_begin() {
        let mut sink = MemorySink::new();
        assert_eq!(sink.record(&frame(0)), Err(AvatarError::NotRecording));
        assert!(sink.finish().is_err());
    }

    #[test]
    fn test_file_sink_missing_dir() {
        let mut capture = CaptureCoordinator::new(
            PlaybackConfig::default(),
            Box::new(FileSink::new("/nonexistent/avatar-exports")),
        );
        assert!(matches!(
            capture.start(1),
            Err(AvatarError::CaptureUnavailable(_))
        ));
        assert!(!capture.is_active());
    }

    #[test]
    fn test_file_sink_writes_artifact() {
        let dir = std::env::temp_dir().join(format!("avatar-capture-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = PlaybackConfig {
            capture_duration_ms: 300,
            ..Default::default()
        };
        let mut capture = CaptureCoordinator::new(config, Box::new(FileSink::new(&dir)));
        capture.start(42).unwrap();

        let mut finished = None;
        for sequence in 0..3 {
            finished = capture.record(&frame(sequence), DT);
        }
        let artifact = finished.unwrap().unwrap();
        let path = artifact.location.clone().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes.to_vec());
        std::fs::remove_dir_all(&dir).ok();
    }
}
