use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use compressor_core::RunId;
use engine_logging::{engine_debug, engine_info, engine_output, engine_warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, ProgressTracker, TranscodeError};

pub const INPUT_NAME: &str = "input.mp4";
pub const OUTPUT_NAME: &str = "output.mp4";

/// Fixed encoder profile: H.264 at 720p/15fps, tuned for encode speed over quality.
pub const TRANSCODE_ARGS: &[&str] = &[
    "-i",
    INPUT_NAME,
    "-c:v",
    "libx264",
    "-tag:v",
    "avc1",
    "-movflags",
    "faststart",
    "-crf",
    "26",
    "-preset",
    "ultrafast",
    "-tune",
    "zerolatency",
    "-vf",
    "scale=-2:720",
    "-r",
    "15",
    "-threads",
    "0",
    "-x264opts",
    "no-cabac:ref=0:weightp=0:8x8dct=0",
    "-progress",
    "pipe:1",
    "-nostats",
    "-y",
    OUTPUT_NAME,
];

#[derive(Debug, Clone)]
pub struct TranscodeSettings {
    pub ffmpeg_path: PathBuf,
    /// Parent directory for per-run scratch workspaces; system temp when `None`.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            scratch_dir: None,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Transcoder: Send + Sync {
    /// Initializes the engine. Must resolve before `compress` is attempted.
    async fn load(&self, sink: &dyn ProgressSink) -> Result<(), TranscodeError>;

    fn is_loaded(&self) -> bool;

    async fn compress(
        &self,
        run: RunId,
        input: &[u8],
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Bytes, TranscodeError>;
}

/// Drives an `ffmpeg` executable with the fixed profile.
#[derive(Debug)]
pub struct FfmpegTranscoder {
    settings: TranscodeSettings,
    loaded: AtomicBool,
}

impl FfmpegTranscoder {
    pub fn new(settings: TranscodeSettings) -> Self {
        Self {
            settings,
            loaded: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &TranscodeSettings {
        &self.settings
    }

    fn scratch_workspace(&self) -> Result<tempfile::TempDir, TranscodeError> {
        let builder = {
            let mut builder = tempfile::Builder::new();
            builder.prefix("compressor-");
            builder
        };
        match &self.settings.scratch_dir {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        }
        .map_err(TranscodeError::io)
    }
}

#[async_trait::async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn load(&self, sink: &dyn ProgressSink) -> Result<(), TranscodeError> {
        let output = Command::new(&self.settings.ffmpeg_path)
            .arg("-hide_banner")
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|err| {
                TranscodeError::LoadFailed(format!(
                    "{}: {err}",
                    self.settings.ffmpeg_path.display()
                ))
            })?;

        if !output.status.success() {
            return Err(TranscodeError::LoadFailed(format!(
                "version probe exited with {}",
                output.status
            )));
        }

        let banner = String::from_utf8_lossy(&output.stdout);
        if let Some(first) = banner.lines().next() {
            engine_info!("Engine loaded: {}", first);
            sink.emit(EngineEvent::Log(first.to_string()));
        }
        self.loaded.store(true, Ordering::Release);
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    async fn compress(
        &self,
        run: RunId,
        input: &[u8],
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Bytes, TranscodeError> {
        if !self.is_loaded() {
            return Err(TranscodeError::NotLoaded);
        }

        let workspace = self.scratch_workspace()?;
        tokio::fs::write(workspace.path().join(INPUT_NAME), input)
            .await
            .map_err(TranscodeError::io)?;
        engine_debug!(
            "run={} wrote {} input bytes to {:?}",
            run,
            input.len(),
            workspace.path()
        );

        let mut child = Command::new(&self.settings.ffmpeg_path)
            .args(TRANSCODE_ARGS)
            .current_dir(workspace.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(TranscodeError::io)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TranscodeError::Io("engine stdout unavailable".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| TranscodeError::Io("engine stderr unavailable".into()))?;

        let tracker = Mutex::new(ProgressTracker::default());

        let read_log = async {
            let mut lines = BufReader::new(stderr).lines();
            while let Some(line) = lines.next_line().await? {
                engine_output!("{}", line);
                if let Ok(mut tracker) = tracker.lock() {
                    tracker.observe_log(&line);
                }
                sink.emit(EngineEvent::Log(line));
            }
            Ok::<(), std::io::Error>(())
        };

        let read_progress = async {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                let fraction = tracker
                    .lock()
                    .ok()
                    .and_then(|mut tracker| tracker.observe_progress(&line));
                if let Some(fraction) = fraction {
                    sink.emit(EngineEvent::Progress { run, fraction });
                }
            }
            Ok::<(), std::io::Error>(())
        };

        let run_to_exit = async {
            let mut child = child;
            futures_util::future::try_join(read_log, read_progress).await?;
            child.wait().await
        };

        // Dropping the losing branch drops the child, which kills it.
        let status = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                engine_info!("run={} cancelled", run);
                return Err(TranscodeError::Cancelled);
            }
            status = run_to_exit => status.map_err(TranscodeError::io)?,
        };

        if !status.success() {
            let message = tracker
                .lock()
                .ok()
                .and_then(|tracker| tracker.last_log().map(ToOwned::to_owned))
                .unwrap_or_else(|| status.to_string());
            engine_warn!("run={} engine exited with {}: {}", run, status, message);
            return Err(TranscodeError::TranscodeFailed {
                code: status.code(),
                message,
            });
        }

        match tokio::fs::read(workspace.path().join(OUTPUT_NAME)).await {
            Ok(data) => {
                engine_info!("run={} produced {} bytes", run, data.len());
                Ok(Bytes::from(data))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(
                TranscodeError::UnexpectedOutput(format!("{OUTPUT_NAME} was not written")),
            ),
            Err(err) => Err(TranscodeError::io(err)),
        }
    }
}
