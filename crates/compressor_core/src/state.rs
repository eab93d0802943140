use std::time::Duration;

use bytes::Bytes;

use crate::view_model::AppViewModel;

pub type RunId = u64;

/// Name given to every compressed output handed to the embedder.
pub const COMPRESSED_FILENAME: &str = "compressed-video.mp4";
pub const COMPRESSED_MIME: &str = "video/mp4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    LoadingEngine,
    Compressing,
    Error,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineStatus {
    #[default]
    Unloaded,
    Loading,
    Ready,
    Failed,
}

/// User-visible failure, rendered through the message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKey {
    EngineLoadFailed,
    EngineNotLoaded,
    UnsupportedFileType,
    CompressionFailed,
    CompressionCancelled,
}

impl ErrorKey {
    pub fn catalog_key(self) -> &'static str {
        match self {
            ErrorKey::EngineLoadFailed => "VideoCompressor.errors.loadFailed",
            ErrorKey::EngineNotLoaded => "VideoCompressor.errors.notLoaded",
            ErrorKey::UnsupportedFileType => "VideoCompressor.errors.unsupportedType",
            ErrorKey::CompressionFailed => "VideoCompressor.errors.compressFailed",
            ErrorKey::CompressionCancelled => "VideoCompressor.errors.cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn classify(mime: &str) -> Option<Self> {
        if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// Captured file: immutable once routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Opaque reference to a published output, released before it is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactHandle {
    pub id: u64,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionFailure {
    Cancelled,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
    /// Percentage reduction; negative when the output grew.
    pub compression_ratio: f64,
    /// Wall-clock seconds.
    pub compression_time: f64,
}

impl CompressionStats {
    pub fn compute(original_size: u64, compressed_size: u64, elapsed: Duration) -> Self {
        let compression_ratio = if original_size == 0 {
            0.0
        } else {
            (original_size as f64 - compressed_size as f64) / original_size as f64 * 100.0
        };
        Self {
            original_size,
            compressed_size,
            compression_ratio,
            compression_time: elapsed.as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    component_id: Option<String>,
    phase: Phase,
    engine: EngineStatus,
    progress: u8,
    log_lines: Vec<String>,
    error: Option<ErrorKey>,
    selected: Option<SelectedFile>,
    artifact: Option<ArtifactHandle>,
    stats: Option<CompressionStats>,
    output_filename: Option<String>,
    current_run: Option<RunId>,
    last_run: RunId,
    dirty: bool,
}

impl AppState {
    pub fn new(component_id: Option<String>) -> Self {
        Self {
            component_id,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let page_error = (self.engine == EngineStatus::Failed).then_some(ErrorKey::EngineLoadFailed);
        let compressing = self.phase == Phase::Compressing;
        AppViewModel {
            phase: self.phase,
            engine: self.engine,
            picker_visible: !compressing,
            cancel_visible: compressing,
            progress: self.progress,
            page_error,
            inline_error: self.error,
            log_line_count: self.log_lines.len(),
            stats: self.stats,
            output_filename: self.output_filename.clone(),
            has_artifact: self.artifact.is_some(),
            dirty: self.dirty,
        }
    }

    pub fn component_id(&self) -> Option<&str> {
        self.component_id.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn engine(&self) -> EngineStatus {
        self.engine
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log_lines
    }

    pub fn error(&self) -> Option<ErrorKey> {
        self.error
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn artifact(&self) -> Option<&ArtifactHandle> {
        self.artifact.as_ref()
    }

    pub fn stats(&self) -> Option<&CompressionStats> {
        self.stats.as_ref()
    }

    pub fn current_run(&self) -> Option<RunId> {
        self.current_run
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_loading(&mut self) {
        self.engine = EngineStatus::Loading;
        self.phase = Phase::LoadingEngine;
        self.mark_dirty();
    }

    pub(crate) fn engine_ready(&mut self) {
        self.engine = EngineStatus::Ready;
        if self.phase == Phase::LoadingEngine {
            self.phase = Phase::Idle;
        }
        self.mark_dirty();
    }

    pub(crate) fn engine_failed(&mut self) {
        self.engine = EngineStatus::Failed;
        self.phase = Phase::Error;
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, key: ErrorKey) {
        self.error = Some(key);
        self.phase = Phase::Error;
        self.selected = None;
        self.current_run = None;
        self.mark_dirty();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
        self.error = None;
        if self.phase == Phase::Error && self.engine != EngineStatus::Failed {
            self.phase = Phase::Idle;
        }
        self.mark_dirty();
    }

    /// Captures a video and opens a new compression run.
    pub(crate) fn begin_compression(&mut self, file: SelectedFile) -> RunId {
        self.last_run += 1;
        let run = self.last_run;
        self.selected = Some(file);
        self.current_run = Some(run);
        self.phase = Phase::Compressing;
        self.progress = 0;
        self.log_lines.clear();
        self.error = None;
        self.mark_dirty();
        run
    }

    pub(crate) fn apply_progress(&mut self, fraction: f64) {
        let percent = if fraction.is_nan() {
            0
        } else {
            (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
        };
        if percent > self.progress {
            self.progress = percent;
            self.mark_dirty();
        }
    }

    pub(crate) fn push_log(&mut self, line: String) {
        self.log_lines.push(line);
    }

    /// Closes the current run successfully and returns the captured input.
    pub(crate) fn finish_compression(&mut self, stats: CompressionStats) -> Option<SelectedFile> {
        self.current_run = None;
        self.phase = Phase::Done;
        self.progress = 100;
        self.stats = Some(stats);
        self.mark_dirty();
        let input = self.selected.take();
        self.output_filename = input.as_ref().map(|file| file.name.clone());
        input
    }

    pub(crate) fn take_artifact(&mut self) -> Option<ArtifactHandle> {
        self.artifact.take()
    }

    pub(crate) fn set_artifact(&mut self, handle: ArtifactHandle) -> Option<ArtifactHandle> {
        self.mark_dirty();
        self.artifact.replace(handle)
    }

    /// Fresh page state that keeps the caller identity and run numbering.
    pub(crate) fn reloaded(&self) -> Self {
        Self {
            component_id: self.component_id.clone(),
            last_run: self.last_run,
            dirty: true,
            ..Self::default()
        }
    }
}
