use crate::{CompressionStats, EngineStatus, ErrorKey, Phase};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub engine: EngineStatus,
    pub picker_visible: bool,
    pub cancel_visible: bool,
    /// Always an integer percentage in `0..=100`.
    pub progress: u8,
    /// Persistent error that blocks compression until reload.
    pub page_error: Option<ErrorKey>,
    pub inline_error: Option<ErrorKey>,
    pub log_line_count: usize,
    pub stats: Option<CompressionStats>,
    /// Original name of the most recently compressed input.
    pub output_filename: Option<String>,
    pub has_artifact: bool,
    pub dirty: bool,
}
