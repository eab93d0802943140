use std::time::Duration;

use bytes::Bytes;
use compressor_core::RunId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Loaded(Result<(), TranscodeError>),
    Progress { run: RunId, fraction: f64 },
    Log(String),
    Finished {
        run: RunId,
        result: Result<Bytes, TranscodeError>,
        elapsed: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    #[error("engine is not loaded")]
    NotLoaded,
    #[error("engine failed to load: {0}")]
    LoadFailed(String),
    #[error("engine io error: {0}")]
    Io(String),
    #[error("transcode failed (exit code {code:?}): {message}")]
    TranscodeFailed { code: Option<i32>, message: String },
    #[error("unexpected engine output: {0}")]
    UnexpectedOutput(String),
    #[error("compression cancelled by user")]
    Cancelled,
}

impl TranscodeError {
    pub(crate) fn io(err: std::io::Error) -> Self {
        TranscodeError::Io(err.to_string())
    }
}
