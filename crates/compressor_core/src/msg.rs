use std::time::Duration;

use bytes::Bytes;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Page mounted; the engine should start loading.
    Mounted,
    /// Engine initialization finished.
    EngineLoaded(Result<(), String>),
    /// User dropped or selected files.
    FilesDropped(Vec<crate::DroppedFile>),
    /// Engine progress for a run, as a fraction in `0.0..=1.0`.
    EngineProgress { run: crate::RunId, fraction: f64 },
    /// Engine diagnostic output.
    EngineLog(String),
    /// Engine completion for a run.
    CompressionFinished {
        run: crate::RunId,
        result: Result<Bytes, crate::CompressionFailure>,
        elapsed: Duration,
    },
    /// The output artifact requested by `Effect::CreateArtifact` exists.
    ArtifactCreated(crate::ArtifactHandle),
    /// User clicked Cancel.
    CancelClicked,
    /// Full page reset.
    ReloadRequested,
    /// Page is going away.
    Teardown,
    /// UI/render tick to coalesce rendering.
    Tick,
}
