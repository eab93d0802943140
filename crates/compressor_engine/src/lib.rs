//! Compressor engine: transcoding adapter, IO pipeline and effect execution.
mod artifact;
mod bridge;
mod engine;
mod filename;
mod persist;
mod progress;
mod transcode;
mod types;

pub use artifact::{ArtifactError, ArtifactStore};
pub use bridge::{BridgeError, JsonLinesBridge, MessageSink, TARGET_ORIGIN};
pub use engine::EngineHandle;
pub use filename::artifact_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use progress::{parse_duration_line, ProgressTracker};
pub use transcode::{
    ChannelProgressSink, FfmpegTranscoder, ProgressSink, TranscodeSettings, Transcoder,
    INPUT_NAME, OUTPUT_NAME, TRANSCODE_ARGS,
};
pub use types::{EngineEvent, TranscodeError};
