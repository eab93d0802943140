//! Compressor core: pure session state machine, routing and view-model helpers.
mod effect;
mod i18n;
mod msg;
mod picker;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, OutboundMessage};
pub use i18n::{Catalog, CatalogError};
pub use msg::Msg;
pub use picker::{accept, declared_mime_for, matches_accept_filter, DroppedFile, ACCEPTED_PATTERNS};
pub use state::{
    AppState, ArtifactHandle, CompressionFailure, CompressionStats, EngineStatus, ErrorKey,
    MediaKind, Phase, RunId, SelectedFile, COMPRESSED_FILENAME, COMPRESSED_MIME,
};
pub use update::update;
pub use view_model::AppViewModel;
