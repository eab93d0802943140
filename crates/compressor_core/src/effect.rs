use bytes::Bytes;

use crate::{ArtifactHandle, CompressionStats, RunId, SelectedFile};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadEngine,
    StartCompression { run: RunId, file: SelectedFile },
    CancelCompression { run: RunId },
    CreateArtifact { bytes: Bytes, source_name: String },
    ReleaseArtifact(ArtifactHandle),
    Post(OutboundMessage),
}

/// Message for the embedding parent. Only successes are ever posted.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    ImageSelected {
        component_id: Option<String>,
        file: SelectedFile,
        filename: String,
    },
    VideoCompressed {
        component_id: Option<String>,
        file: Bytes,
        filename: String,
        stats: CompressionStats,
    },
}

impl OutboundMessage {
    pub fn type_tag(&self) -> &'static str {
        match self {
            OutboundMessage::ImageSelected { .. } => "IMAGE_SELECTED",
            OutboundMessage::VideoCompressed { .. } => "VIDEO_COMPRESSED",
        }
    }

    pub fn component_id(&self) -> Option<&str> {
        match self {
            OutboundMessage::ImageSelected { component_id, .. }
            | OutboundMessage::VideoCompressed { component_id, .. } => component_id.as_deref(),
        }
    }
}
