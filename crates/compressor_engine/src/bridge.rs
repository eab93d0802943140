use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use compressor_core::{OutboundMessage, COMPRESSED_FILENAME, COMPRESSED_MIME};
use serde::Serialize;
use thiserror::Error;

/// Messages are never restricted to a particular receiving origin.
pub const TARGET_ORIGIN: &str = "*";

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to deliver message: {0}")]
    Io(#[from] io::Error),
}

/// Destination for messages addressed to the embedding parent.
pub trait MessageSink: Send {
    fn post(&mut self, message: &OutboundMessage) -> Result<(), BridgeError>;
}

/// Writes one JSON envelope per line.
pub struct JsonLinesBridge<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesBridge<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> MessageSink for JsonLinesBridge<W> {
    fn post(&mut self, message: &OutboundMessage) -> Result<(), BridgeError> {
        let envelope = Envelope {
            target_origin: TARGET_ORIGIN,
            message: WireMessage::from(message),
        };
        serde_json::to_writer(&mut self.writer, &envelope)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    target_origin: &'static str,
    message: WireMessage<'a>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum WireMessage<'a> {
    #[serde(rename_all = "camelCase")]
    ImageSelected {
        component_id: Option<&'a str>,
        file: WireFile<'a>,
        filename: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    VideoCompressed {
        component_id: Option<&'a str>,
        file: WireFile<'a>,
        filename: &'a str,
        stats: WireStats,
    },
}

#[derive(Serialize)]
struct WireFile<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    mime: &'a str,
    size: u64,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireStats {
    original_size: u64,
    compressed_size: u64,
    compression_ratio: f64,
    compression_time: f64,
}

impl<'a> From<&'a OutboundMessage> for WireMessage<'a> {
    fn from(message: &'a OutboundMessage) -> Self {
        match message {
            OutboundMessage::ImageSelected {
                component_id,
                file,
                filename,
            } => WireMessage::ImageSelected {
                component_id: component_id.as_deref(),
                file: WireFile {
                    name: &file.name,
                    mime: &file.mime,
                    size: file.size(),
                    data: STANDARD.encode(&file.bytes),
                },
                filename,
            },
            OutboundMessage::VideoCompressed {
                component_id,
                file,
                filename,
                stats,
            } => WireMessage::VideoCompressed {
                component_id: component_id.as_deref(),
                file: WireFile {
                    name: COMPRESSED_FILENAME,
                    mime: COMPRESSED_MIME,
                    size: file.len() as u64,
                    data: STANDARD.encode(file),
                },
                filename,
                stats: WireStats {
                    original_size: stats.original_size,
                    compressed_size: stats.compressed_size,
                    compression_ratio: stats.compression_ratio,
                    compression_time: stats.compression_time,
                },
            },
        }
    }
}
