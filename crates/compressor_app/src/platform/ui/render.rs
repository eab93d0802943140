use compressor_core::{AppViewModel, Catalog, EngineStatus, Phase};

use super::constants::PROGRESS_BAR_WIDTH;

/// Renders view models through one locale's catalog.
#[derive(Debug, Clone)]
pub struct Renderer {
    catalog: Catalog,
}

impl Renderer {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn render(&self, view: &AppViewModel) -> Vec<String> {
        render(&self.catalog, view)
    }
}

pub fn render(catalog: &Catalog, view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(key) = view.page_error {
        lines.push(catalog.translate(key.catalog_key(), &[]));
    }

    match view.phase {
        Phase::LoadingEngine => lines.push(catalog.translate("VideoCompressor.loading", &[])),
        Phase::Compressing => {
            lines.push(format!(
                "{} {}",
                progress_bar(view.progress),
                catalog.translate(
                    "VideoCompressor.compressingProgress",
                    &[("progress", view.progress.to_string())],
                )
            ));
            if view.cancel_visible {
                lines.push(format!(
                    "[{}]",
                    catalog.translate("VideoCompressor.cancel", &[])
                ));
            }
        }
        Phase::Done => {
            if let Some(stats) = &view.stats {
                lines.push(catalog.translate(
                    "VideoCompressor.result",
                    &[
                        ("filename", view.output_filename.clone().unwrap_or_default()),
                        ("originalSize", format_with_commas(stats.original_size)),
                        ("compressedSize", format_with_commas(stats.compressed_size)),
                        ("compressionRatio", format!("{:.1}", stats.compression_ratio)),
                        ("compressionTime", format!("{:.2}", stats.compression_time)),
                    ],
                ));
            }
        }
        Phase::Idle | Phase::Error => {}
    }

    if let Some(key) = view.inline_error {
        lines.push(catalog.translate(key.catalog_key(), &[]));
    }

    if view.picker_visible && view.engine == EngineStatus::Ready && view.inline_error.is_none() {
        lines.push(catalog.translate("VideoCompressor.dropHint", &[]));
    }

    lines
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

fn format_with_commas(value: u64) -> String {
    let s = value.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    let bytes = s.as_bytes();
    for (idx, ch) in bytes.iter().enumerate() {
        if idx > 0 && (bytes.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch as char);
    }
    out
}
