use std::path::Path;

use bytes::Bytes;

use crate::SelectedFile;

/// Accept filter advertised to the user: MIME family and the extensions it covers.
///
/// The filter is advisory. Routing happens on the declared MIME type downstream.
pub const ACCEPTED_PATTERNS: &[(&str, &[&str])] = &[
    ("video/*", &["mp4"]),
    ("image/*", &["jpg", "jpeg", "png", "webp", "gif"]),
];

/// A file as delivered by a drop or a selection, before routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    pub name: String,
    pub declared_mime: Option<String>,
    pub bytes: Bytes,
}

impl DroppedFile {
    /// Builds a dropped file whose MIME type is derived from its extension.
    pub fn from_name(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let declared_mime = Some(declared_mime_for(&name).to_string());
        Self {
            name,
            declared_mime,
            bytes: bytes.into(),
        }
    }
}

/// Forwards only the first of the dropped files. Zero files is a no-op.
pub fn accept(files: Vec<DroppedFile>) -> Option<SelectedFile> {
    let first = files.into_iter().next()?;
    let mime = first
        .declared_mime
        .unwrap_or_else(|| declared_mime_for(&first.name).to_string());
    Some(SelectedFile {
        name: first.name,
        mime,
        bytes: first.bytes,
    })
}

/// True when the file extension is one the picker advertises.
pub fn matches_accept_filter(name: &str) -> bool {
    let Some(ext) = extension(name) else {
        return false;
    };
    ACCEPTED_PATTERNS
        .iter()
        .flat_map(|(_, exts)| exts.iter())
        .any(|accepted| accepted.eq_ignore_ascii_case(&ext))
}

/// MIME type a browser file input would declare for this file name.
pub fn declared_mime_for(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
