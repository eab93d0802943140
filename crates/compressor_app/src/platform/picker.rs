use std::fs;
use std::path::PathBuf;

use compressor_core::{matches_accept_filter, DroppedFile};
use engine_logging::{engine_debug, engine_warn};

/// Reads dropped paths from disk. Unreadable paths are skipped.
pub fn read_drop(paths: &[PathBuf]) -> Vec<DroppedFile> {
    paths
        .iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            match fs::read(path) {
                Ok(bytes) => {
                    if !matches_accept_filter(&name) {
                        engine_debug!("{} is outside the accept filter", name);
                    }
                    Some(DroppedFile::from_name(name, bytes))
                }
                Err(err) => {
                    engine_warn!("Could not read dropped file {:?}: {}", path, err);
                    None
                }
            }
        })
        .collect()
}
