use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use compressor_core::ArtifactHandle;
use engine_logging::{engine_info, engine_warn};
use thiserror::Error;

use crate::{artifact_filename, AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to write artifact: {0}")]
    Write(#[from] PersistError),
    #[error("failed to remove artifact {path:?}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Holds compressed outputs on disk until their handles are released.
#[derive(Debug)]
pub struct ArtifactStore {
    writer: AtomicFileWriter,
    next_id: u64,
    live: HashMap<u64, PathBuf>,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
            next_id: 0,
            live: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn path_of(&self, handle: &ArtifactHandle) -> Option<&Path> {
        self.live.get(&handle.id).map(PathBuf::as_path)
    }

    pub fn create(
        &mut self,
        content: &[u8],
        source_name: &str,
    ) -> Result<ArtifactHandle, ArtifactError> {
        self.next_id += 1;
        let id = self.next_id;
        let filename = artifact_filename(source_name, content, id);
        let path = self.writer.write(&filename, content)?;
        engine_info!("Created artifact {} at {:?} ({} bytes)", id, path, content.len());
        let uri = path.to_string_lossy().into_owned();
        self.live.insert(id, path);
        Ok(ArtifactHandle { id, uri })
    }

    /// Deletes the artifact. Returns `false` for handles this store no longer tracks.
    pub fn release(&mut self, handle: &ArtifactHandle) -> Result<bool, ArtifactError> {
        let Some(path) = self.live.remove(&handle.id) else {
            engine_warn!("Release of unknown artifact {} ignored", handle.id);
            return Ok(false);
        };
        match fs::remove_file(&path) {
            Ok(()) => {
                engine_info!("Released artifact {}", handle.id);
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(true),
            Err(source) => Err(ArtifactError::Remove { path, source }),
        }
    }
}

impl Drop for ArtifactStore {
    fn drop(&mut self) {
        for (id, path) in self.live.drain() {
            if let Err(err) = fs::remove_file(&path) {
                if err.kind() != io::ErrorKind::NotFound {
                    engine_warn!("Could not remove artifact {} at {:?}: {}", id, path, err);
                }
            }
        }
    }
}
