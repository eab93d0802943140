use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{path:?} exists and is not a directory")]
    NotADirectory { path: PathBuf },
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Creates `dir` (and parents) unless it already exists as a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::NotADirectory {
            path: dir.to_path_buf(),
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        Err(source) => Err(PersistError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Writes whole files under one directory. A file appears at its final name
/// only once fully written and synced.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `content` to `{dir}/{filename}`, replacing any existing file.
    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;
        let target = self.dir.join(filename);
        let write_err = |source: io::Error| PersistError::Write {
            path: target.clone(),
            source,
        };

        let mut staged = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        staged.write_all(content).map_err(write_err)?;
        staged.as_file_mut().sync_all().map_err(write_err)?;
        staged
            .persist(&target)
            .map_err(|err| write_err(err.error))?;
        Ok(target)
    }
}
