//! File-backed blob store

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use tracing::trace;

use super::{BlobStore, StorageError};

/// Blob store keeping each slot in `<dir>/<slot>.json`.
///
/// The directory is created on the first write. Writes land in a temporary
/// sibling file which is then renamed over the slot, so readers only ever see a
/// complete previous or complete new value.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !name.starts_with('.');

        if !valid {
            return Err(StorageError::Io(io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid slot name {name:?}"),
            )));
        }

        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(name)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(name)?;
        let tmp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir)?;
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;

        trace!(slot = name, path = %path.display(), bytes = value.len(), "slot written");

        Ok(())
    }
}
