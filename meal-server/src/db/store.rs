//! Whole-file JSON document store
//!
//! Each collection is one pretty-printed JSON file. Reads deserialize the whole
//! file; writes serialize the whole value to a temp file and rename it over
//! the target file, so readers never see a half-written document.

use std::marker::PhantomData;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::utils::AppError;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::storage(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One JSON document holding a `T`
///
/// `update` serializes load-modify-save per document; plain `load` does not
/// take the lock.
#[derive(Debug)]
pub struct JsonStore<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the document
    ///
    /// A missing file yields `T::default()`. An unreadable or corrupt file is
    /// logged and also yields `T::default()`.
    pub fn load(&self) -> T {
        match self.try_load() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable store, using empty value");
                T::default()
            }
        }
    }

    /// Read the document, failing on anything but a missing file
    pub fn try_load(&self) -> StoreResult<T> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(self.io_error(e)),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the whole document (temp file + rename)
    pub fn save(&self, value: &T) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(value)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, content).map_err(|e| self.io_error(e))?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(self.io_error(e));
        }
        Ok(())
    }

    /// Load, mutate, save under the store lock
    ///
    /// Nothing is written when `f` returns an error, or when the file on disk
    /// cannot be read back.
    pub fn update<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.lock.lock();
        let mut value = self.try_load()?;
        let result = f(&mut value)?;
        self.save(&value)?;
        Ok(result)
    }

    /// Write `init()` if the file does not exist yet. Returns true when seeded.
    pub fn seed_with(&self, init: impl FnOnce() -> T) -> StoreResult<bool> {
        let _guard = self.lock.lock();
        if self.exists() {
            return Ok(false);
        }
        self.save(&init())?;
        Ok(true)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
