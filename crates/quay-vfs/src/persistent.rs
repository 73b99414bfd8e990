//! Persistent VFS backed by a JSON snapshot file.
//!
//! The whole path map is serialized after every mutation, the way a
//! browser-local store would checkpoint itself. Writes go to a temporary
//! file first and are renamed into place, and a mutation is only applied
//! to the visible map once its snapshot landed, so a failed write never
//! leaves a half-written entry behind.
//!
//! One process, one writer. Two `StoreVfs` values pointed at the same
//! snapshot will overwrite each other; nothing guards against that.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use quay_types::error::{QuayError, Result};

use crate::store::PathMap;
use crate::{Metadata, Vfs};

#[derive(Debug)]
enum StoreState {
    Uninitialized,
    Ready,
    Failed(String),
}

/// A virtual file system whose state survives process restarts.
#[derive(Debug)]
pub struct StoreVfs {
    snapshot: PathBuf,
    map: PathMap,
    state: StoreState,
}

impl StoreVfs {
    /// Create a store backed by the given snapshot path. Nothing is read
    /// until [`Vfs::ensure_initialized`] runs.
    pub fn new(snapshot: impl Into<PathBuf>) -> Self {
        Self {
            snapshot: snapshot.into(),
            map: PathMap::new(),
            state: StoreState::Uninitialized,
        }
    }

    /// The snapshot path this store persists to.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot
    }

    fn ready(&self) -> Result<()> {
        match &self.state {
            StoreState::Ready => Ok(()),
            StoreState::Uninitialized => Err(QuayError::StorageUnavailable(
                "store not initialized".to_string(),
            )),
            StoreState::Failed(reason) => Err(QuayError::StorageUnavailable(reason.clone())),
        }
    }

    /// Apply a mutation transactionally: the updated map is persisted
    /// before it becomes visible.
    fn commit<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&mut PathMap) -> Result<()>,
    {
        self.ready()?;
        let mut next = self.map.clone();
        op(&mut next)?;
        self.persist(&next)?;
        self.map = next;
        Ok(())
    }

    fn persist(&self, map: &PathMap) -> Result<()> {
        let data = serde_json::to_vec_pretty(map)
            .map_err(|e| QuayError::StorageUnavailable(format!("encode snapshot: {e}")))?;
        let tmp = self.snapshot.with_extension("tmp");
        fs::write(&tmp, &data)
            .map_err(|e| QuayError::StorageUnavailable(format!("write snapshot: {e}")))?;
        fs::rename(&tmp, &self.snapshot)
            .map_err(|e| QuayError::StorageUnavailable(format!("replace snapshot: {e}")))?;
        debug!("persisted store snapshot to {}", self.snapshot.display());
        Ok(())
    }

    fn load(snapshot: &Path) -> std::result::Result<PathMap, String> {
        if !snapshot.exists() {
            return Ok(PathMap::new());
        }
        let text =
            fs::read_to_string(snapshot).map_err(|e| format!("read snapshot: {e}"))?;
        let mut map: PathMap =
            serde_json::from_str(&text).map_err(|e| format!("decode snapshot: {e}"))?;
        map.ensure_root();
        Ok(map)
    }
}

impl Vfs for StoreVfs {
    fn ensure_initialized(&mut self) -> Result<()> {
        match self.state {
            StoreState::Ready => Ok(()),
            StoreState::Failed(ref reason) => Err(QuayError::StorageUnavailable(reason.clone())),
            StoreState::Uninitialized => match Self::load(&self.snapshot) {
                Ok(map) => {
                    self.map = map;
                    self.state = StoreState::Ready;
                    Ok(())
                },
                Err(reason) => {
                    self.state = StoreState::Failed(reason.clone());
                    Err(QuayError::StorageUnavailable(reason))
                },
            },
        }
    }

    fn readdir(&self, path: &str) -> Result<Vec<String>> {
        self.ready()?;
        self.map.readdir(path)
    }

    fn stat(&self, path: &str) -> Result<Metadata> {
        self.ready()?;
        self.map.stat(path)
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        self.commit(|map| map.mkdir(path))
    }

    fn ensure_directory_exists(&mut self, path: &str) -> Result<()> {
        self.commit(|map| map.ensure_directory_exists(path))
    }

    fn create_file(&mut self, path: &str, content: &str) -> Result<()> {
        self.commit(|map| map.create_file(path, content))
    }

    fn read_file(&self, path: &str) -> Result<String> {
        self.ready()?;
        self.map.read_file(path)
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        self.commit(|map| map.remove(path))
    }

    fn remove_recursive(&mut self, path: &str) -> Result<()> {
        self.commit(|map| map.remove_recursive(path))
    }

    fn clear(&mut self) -> Result<()> {
        self.commit(|map| map.clear())
    }

    fn exists(&self, path: &str) -> bool {
        self.ready().is_ok() && self.map.exists(path)
    }
}
