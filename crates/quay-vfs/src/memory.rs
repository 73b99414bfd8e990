//! In-memory VFS implementation.
//!
//! Ephemeral store for unit tests and throwaway sessions. Nothing is
//! persisted; initialization always succeeds.

use quay_types::error::Result;

use crate::store::PathMap;
use crate::{Metadata, Vfs};

/// A fully in-memory virtual file system.
#[derive(Debug)]
pub struct MemoryVfs {
    map: PathMap,
}

impl MemoryVfs {
    /// Create a new in-memory VFS with only the root directory.
    pub fn new() -> Self {
        Self {
            map: PathMap::new(),
        }
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs for MemoryVfs {
    fn ensure_initialized(&mut self) -> Result<()> {
        Ok(())
    }

    fn readdir(&self, path: &str) -> Result<Vec<String>> {
        self.map.readdir(path)
    }

    fn stat(&self, path: &str) -> Result<Metadata> {
        self.map.stat(path)
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        self.map.mkdir(path)
    }

    fn ensure_directory_exists(&mut self, path: &str) -> Result<()> {
        self.map.ensure_directory_exists(path)
    }

    fn create_file(&mut self, path: &str, content: &str) -> Result<()> {
        self.map.create_file(path, content)
    }

    fn read_file(&self, path: &str) -> Result<String> {
        self.map.read_file(path)
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        self.map.remove(path)
    }

    fn remove_recursive(&mut self, path: &str) -> Result<()> {
        self.map.remove_recursive(path)
    }

    fn clear(&mut self) -> Result<()> {
        self.map.clear()
    }

    fn exists(&self, path: &str) -> bool {
        self.map.exists(path)
    }
}
