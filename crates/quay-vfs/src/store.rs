//! Flat path-keyed node map shared by both store backends.
//!
//! Keys are normalized absolute paths; the root directory is always
//! present. Directory membership is derived by prefix scan over the sorted
//! key space, never stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use quay_types::error::{QuayError, Result};

use crate::path::{dirname, join, normalize};
use crate::{EntryKind, Metadata};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum Node {
    File { content: String },
    Dir,
}

/// The flat backing map with the full recursive semantics. Backends wrap
/// this and add initialization/persistence on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct PathMap {
    nodes: BTreeMap<String, Node>,
}

impl PathMap {
    /// A map holding only the root directory.
    pub(crate) fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self { nodes }
    }

    pub(crate) fn readdir(&self, path: &str) -> Result<Vec<String>> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => {},
            Some(Node::File { .. }) => {
                return Err(QuayError::NotADirectory(path.into_owned()));
            },
            None => return Err(QuayError::NotFound(path.into_owned())),
        }

        let prefix = if path.as_ref() == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };

        // BTreeMap iteration is sorted by key, so direct children come out
        // in lexicographic order; range narrows the scan to the subtree.
        let mut names = Vec::new();
        for key in self.nodes.range(prefix.clone()..).map(|(k, _)| k) {
            if !key.starts_with(&prefix) {
                break;
            }
            let rest = &key[prefix.len()..];
            if !rest.is_empty() && !rest.contains('/') {
                names.push(rest.to_string());
            }
        }
        Ok(names)
    }

    pub(crate) fn stat(&self, path: &str) -> Result<Metadata> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File { content }) => Ok(Metadata {
                kind: EntryKind::File,
                size: content.len() as u64,
            }),
            Some(Node::Dir) => Ok(Metadata {
                kind: EntryKind::Directory,
                size: 0,
            }),
            None => Err(QuayError::NotFound(path.into_owned())),
        }
    }

    pub(crate) fn mkdir(&mut self, path: &str) -> Result<()> {
        let path = normalize(path).into_owned();
        match self.nodes.get(&path) {
            Some(Node::Dir) => return Ok(()), // Already exists, no error.
            Some(Node::File { .. }) => return Err(QuayError::NotADirectory(path)),
            None => {},
        }
        let parent = dirname(&path);
        if parent != path && !self.nodes.contains_key(&parent) {
            self.mkdir(&parent)?;
        }
        // A file on the ancestor chain makes the path unreachable.
        if let Some(Node::File { .. }) = self.nodes.get(&parent) {
            return Err(QuayError::NotADirectory(parent));
        }
        self.nodes.insert(path, Node::Dir);
        Ok(())
    }

    pub(crate) fn ensure_directory_exists(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        if path.as_ref() == "/" {
            return Ok(());
        }
        self.mkdir(&path)
    }

    pub(crate) fn create_file(&mut self, path: &str, content: &str) -> Result<()> {
        let path = normalize(path).into_owned();
        if path == "/" {
            return Err(QuayError::NotAFile(path));
        }
        if let Some(Node::Dir) = self.nodes.get(&path) {
            return Err(QuayError::NotAFile(path));
        }
        self.ensure_directory_exists(&dirname(&path))?;
        self.nodes.insert(
            path,
            Node::File {
                content: content.to_string(),
            },
        );
        Ok(())
    }

    pub(crate) fn read_file(&self, path: &str) -> Result<String> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File { content }) => Ok(content.clone()),
            Some(Node::Dir) => Err(QuayError::NotAFile(path.into_owned())),
            None => Err(QuayError::NotFound(path.into_owned())),
        }
    }

    pub(crate) fn remove(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File { .. }) => {
                self.nodes.remove(path.as_ref());
                Ok(())
            },
            Some(Node::Dir) => Err(QuayError::NotAFile(path.into_owned())),
            None => Err(QuayError::NotFound(path.into_owned())),
        }
    }

    pub(crate) fn remove_recursive(&mut self, path: &str) -> Result<()> {
        let path = normalize(path).into_owned();
        match self.nodes.get(&path) {
            // Missing path is treated as already deleted, so a sweep over a
            // possibly-inconsistent root listing never trips over itself.
            None => Ok(()),
            Some(Node::File { .. }) => {
                self.nodes.remove(&path);
                Ok(())
            },
            Some(Node::Dir) => {
                for child in self.readdir(&path)? {
                    self.remove_recursive(&join(&path, &child))?;
                }
                // The root entry itself is permanent.
                if path != "/" {
                    self.nodes.remove(&path);
                }
                Ok(())
            },
        }
    }

    pub(crate) fn clear(&mut self) -> Result<()> {
        for name in self.readdir("/")? {
            self.remove_recursive(&join("/", &name))?;
        }
        Ok(())
    }

    pub(crate) fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(normalize(path).as_ref())
    }

    /// Reinstate the root entry if a deserialized snapshot lost it.
    pub(crate) fn ensure_root(&mut self) {
        self.nodes.entry("/".to_string()).or_insert(Node::Dir);
    }
}
