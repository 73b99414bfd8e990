//! Remote repository collaborators.
//!
//! The loader talks to the source-hosting provider only through
//! [`RemoteSource`]; authentication and wire details live outside this
//! crate. [`StaticSource`] is a deterministic in-memory implementation
//! used by tests and the demo seed path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of a remote tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteKind {
    File,
    Dir,
}

/// One node of the nested tree returned by the remote host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteNode {
    pub name: String,
    /// Repository-relative path, used when fetching this node's content.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: RemoteKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RemoteNode>,
}

impl RemoteNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: RemoteKind::File,
            children: Vec::new(),
        }
    }

    pub fn dir(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<RemoteNode>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: RemoteKind::Dir,
            children,
        }
    }
}

/// Failures surfaced by the remote host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("rate limited")]
    RateLimited,

    #[error("network error: {0}")]
    Network(String),
}

/// Read access to a remote repository.
pub trait RemoteSource {
    /// The repository's full tree. Failure here aborts a load.
    fn fetch_tree(&self, repo: &str) -> Result<Vec<RemoteNode>, RemoteError>;

    /// Text content of one file, by repository-relative path.
    fn fetch_file(&self, repo: &str, path: &str) -> Result<String, RemoteError>;
}

/// An in-memory source serving a fixed tree and content map, regardless of
/// the repository identifier.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tree: Vec<RemoteNode>,
    contents: BTreeMap<String, String>,
}

impl StaticSource {
    pub fn new(tree: Vec<RemoteNode>, contents: BTreeMap<String, String>) -> Self {
        Self { tree, contents }
    }

    /// The bundled sample repository: a small front-end project.
    pub fn sample() -> Self {
        let tree = vec![
            RemoteNode::dir(
                "src",
                "src",
                vec![
                    RemoteNode::dir(
                        "components",
                        "src/components",
                        vec![
                            RemoteNode::file("FileTree.jsx", "src/components/FileTree.jsx"),
                            RemoteNode::file("FileViewer.jsx", "src/components/FileViewer.jsx"),
                        ],
                    ),
                    RemoteNode::dir(
                        "styles",
                        "src/styles",
                        vec![RemoteNode::file("main.css", "src/styles/main.css")],
                    ),
                    RemoteNode::file("index.js", "src/index.js"),
                ],
            ),
            RemoteNode::file("package.json", "package.json"),
            RemoteNode::file("README.md", "README.md"),
        ];

        let contents = BTreeMap::from([
            (
                "src/components/FileTree.jsx".to_string(),
                "import React from 'react';\n\nconst FileTree = ({ files }) => (\n  <div className=\"file-tree\">\n    {files.map(file => (\n      <div key={file.path}>{file.name}</div>\n    ))}\n  </div>\n);\n\nexport default FileTree;\n"
                    .to_string(),
            ),
            (
                "src/components/FileViewer.jsx".to_string(),
                "import React from 'react';\n\nconst FileViewer = ({ content }) => (\n  <pre className=\"file-viewer\">{content}</pre>\n);\n\nexport default FileViewer;\n"
                    .to_string(),
            ),
            (
                "src/styles/main.css".to_string(),
                ".container {\n  max-width: 1200px;\n  margin: 0 auto;\n  padding: 20px;\n}\n".to_string(),
            ),
            (
                "src/index.js".to_string(),
                "import React from 'react';\nimport ReactDOM from 'react-dom';\nimport App from './components/App';\n\nReactDOM.render(<App />, document.getElementById('root'));\n"
                    .to_string(),
            ),
            (
                "package.json".to_string(),
                "{\n  \"name\": \"sample-project\",\n  \"version\": \"1.0.0\"\n}\n".to_string(),
            ),
            (
                "README.md".to_string(),
                "# sample-project\n\nA small front-end project used as the demo repository.\n".to_string(),
            ),
        ]);

        Self { tree, contents }
    }
}

impl RemoteSource for StaticSource {
    fn fetch_tree(&self, _repo: &str) -> Result<Vec<RemoteNode>, RemoteError> {
        Ok(self.tree.clone())
    }

    fn fetch_file(&self, _repo: &str, path: &str) -> Result<String, RemoteError> {
        self.contents
            .get(path)
            .cloned()
            .ok_or(RemoteError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_tree_and_contents_agree() {
        let source = StaticSource::sample();
        let tree = source.fetch_tree("any/repo").unwrap();
        assert!(!tree.is_empty());

        fn check(source: &StaticSource, nodes: &[RemoteNode]) {
            for node in nodes {
                match node.kind {
                    RemoteKind::File => {
                        assert!(
                            source.fetch_file("any/repo", &node.path).is_ok(),
                            "no content for {}",
                            node.path
                        );
                    },
                    RemoteKind::Dir => check(source, &node.children),
                }
            }
        }
        check(&source, &tree);
    }

    #[test]
    fn unknown_file_is_not_found() {
        let source = StaticSource::sample();
        assert_eq!(
            source.fetch_file("any/repo", "no/such/file.txt"),
            Err(RemoteError::NotFound)
        );
    }

    #[test]
    fn node_json_shape() {
        let node = RemoteNode::dir(
            "src",
            "src",
            vec![RemoteNode::file("main.rs", "src/main.rs")],
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "dir");
        assert_eq!(json["children"][0]["type"], "file");
        let back: RemoteNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn leaf_serializes_without_children_field() {
        let json = serde_json::to_value(RemoteNode::file("a.txt", "a.txt")).unwrap();
        assert!(json.get("children").is_none());
    }

    #[test]
    fn remote_error_display() {
        assert_eq!(format!("{}", RemoteError::RateLimited), "rate limited");
        assert_eq!(
            format!("{}", RemoteError::Network("timed out".into())),
            "network error: timed out"
        );
    }
}
